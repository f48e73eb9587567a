//! # checkout-core
//!
//! Core types and checkout lifecycle for the FTUK checkout engine.
//!
//! This crate provides:
//! - `FormState` and the per-field keystroke normalizers
//! - `validate` / `ValidationErrors` for wholesale form validation
//! - `pricing`, the single source of price/discount computation
//! - `CheckoutSession` for the Form → Processing → Complete lifecycle
//! - `TransactionId`, `ReceiptOrder`, `ReceiptRequest`, `EmailMessage`
//! - `MailTransport` trait for outbound delivery implementations
//! - `CheckoutError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use checkout_core::{CheckoutSession, Field};
//!
//! let mut session = CheckoutSession::new();
//! session.edit(Field::FullName, "Jane Q. Trader");
//! session.edit(Field::CardNumber, "4242424242424242");
//! // ...remaining fields...
//!
//! session.submit()?;          // Form -> Processing (validation gate)
//! session.authorize().await;  // Processing -> Complete after the fixed delay
//!
//! let order = session.receipt_order();
//! // Hand `order` to the receipt pipeline in checkout-mail
//! ```

pub mod error;
pub mod form;
pub mod pricing;
pub mod receipt;
pub mod session;
pub mod validate;

// Re-exports for convenience
pub use error::{CheckoutError, CheckoutResult};
pub use form::{Field, FormState};
pub use receipt::{
    Attachment, BoxedMailTransport, EmailMessage, MailTransport, ReceiptOrder, ReceiptRequest,
    TransactionId,
};
pub use session::{CheckoutSession, LifecycleState, AUTHORIZATION_DELAY};
pub use validate::{validate, ValidationErrors};
