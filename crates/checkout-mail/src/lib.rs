//! # checkout-mail
//!
//! Receipt delivery for the FTUK checkout engine.
//!
//! This crate provides:
//!
//! 1. **SendGridTransport**: `MailTransport` over the SendGrid v3 API
//!    - Credential and sender from environment, read once at startup
//!    - Provider error-body parsing
//! 2. **render_receipt_pdf**: the single-page receipt document
//! 3. **ReceiptPipeline**: generate, render, dispatch, fall back
//!    - `request_receipt` for the full operation with the `mailto:` fallback
//!    - `deliver` for the server-side dispatch leg behind the HTTP endpoint
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use checkout_mail::ReceiptPipeline;
//!
//! // SENDGRID_API_KEY and SENDER_EMAIL must be set
//! let pipeline = ReceiptPipeline::from_env()?;
//!
//! match pipeline.request_receipt(&session.receipt_order()).await? {
//!     ReceiptOutcome::Sent { transaction_id } => { /* confirm to the user */ }
//!     ReceiptOutcome::Fallback { compose_url, .. } => { /* open the link */ }
//! }
//! ```

pub mod config;
pub mod document;
pub mod pipeline;
pub mod transport;

// Re-exports
pub use config::MailConfig;
pub use document::{render_receipt_attachment, render_receipt_pdf};
pub use pipeline::{ReceiptOutcome, ReceiptPipeline};
pub use transport::SendGridTransport;
