//! # checkout-wasm
//!
//! WebAssembly bindings for the FTUK checkout engine.
//!
//! This crate provides WASM-compatible access to:
//! - The field normalizer and validation engine (per keystroke / on submit)
//! - The checkout lifecycle machine
//! - Receipt payload and fallback compose-link construction
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmCheckout } from 'ftuk-checkout-wasm';
//!
//! await init();
//!
//! const checkout = new WasmCheckout();
//! checkout.edit('cardNumber', '4242424242424242');
//!
//! const errors = checkout.submit();
//! if (Object.keys(errors).length === 0) {
//!   // state is now "processing"; the page owns the authorization timer
//!   setTimeout(() => checkout.settle(), 900);
//! }
//!
//! const receipt = checkout.prepare_receipt();
//! // POST receipt.payload to /api/send-receipt;
//! // on failure, open receipt.composeUrl instead
//! ```
//!
//! ## Building
//!
//! ```bash
//! wasm-pack build --target web
//! ```

use checkout_core::{
    pricing, receipt, CheckoutSession, Field, LifecycleState, ReceiptRequest, TransactionId,
    ValidationErrors,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Initialize the WASM module (called automatically)
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Everything one receipt dispatch attempt needs: the endpoint payload and
/// the fallback compose link, built from a single transaction id.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptBundle {
    pub payload: ReceiptRequest,
    pub compose_url: String,
    pub transaction_id: TransactionId,
}

/// Browser-side checkout session
#[wasm_bindgen]
pub struct WasmCheckout {
    session: CheckoutSession,
}

#[wasm_bindgen]
impl WasmCheckout {
    /// Fresh session at the form stage
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            session: CheckoutSession::new(),
        }
    }

    /// Apply a single-field edit (field names are the wire names, e.g.
    /// `cardNumber`). Returns the normalized value.
    pub fn edit(&mut self, field: &str, raw: &str) -> Result<String, JsValue> {
        let field = parse_field(field)?;
        self.session.edit(field, raw);
        Ok(self.session.form().value(field).to_string())
    }

    /// Read a field's current canonical value
    pub fn value(&self, field: &str) -> Result<String, JsValue> {
        let field = parse_field(field)?;
        Ok(self.session.form().value(field).to_string())
    }

    /// Attempt submission. Returns the error map (an empty object means the
    /// attempt was accepted and the session is now processing).
    pub fn submit(&mut self) -> Result<JsValue, JsValue> {
        let errors = match self.session.submit() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };
        to_js(&errors)
    }

    /// Current error map (field name → message)
    pub fn errors(&self) -> Result<JsValue, JsValue> {
        to_js(self.session.errors())
    }

    /// Complete the in-flight authorization. The page owns the fixed-delay
    /// timer; this is the `processing` → `complete` transition.
    pub fn settle(&mut self) {
        self.session.settle();
    }

    /// "Make another payment": reset to a fresh form (only from `complete`)
    pub fn restart(&mut self) {
        self.session.restart();
    }

    /// Lifecycle stage: `form`, `processing`, or `complete`
    pub fn state(&self) -> String {
        match self.session.state() {
            LifecycleState::Form => "form",
            LifecycleState::Processing => "processing",
            LifecycleState::Complete => "complete",
        }
        .to_string()
    }

    /// The "you will be charged" value, `$`-prefixed
    pub fn display_amount(&self) -> String {
        self.session.display_amount()
    }

    /// Whether the recognized discount code is applied
    pub fn discount_applied(&self) -> bool {
        self.session.form().discount_applied()
    }

    /// Discount banner percentage ("35% off")
    pub fn savings_percent(&self) -> u32 {
        pricing::savings_percent()
    }

    /// Last four card digits for the completion summary
    pub fn card_last4(&self) -> String {
        self.session.form().card_last4()
    }

    /// Canonical transaction id, once a payment has settled
    pub fn transaction_id(&self) -> Option<String> {
        self.session
            .transaction_id()
            .map(|id| id.as_str().to_string())
    }

    /// Build one receipt dispatch attempt: the POST payload for
    /// `/api/send-receipt` plus the matching `mailto:` fallback link.
    /// Errors when the form has no email address (no network attempt
    /// should be made).
    pub fn prepare_receipt(&self) -> Result<JsValue, JsValue> {
        let order = self.session.receipt_order();
        if order.email.is_empty() {
            return Err(JsValue::from_str(
                "Please provide an email address to send the receipt to.",
            ));
        }

        let transaction_id = order
            .transaction_id
            .clone()
            .unwrap_or_else(TransactionId::generate);
        let date = receipt::human_timestamp();

        let bundle = ReceiptBundle {
            payload: ReceiptRequest::for_order(&order, &transaction_id, &date, true),
            compose_url: receipt::compose_fallback_url(&order, &transaction_id, &date),
            transaction_id,
        };
        to_js(&bundle)
    }
}

impl Default for WasmCheckout {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_field(name: &str) -> Result<Field, JsValue> {
    Field::parse(name).ok_or_else(|| JsValue::from_str(&format!("Unknown field: {}", name)))
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    // Plain JS objects (not Map instances), so callers can Object.keys() them
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    value
        .serialize(&serializer)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Log to browser console
#[wasm_bindgen]
pub fn log(message: &str) {
    web_sys::console::log_1(&JsValue::from_str(message));
}

/// Get library version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
