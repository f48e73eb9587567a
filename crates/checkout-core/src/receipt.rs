//! # Receipt Types
//!
//! Transaction identifiers, the receipt wire payload, the outbound email
//! message model, the `MailTransport` seam, and the local mail-compose
//! fallback. The pipeline that drives these lives in `checkout-mail`; this
//! module is the shared vocabulary.

use crate::error::CheckoutResult;
use async_trait::async_trait;
use chrono::Local;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Prefix for every transaction identifier
pub const TRANSACTION_ID_PREFIX: &str = "FTUK-";

/// Length of the random suffix
const TRANSACTION_ID_SUFFIX_LEN: usize = 7;

/// Fixed subject line for receipt emails
pub const RECEIPT_SUBJECT: &str = "FTUK Payment Receipt";

/// Fixed filename for the attached receipt document
pub const RECEIPT_FILENAME: &str = "ftuk-receipt.pdf";

/// MIME type of the attached receipt document
pub const RECEIPT_MIME_TYPE: &str = "application/pdf";

/// Percent-encoding set equivalent to JS `encodeURIComponent`
/// (everything but ASCII alphanumerics and `-_.!~*'()`)
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const BASE36: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// A display-only payment reference: `FTUK-` plus 7 random base-36
/// characters, upper-cased. Not a key into any store.
///
/// One id is generated per completed order (at settle) and every consumer
/// (lifecycle display, receipt email, receipt document, fallback link)
/// reads that single value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    /// Generate a fresh random id
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let mut id = String::with_capacity(TRANSACTION_ID_PREFIX.len() + TRANSACTION_ID_SUFFIX_LEN);
        id.push_str(TRANSACTION_ID_PREFIX);
        for _ in 0..TRANSACTION_ID_SUFFIX_LEN {
            id.push(BASE36[rng.gen_range(0..BASE36.len())] as char);
        }
        TransactionId(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for TransactionId {
    fn from(value: String) -> Self {
        TransactionId(value)
    }
}

/// Snapshot of the order data a receipt is issued for. Taken from the
/// checkout session in any lifecycle state; the pipeline never looks back
/// at the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptOrder {
    /// Customer name (may be empty; templates substitute a fallback)
    pub full_name: String,

    /// Recipient address; empty means the receipt cannot be dispatched
    pub email: String,

    /// Amount string from the single pricing source of truth
    pub amount: String,

    /// Canonical id from a settled payment, if one exists yet
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<TransactionId>,
}

/// The receipt-dispatch wire payload (the endpoint's request body).
/// Constructed fresh for every dispatch attempt; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptRequest {
    /// Recipient address
    pub to: String,

    /// Subject line
    pub subject: String,

    /// Templated HTML body
    pub html: String,

    /// Whether to render and attach the receipt document
    #[serde(default)]
    pub attach_pdf: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<TransactionId>,
}

impl ReceiptRequest {
    /// Build the payload for an order, with the resolved transaction id and
    /// a pre-rendered timestamp so body, document, and fallback all carry
    /// the same values.
    pub fn for_order(
        order: &ReceiptOrder,
        transaction_id: &TransactionId,
        date: &str,
        attach_pdf: bool,
    ) -> Self {
        Self {
            to: order.email.clone(),
            subject: RECEIPT_SUBJECT.to_string(),
            html: receipt_html(&order.full_name, &order.amount, transaction_id, date),
            attach_pdf,
            full_name: Some(order.full_name.clone()),
            amount: Some(order.amount.clone()),
            transaction_id: Some(transaction_id.clone()),
        }
    }
}

/// An outbound email, ready for a transport
#[derive(Debug, Clone, Serialize)]
pub struct EmailMessage {
    pub to: String,
    /// Process-wide configured sender address
    pub from: String,
    pub subject: String,
    pub html: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

/// A base64-encoded attachment
#[derive(Debug, Clone, Serialize)]
pub struct Attachment {
    /// Base64-encoded content
    pub content: String,
    pub filename: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub disposition: String,
}

impl Attachment {
    /// The receipt document attachment, from already-encoded content
    pub fn receipt_pdf(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            filename: RECEIPT_FILENAME.to_string(),
            mime_type: RECEIPT_MIME_TYPE.to_string(),
            disposition: "attachment".to_string(),
        }
    }
}

/// Seam for outbound transactional email delivery.
///
/// Implementations own the provider credential; callers never read ambient
/// global state. The one production implementation is the SendGrid
/// transport in `checkout-mail`.
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Hand a message to the delivery service
    async fn send(&self, message: &EmailMessage) -> CheckoutResult<()>;

    /// Provider name (for logging)
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared, dynamically-dispatched transport
pub type BoxedMailTransport = Arc<dyn MailTransport>;

/// Templated HTML receipt body. An empty name falls back to "trader".
pub fn receipt_html(full_name: &str, amount: &str, id: &TransactionId, date: &str) -> String {
    let name = if full_name.is_empty() { "trader" } else { full_name };
    format!(
        r#"<div style="font-family: Inter, Arial, sans-serif; color:#0b131a;">
  <h2>FTUK — Payment Receipt</h2>
  <p>Thank you {name} for your payment.</p>
  <ul>
    <li>Amount: ${amount}</li>
    <li>Transaction ID: {id}</li>
    <li>Date: {date}</li>
  </ul>
</div>"#
    )
}

/// Build the local mail-compose fallback link for an order: a `mailto:` URI
/// with percent-encoded recipient, subject, and a plain-text summary
/// carrying the same name, amount, id, and date as the failed dispatch.
pub fn compose_fallback_url(order: &ReceiptOrder, id: &TransactionId, date: &str) -> String {
    let name = if order.full_name.is_empty() {
        "trader"
    } else {
        &order.full_name
    };
    let body = format!(
        "Thank you {} for your payment of ${}.\nTransaction ID: {}\nDate: {}",
        name, order.amount, id, date
    );
    format!(
        "mailto:{}?subject={}&body={}",
        utf8_percent_encode(&order.email, URI_COMPONENT),
        utf8_percent_encode(RECEIPT_SUBJECT, URI_COMPONENT),
        utf8_percent_encode(&body, URI_COMPONENT),
    )
}

/// Current time in a human-readable local format, for receipt display
pub fn human_timestamp() -> String {
    Local::now().format("%c").to_string()
}
