//! # Receipt Pipeline
//!
//! The generate → render → dispatch → fallback sequence. Independent of the
//! checkout lifecycle: callers hand in an order snapshot and get back either
//! `Sent` or a local mail-compose fallback link. The only error that
//! escapes is `MissingRecipient`, a precondition failure checked before
//! any work is done.

use crate::document::render_receipt_attachment;
use crate::transport::SendGridTransport;
use checkout_core::{
    receipt, Attachment, BoxedMailTransport, CheckoutError, CheckoutResult, EmailMessage,
    ReceiptOrder, ReceiptRequest, TransactionId,
};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Outcome of a receipt request. Both variants are success from the user's
/// point of view: either the email went out, or they were handed a compose
/// link to send it themselves.
#[derive(Debug, Clone)]
pub enum ReceiptOutcome {
    /// Dispatched through the transactional transport
    Sent { transaction_id: TransactionId },
    /// Dispatch failed; the user gets a pre-filled `mailto:` link instead
    Fallback {
        transaction_id: TransactionId,
        compose_url: String,
    },
}

/// Receipt generation and delivery
pub struct ReceiptPipeline {
    transport: BoxedMailTransport,
    sender: String,
}

impl ReceiptPipeline {
    /// Create a pipeline over any transport
    pub fn new(transport: BoxedMailTransport, sender: impl Into<String>) -> Self {
        Self {
            transport,
            sender: sender.into(),
        }
    }

    /// Create with the SendGrid transport configured from the environment
    pub fn from_env() -> CheckoutResult<Self> {
        let transport = SendGridTransport::from_env()?;
        let sender = transport.sender().to_string();
        Ok(Self::new(Arc::new(transport), sender))
    }

    /// The configured sender address
    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// Full receipt operation for an order snapshot.
    ///
    /// Resolves one transaction id (the order's canonical id when it has
    /// one) and threads it through the email body, the document, and, if
    /// dispatch fails, the fallback link, so a single request can never
    /// show two ids. Transport, network, and render failures are absorbed
    /// into the fallback; they never reach the caller as errors.
    #[instrument(skip(self, order), fields(has_recipient = !order.email.is_empty()))]
    pub async fn request_receipt(&self, order: &ReceiptOrder) -> CheckoutResult<ReceiptOutcome> {
        if order.email.is_empty() {
            return Err(CheckoutError::MissingRecipient);
        }

        let transaction_id = order
            .transaction_id
            .clone()
            .unwrap_or_else(TransactionId::generate);
        let date = receipt::human_timestamp();

        let request = ReceiptRequest::for_order(order, &transaction_id, &date, true);

        match self.deliver(&request).await {
            Ok(()) => {
                info!("Receipt dispatched: id={}", transaction_id);
                Ok(ReceiptOutcome::Sent { transaction_id })
            }
            Err(err) => {
                warn!("Receipt dispatch failed, falling back to compose link: {err}");
                let compose_url = receipt::compose_fallback_url(order, &transaction_id, &date);
                Ok(ReceiptOutcome::Fallback {
                    transaction_id,
                    compose_url,
                })
            }
        }
    }

    /// The dispatch leg: build the email from a wire payload, render and
    /// attach the document when requested, and hand it to the transport.
    /// This is what the HTTP endpoint runs.
    #[instrument(skip(self, request), fields(to = %request.to, attach = request.attach_pdf))]
    pub async fn deliver(&self, request: &ReceiptRequest) -> CheckoutResult<()> {
        let mut message = EmailMessage {
            to: request.to.clone(),
            from: self.sender.clone(),
            subject: request.subject.clone(),
            html: request.html.clone(),
            attachments: Vec::new(),
        };

        if request.attach_pdf {
            let transaction_id = request
                .transaction_id
                .clone()
                .unwrap_or_else(TransactionId::generate);
            let name = request.full_name.as_deref().unwrap_or("Customer");
            let amount = request.amount.as_deref().unwrap_or("0");
            let date = receipt::human_timestamp();

            let content = render_receipt_attachment(name, amount, &transaction_id, &date)?;
            message.attachments.push(Attachment::receipt_pdf(content));
        }

        self.transport.send(&message).await
    }
}
