//! # SendGrid Transport
//!
//! `MailTransport` implementation over the SendGrid v3 Mail Send API.
//! This is the one place in the workspace that talks to the delivery
//! service; everything upstream sees only the trait.

use crate::config::MailConfig;
use async_trait::async_trait;
use checkout_core::{CheckoutError, CheckoutResult, EmailMessage, MailTransport};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

/// SendGrid mail transport
pub struct SendGridTransport {
    config: MailConfig,
    client: Client,
}

impl SendGridTransport {
    /// Create a new SendGrid transport
    pub fn new(config: MailConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Create from environment variables
    pub fn from_env() -> CheckoutResult<Self> {
        let config = MailConfig::from_env()?;
        Ok(Self::new(config))
    }

    /// The configured sender address
    pub fn sender(&self) -> &str {
        &self.config.sender
    }

    fn build_payload<'a>(message: &'a EmailMessage) -> SgMailSend<'a> {
        SgMailSend {
            personalizations: vec![SgPersonalization {
                to: vec![SgAddress { email: &message.to }],
            }],
            from: SgAddress {
                email: &message.from,
            },
            subject: &message.subject,
            content: vec![SgContent {
                content_type: "text/html",
                value: &message.html,
            }],
            attachments: message
                .attachments
                .iter()
                .map(|a| SgAttachment {
                    content: &a.content,
                    filename: &a.filename,
                    attachment_type: &a.mime_type,
                    disposition: &a.disposition,
                })
                .collect(),
        }
    }
}

#[async_trait]
impl MailTransport for SendGridTransport {
    #[instrument(skip(self, message), fields(to = %message.to))]
    async fn send(&self, message: &EmailMessage) -> CheckoutResult<()> {
        let payload = Self::build_payload(message);

        debug!(
            "Dispatching mail: subject={:?}, attachments={}",
            message.subject,
            message.attachments.len()
        );

        let url = format!("{}/v3/mail/send", self.config.api_base_url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.config.auth_header())
            .json(&payload)
            .send()
            .await
            .map_err(|e| CheckoutError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            debug!("Mail accepted: status={}", status);
            return Ok(());
        }

        let body = response
            .text()
            .await
            .map_err(|e| CheckoutError::Network(e.to_string()))?;

        error!("SendGrid API error: status={}, body={}", status, body);

        // Parse the SendGrid error body for a usable message
        if let Ok(error_response) = serde_json::from_str::<SgErrorResponse>(&body) {
            if let Some(first) = error_response.errors.into_iter().next() {
                return Err(CheckoutError::Transport {
                    provider: "sendgrid".to_string(),
                    message: first.message,
                });
            }
        }

        Err(CheckoutError::Transport {
            provider: "sendgrid".to_string(),
            message: format!("HTTP {}: {}", status, body),
        })
    }

    fn provider_name(&self) -> &'static str {
        "sendgrid"
    }
}

// =============================================================================
// SendGrid API Types
// =============================================================================

#[derive(Debug, Serialize)]
struct SgMailSend<'a> {
    personalizations: Vec<SgPersonalization<'a>>,
    from: SgAddress<'a>,
    subject: &'a str,
    content: Vec<SgContent<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    attachments: Vec<SgAttachment<'a>>,
}

#[derive(Debug, Serialize)]
struct SgPersonalization<'a> {
    to: Vec<SgAddress<'a>>,
}

#[derive(Debug, Serialize)]
struct SgAddress<'a> {
    email: &'a str,
}

#[derive(Debug, Serialize)]
struct SgContent<'a> {
    #[serde(rename = "type")]
    content_type: &'static str,
    value: &'a str,
}

#[derive(Debug, Serialize)]
struct SgAttachment<'a> {
    content: &'a str,
    filename: &'a str,
    #[serde(rename = "type")]
    attachment_type: &'a str,
    disposition: &'a str,
}

#[derive(Debug, Deserialize)]
struct SgErrorResponse {
    errors: Vec<SgError>,
}

#[derive(Debug, Deserialize)]
struct SgError {
    message: String,
}
