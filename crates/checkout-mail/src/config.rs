//! # Mail Configuration
//!
//! Configuration for the SendGrid transport. The credential and sender
//! address are read once at process start and immutable afterwards;
//! absence is a startup error, never a per-request one.

use checkout_core::CheckoutError;
use std::env;

/// SendGrid API configuration
#[derive(Debug, Clone)]
pub struct MailConfig {
    /// API key (SG....)
    pub api_key: String,

    /// Sender address for every outbound receipt
    pub sender: String,

    /// API base URL (for testing/mocking)
    pub api_base_url: String,
}

impl MailConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `SENDGRID_API_KEY`
    /// - `SENDER_EMAIL`
    pub fn from_env() -> Result<Self, CheckoutError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let api_key = env::var("SENDGRID_API_KEY")
            .map_err(|_| CheckoutError::Configuration("SENDGRID_API_KEY not set".to_string()))?;

        let sender = env::var("SENDER_EMAIL")
            .map_err(|_| CheckoutError::Configuration("SENDER_EMAIL not set".to_string()))?;

        if !api_key.starts_with("SG.") {
            return Err(CheckoutError::Configuration(
                "SENDGRID_API_KEY must start with SG.".to_string(),
            ));
        }

        if sender.trim().is_empty() {
            return Err(CheckoutError::Configuration(
                "SENDER_EMAIL must not be empty".to_string(),
            ));
        }

        Ok(Self {
            api_key,
            sender,
            api_base_url: "https://api.sendgrid.com".to_string(),
        })
    }

    /// Create config with explicit values (for testing)
    pub fn new(api_key: impl Into<String>, sender: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            sender: sender.into(),
            api_base_url: "https://api.sendgrid.com".to_string(),
        }
    }

    /// Get authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.api_key)
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_config() {
        let config = MailConfig::new("SG.abc123", "receipts@ftuk.com");
        assert_eq!(config.auth_header(), "Bearer SG.abc123");
        assert_eq!(config.api_base_url, "https://api.sendgrid.com");
    }

    #[test]
    fn test_base_url_override() {
        let config =
            MailConfig::new("SG.abc123", "receipts@ftuk.com").with_api_base_url("http://localhost:9999");
        assert_eq!(config.api_base_url, "http://localhost:9999");
    }

    #[test]
    fn test_from_env_missing_key() {
        env::remove_var("SENDGRID_API_KEY");

        let result = MailConfig::from_env();
        assert!(result.is_err());
    }
}
