//! # Checkout Error Types
//!
//! Typed error handling for the checkout engine.
//! All fallible checkout operations return `Result<T, CheckoutError>`.

use thiserror::Error;

/// Core error type for checkout and receipt operations
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Configuration errors (missing env vars, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Receipt requested without a recipient email address
    #[error("No recipient email address on the order")]
    MissingRecipient,

    /// Outbound mail provider rejected the message
    #[error("Transport error [{provider}]: {message}")]
    Transport { provider: String, message: String },

    /// Network/HTTP error communicating with the mail provider
    #[error("Network error: {0}")]
    Network(String),

    /// Receipt document rendering failed
    #[error("Document render error: {0}")]
    Render(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CheckoutError {
    /// Returns true if this error occurred while trying to hand the receipt
    /// to the outbound delivery path. These are the errors the pipeline
    /// recovers from with the local mail-compose fallback instead of
    /// surfacing to the user.
    pub fn is_transport_failure(&self) -> bool {
        matches!(
            self,
            CheckoutError::Transport { .. }
                | CheckoutError::Network(_)
                | CheckoutError::Render(_)
        )
    }

    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            CheckoutError::Configuration(_) => 500,
            CheckoutError::InvalidRequest(_) => 400,
            CheckoutError::MissingRecipient => 400,
            CheckoutError::Transport { .. } => 502,
            CheckoutError::Network(_) => 503,
            CheckoutError::Render(_) => 500,
            CheckoutError::Serialization(_) => 500,
            CheckoutError::Internal(_) => 500,
        }
    }
}

/// Result type alias for checkout operations
pub type CheckoutResult<T> = Result<T, CheckoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_failures() {
        assert!(CheckoutError::Network("timeout".into()).is_transport_failure());
        assert!(CheckoutError::Transport {
            provider: "sendgrid".into(),
            message: "rejected".into()
        }
        .is_transport_failure());
        assert!(CheckoutError::Render("font missing".into()).is_transport_failure());
        assert!(!CheckoutError::MissingRecipient.is_transport_failure());
        assert!(!CheckoutError::InvalidRequest("bad data".into()).is_transport_failure());
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            CheckoutError::InvalidRequest("test".into()).status_code(),
            400
        );
        assert_eq!(CheckoutError::MissingRecipient.status_code(), 400);
        assert_eq!(
            CheckoutError::Transport {
                provider: "sendgrid".into(),
                message: "x".into()
            }
            .status_code(),
            502
        );
        assert_eq!(CheckoutError::Internal("x".into()).status_code(), 500);
    }
}
