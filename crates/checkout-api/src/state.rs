//! # Application State
//!
//! Shared state for the Axum application: startup configuration and the
//! receipt pipeline. Mail credential and sender are resolved here, once,
//! at process start; a missing variable fails the boot, never a request.

use checkout_mail::ReceiptPipeline;
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> std::net::SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .expect("Invalid socket address")
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Receipt delivery pipeline
    pub pipeline: Arc<ReceiptPipeline>,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create a new AppState with the SendGrid transport from environment
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();

        let pipeline = ReceiptPipeline::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize mail transport: {}", e))?;

        Ok(Self {
            pipeline: Arc::new(pipeline),
            config,
        })
    }

    /// Create state around an existing pipeline (tests, embedded use)
    pub fn with_pipeline(config: AppConfig, pipeline: ReceiptPipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            config,
        }
    }
}
