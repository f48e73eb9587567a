//! # checkout-api
//!
//! HTTP API layer for the FTUK checkout engine.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - The receipt-dispatch endpoint
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/api/send-receipt` | Dispatch a receipt email |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
