//! # Routes
//!
//! Axum router configuration for the checkout API.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - GET  /health            - Health check
/// - POST /api/send-receipt  - Dispatch a receipt email
///   (any other method on that path: JSON 405)
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - the checkout page may be served from anywhere
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new().route(
        "/send-receipt",
        post(handlers::send_receipt).fallback(handlers::method_not_allowed),
    );

    Router::new()
        // Health check at root
        .route("/health", get(handlers::health))
        .route("/", get(handlers::health))
        // API
        .nest("/api", api_routes)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        // State
        .with_state(state)
}
