//! # FTUK Checkout
//!
//! Receipt dispatch service for the FTUK checkout.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export SENDGRID_API_KEY=SG....
//! export SENDER_EMAIL=receipts@ftuk.com
//!
//! # Run the server
//! ftuk-checkout
//! ```

use checkout_api::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Print banner
    print_banner();

    // Initialize application state (fails fast when mail env is missing)
    let state = AppState::new()?;

    let addr = state.config.socket_addr();
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!("Sender address: {}", state.pipeline.sender());

    // Create router
    let app = routes::create_router(state);

    // Start server
    info!("FTUK checkout starting on http://{}", addr);

    if !is_prod {
        info!("Health: http://{}/health", addr);
        info!("Receipts: POST http://{}/api/send-receipt", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn print_banner() {
    println!(
        r#"
  FTUK Checkout
  ━━━━━━━━━━━━━
  Receipt dispatch service
  Version: {}

"#,
        env!("CARGO_PKG_VERSION")
    );
}
