//! # Request Handlers
//!
//! Axum request handlers for the receipt-dispatch endpoint. The wire
//! contract is strict: required fields produce the endpoint's own 400 body
//! when absent, non-POST methods get a JSON 405, and internal failures are
//! logged in full but reported only as a generic 500.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use checkout_core::ReceiptRequest;
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Receipt-dispatch request body.
///
/// The required fields are deliberately `Option` so a missing key reaches
/// the handler and yields the endpoint's `Missing fields` 400 rather than
/// an extractor rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendReceiptBody {
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub html: Option<String>,
    #[serde(default)]
    pub attach_pdf: bool,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub amount: Option<AmountValue>,
    #[serde(default)]
    pub transaction_id: Option<String>,
}

/// The `amount` field arrives as either a string or a number
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AmountValue {
    Text(String),
    Number(f64),
}

impl std::fmt::Display for AmountValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AmountValue::Text(s) => write!(f, "{}", s),
            AmountValue::Number(n) if n.fract() == 0.0 && n.is_finite() => {
                write!(f, "{}", *n as i64)
            }
            AmountValue::Number(n) => write!(f, "{}", n),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

fn missing_fields() -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorBody::new("Missing fields")),
    )
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "ftuk-checkout",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// JSON 405 for any non-POST method on the receipt endpoint
pub async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorBody::new("Method not allowed")),
    )
}

/// Dispatch a receipt email
#[instrument(skip(state, body))]
pub async fn send_receipt(
    State(state): State<AppState>,
    Json(body): Json<SendReceiptBody>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<ErrorBody>)> {
    let to = required(body.to).ok_or_else(missing_fields)?;
    let subject = required(body.subject).ok_or_else(missing_fields)?;
    let html = required(body.html).ok_or_else(missing_fields)?;

    let request = ReceiptRequest {
        to,
        subject,
        html,
        attach_pdf: body.attach_pdf,
        full_name: body.full_name,
        amount: body.amount.map(|a| a.to_string()),
        transaction_id: body.transaction_id.map(Into::into),
    };

    state.pipeline.deliver(&request).await.map_err(|e| {
        // Full cause stays server-side
        error!("send-receipt error: {}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody::new("Send failed")),
        )
    })?;

    info!("Receipt dispatched to {}", request.to);

    Ok(Json(serde_json::json!({ "ok": true })))
}

/// Treats an absent or empty wire field as missing
fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::create_router;
    use crate::state::AppConfig;
    use async_trait::async_trait;
    use axum_test::TestServer;
    use checkout_core::{CheckoutError, CheckoutResult, EmailMessage, MailTransport};
    use checkout_mail::ReceiptPipeline;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct StubTransport {
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    #[async_trait]
    impl MailTransport for StubTransport {
        async fn send(&self, _message: &EmailMessage) -> CheckoutResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(CheckoutError::Network("connection refused".into()))
            } else {
                Ok(())
            }
        }

        fn provider_name(&self) -> &'static str {
            "stub"
        }
    }

    fn test_server(fail: bool) -> (TestServer, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let transport = StubTransport {
            calls: calls.clone(),
            fail,
        };
        let config = AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            environment: "test".to_string(),
        };
        let pipeline = ReceiptPipeline::new(Arc::new(transport), "receipts@ftuk.com");
        let state = AppState::with_pipeline(config, pipeline);
        (
            TestServer::new(create_router(state)).expect("router"),
            calls,
        )
    }

    fn valid_body() -> serde_json::Value {
        serde_json::json!({
            "to": "jane@example.com",
            "subject": "FTUK Payment Receipt",
            "html": "<p>receipt</p>",
            "attachPdf": false,
        })
    }

    #[tokio::test]
    async fn test_post_dispatches_and_reports_ok() {
        let (server, calls) = test_server(false);

        let response = server.post("/api/send-receipt").json(&valid_body()).await;

        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(
            response.json::<serde_json::Value>(),
            serde_json::json!({ "ok": true })
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_missing_html_is_400() {
        let (server, calls) = test_server(false);

        let mut body = valid_body();
        body.as_object_mut().unwrap().remove("html");
        let response = server.post("/api/send-receipt").json(&body).await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json::<serde_json::Value>(),
            serde_json::json!({ "error": "Missing fields" })
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_to_is_400() {
        let (server, _calls) = test_server(false);

        let mut body = valid_body();
        body["to"] = serde_json::json!("");
        let response = server.post("/api/send-receipt").json(&body).await;

        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_is_405_with_json_body() {
        let (server, _calls) = test_server(false);

        let response = server.get("/api/send-receipt").await;

        assert_eq!(response.status_code(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(
            response.json::<serde_json::Value>(),
            serde_json::json!({ "error": "Method not allowed" })
        );
    }

    #[tokio::test]
    async fn test_transport_failure_is_generic_500() {
        let (server, calls) = test_server(true);

        let response = server.post("/api/send-receipt").json(&valid_body()).await;

        assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.json::<serde_json::Value>(),
            serde_json::json!({ "error": "Send failed" })
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_numeric_amount_accepted() {
        let (server, _calls) = test_server(false);

        let mut body = valid_body();
        body["attachPdf"] = serde_json::json!(true);
        body["amount"] = serde_json::json!(974);
        body["fullName"] = serde_json::json!("Jane Q. Trader");
        body["transactionId"] = serde_json::json!("FTUK-ABC1234");

        let response = server.post("/api/send-receipt").json(&body).await;
        assert_eq!(response.status_code(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health() {
        let (server, _calls) = test_server(false);

        let response = server.get("/health").await;
        assert_eq!(response.status_code(), StatusCode::OK);
        assert_eq!(response.json::<serde_json::Value>()["status"], "healthy");
    }

    #[test]
    fn test_amount_value_display() {
        assert_eq!(AmountValue::Text("974".into()).to_string(), "974");
        assert_eq!(AmountValue::Number(974.0).to_string(), "974");
        assert_eq!(AmountValue::Number(9.5).to_string(), "9.5");
    }
}
