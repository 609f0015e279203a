use axum::{http::StatusCode, response::Json};
use serde_json::{json, Value};
use tracing::instrument;

/// Health check endpoint
#[instrument]
pub async fn health_check() -> (StatusCode, Json<Value>) {
    let health_status = json!({
        "status": "healthy",
        "service": "noirqr-rs",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339()
    });

    (StatusCode::OK, Json(health_status))
}
