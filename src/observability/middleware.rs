use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use std::{sync::Arc, time::Instant};
use tracing::{error, info, instrument};

use super::Metrics;

/// Middleware for automatic request tracing and metrics collection
#[instrument(skip_all, fields(
    method = %request.method(),
    uri = %request.uri(),
))]
pub async fn observability_middleware(
    metrics: Arc<Metrics>,
    request: Request,
    next: Next,
) -> Response {
    let start_time = Instant::now();
    let method = request.method().to_string();
    let uri = request.uri().to_string();

    // Prefer the matched route pattern so path parameters do not explode
    // the label cardinality
    let endpoint = request
        .extensions()
        .get::<MatchedPath>()
        .map(|matched_path| matched_path.as_str().to_string())
        .unwrap_or_else(|| uri.clone());

    metrics.increment_in_flight(&method, &endpoint);

    info!("Processing request");

    let response = next.run(request).await;

    let duration = start_time.elapsed();
    let status_code = response.status().as_u16();

    metrics.record_http_request(&method, &endpoint, status_code, duration.as_secs_f64());
    metrics.decrement_in_flight(&method, &endpoint);

    if status_code >= 400 {
        error!(
            status_code = status_code,
            duration_ms = duration.as_millis(),
            "Request completed with error"
        );
    } else {
        info!(
            status_code = status_code,
            duration_ms = duration.as_millis(),
            "Request completed successfully"
        );
    }

    response
}
