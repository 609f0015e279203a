use axum::{body::Body, http::Request, middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use noirqr_rs::{
    handlers::{
        create_admin_router, create_api_router, health_check, metrics_handler,
        request_validation_middleware, security_headers_middleware,
    },
    observability::{observability_middleware, Metrics},
    repositories::InMemoryVenueRepository,
    services::MenuService,
};

/// Build the full application router with a fresh in-memory store,
/// composed the same way the binary composes it.
pub fn test_app() -> Router {
    let metrics = Arc::new(Metrics::new().unwrap());
    let metrics_for_middleware = metrics.clone();

    let repository = Arc::new(InMemoryVenueRepository::new());
    let menu_service = Arc::new(MenuService::new_with_metrics(repository, metrics.clone()));

    Router::new()
        .route("/health/status", get(health_check))
        .route("/metrics", get(metrics_handler))
        .with_state(metrics)
        .merge(create_api_router(menu_service.clone()))
        .merge(create_admin_router(menu_service))
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(|req, next| {
            request_validation_middleware(1024 * 1024, req, next)
        }))
        .layer(middleware::from_fn(move |req, next| {
            observability_middleware(metrics_for_middleware.clone(), req, next)
        }))
}

/// Build a GET request
pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

/// Build a JSON POST request
pub fn json_post(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Build a DELETE request
pub fn delete_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Read a response body as JSON
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
