use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde_json::json;
use std::sync::Arc;
use tracing::instrument;

use crate::models::{OrderPayload, ServiceError};
use crate::services::MenuService;

/// Shared state for public API handlers
#[derive(Clone)]
pub struct ApiState {
    pub menu_service: Arc<MenuService>,
}

/// Create the public API router
pub fn create_api_router(menu_service: Arc<MenuService>) -> Router {
    let state = ApiState { menu_service };

    Router::new()
        .route("/", get(read_root))
        .route("/venues", get(list_venues))
        .route("/venue/:slug", get(get_venue))
        .route("/venue/:slug/menu", get(get_menu))
        .route("/order", post(submit_order))
        .with_state(state)
}

/// Root endpoint reporting that the API is up
#[instrument]
async fn read_root() -> impl IntoResponse {
    Json(json!({
        "message": "NoirQR API is running",
        "status": "ok"
    }))
}

/// GET /venues - list all venues with their menus
#[instrument(skip(state))]
async fn list_venues(State(state): State<ApiState>) -> impl IntoResponse {
    match state.menu_service.list_venues().await {
        Ok(venues) => (StatusCode::OK, Json(venues)).into_response(),
        Err(e) => service_error_to_response(e),
    }
}

/// GET /venue/:slug - fetch a single venue
#[instrument(skip(state), fields(slug = %slug))]
async fn get_venue(State(state): State<ApiState>, Path(slug): Path<String>) -> impl IntoResponse {
    match state.menu_service.get_venue(&slug).await {
        Ok(venue) => (StatusCode::OK, Json(venue)).into_response(),
        Err(e) => service_error_to_response(e),
    }
}

/// GET /venue/:slug/menu - fetch a venue's menu items
#[instrument(skip(state), fields(slug = %slug))]
async fn get_menu(State(state): State<ApiState>, Path(slug): Path<String>) -> impl IntoResponse {
    match state.menu_service.get_menu(&slug).await {
        Ok(items) => (StatusCode::OK, Json(items)).into_response(),
        Err(e) => service_error_to_response(e),
    }
}

/// POST /order - acknowledge an order submission
#[instrument(skip(state, payload))]
async fn submit_order(
    State(state): State<ApiState>,
    Json(payload): Json<OrderPayload>,
) -> impl IntoResponse {
    match state.menu_service.submit_order(payload).await {
        Ok(ack) => (StatusCode::OK, Json(ack)).into_response(),
        Err(e) => service_error_to_response(e),
    }
}

/// Convert service errors to HTTP responses
pub(crate) fn service_error_to_response(error: ServiceError) -> axum::response::Response {
    let (status, message) = match &error {
        ServiceError::VenueNotFound { .. } | ServiceError::VenueIdNotFound { .. } => {
            (StatusCode::NOT_FOUND, error.to_string())
        }
        ServiceError::ValidationError { message } => (StatusCode::BAD_REQUEST, message.clone()),
        ServiceError::Repository { .. } => {
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
        }
    };

    let body = Json(json!({
        "error": message,
        "timestamp": chrono::Utc::now().to_rfc3339()
    }));

    (status, body).into_response()
}
