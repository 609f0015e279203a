use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{delete, post},
    Router,
};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::models::{CreateMenuItemRequest, CreateVenueRequest};
use crate::services::MenuService;

use super::api::service_error_to_response;

/// Shared state for admin handlers
#[derive(Clone)]
pub struct AdminState {
    pub menu_service: Arc<MenuService>,
}

/// Response for database seeding operations
#[derive(Debug, Serialize, Deserialize)]
pub struct SeedResponse {
    pub message: String,
    pub venues_created: usize,
    pub items_created: usize,
    pub timestamp: String,
}

/// Response for database cleanup operations
#[derive(Debug, Serialize, Deserialize)]
pub struct CleanupResponse {
    pub message: String,
    pub venues_deleted: usize,
    pub timestamp: String,
}

/// Create the admin router
pub fn create_admin_router(menu_service: Arc<MenuService>) -> Router {
    let state = AdminState { menu_service };

    Router::new()
        .route("/admin/venue", post(create_venue))
        .route("/admin/venue/:id", delete(delete_venue))
        .route("/admin/menu-item", post(create_menu_item))
        .route("/admin/menu-item/:venue_id/:item_id", delete(delete_menu_item))
        .route("/admin/seed", post(seed_database))
        .route("/admin/cleanup", post(cleanup_database))
        .with_state(state)
}

/// POST /admin/venue - create a venue
#[instrument(skip(state, request), fields(slug = %request.slug))]
async fn create_venue(
    State(state): State<AdminState>,
    Json(request): Json<CreateVenueRequest>,
) -> impl IntoResponse {
    match state.menu_service.create_venue(request).await {
        Ok(venue) => (StatusCode::CREATED, Json(venue)).into_response(),
        Err(e) => service_error_to_response(e),
    }
}

/// DELETE /admin/venue/:id - delete a venue and its menu
#[instrument(skip(state), fields(id = %id))]
async fn delete_venue(State(state): State<AdminState>, Path(id): Path<u64>) -> impl IntoResponse {
    match state.menu_service.delete_venue(id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "message": "Venue deleted",
                "timestamp": chrono::Utc::now().to_rfc3339()
            })),
        )
            .into_response(),
        Err(e) => service_error_to_response(e),
    }
}

/// POST /admin/menu-item - add a menu item to a venue
#[instrument(skip(state, request), fields(venue_id = %request.venue_id))]
async fn create_menu_item(
    State(state): State<AdminState>,
    Json(request): Json<CreateMenuItemRequest>,
) -> impl IntoResponse {
    let venue_id = request.venue_id;
    match state.menu_service.create_menu_item(venue_id, request).await {
        Ok(item) => (StatusCode::CREATED, Json(item)).into_response(),
        Err(e) => service_error_to_response(e),
    }
}

/// DELETE /admin/menu-item/:venue_id/:item_id - remove a menu item
#[instrument(skip(state), fields(venue_id = %venue_id, item_id = %item_id))]
async fn delete_menu_item(
    State(state): State<AdminState>,
    Path((venue_id, item_id)): Path<(u64, u64)>,
) -> impl IntoResponse {
    match state.menu_service.delete_menu_item(venue_id, item_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "message": "Menu item deleted",
                "timestamp": chrono::Utc::now().to_rfc3339()
            })),
        )
            .into_response(),
        Err(e) => service_error_to_response(e),
    }
}

/// POST /admin/seed - populate the store with a sample venue and menu
#[instrument(skip(state))]
async fn seed_database(State(state): State<AdminState>) -> impl IntoResponse {
    info!("Starting database seeding");

    let venue = match state.menu_service.create_venue(create_sample_venue()).await {
        Ok(venue) => venue,
        Err(e) => {
            error!("Failed to seed sample venue: {}", e);
            return service_error_to_response(e);
        }
    };

    let mut items_created = 0;
    for request in create_sample_menu(venue.id) {
        match state.menu_service.create_menu_item(venue.id, request).await {
            Ok(_) => items_created += 1,
            Err(e) => {
                error!("Failed to seed menu item: {}", e);
                return service_error_to_response(e);
            }
        }
    }

    info!("Seeded 1 venue with {} menu items", items_created);

    let response = SeedResponse {
        message: "Database seeded successfully".to_string(),
        venues_created: 1,
        items_created,
        timestamp: chrono::Utc::now().to_rfc3339(),
    };

    (StatusCode::CREATED, Json(response)).into_response()
}

/// POST /admin/cleanup - delete every venue
#[instrument(skip(state))]
async fn cleanup_database(State(state): State<AdminState>) -> impl IntoResponse {
    info!("Starting database cleanup");

    let venues = match state.menu_service.list_venues().await {
        Ok(venues) => venues,
        Err(e) => {
            error!("Failed to list venues for cleanup: {}", e);
            return service_error_to_response(e);
        }
    };

    let mut venues_deleted = 0;
    for venue in venues {
        match state.menu_service.delete_venue(venue.id).await {
            Ok(()) => venues_deleted += 1,
            Err(e) => {
                error!("Failed to delete venue {}: {}", venue.id, e);
                return service_error_to_response(e);
            }
        }
    }

    info!("Cleaned up {} venues", venues_deleted);

    let response = CleanupResponse {
        message: "Database cleaned up successfully".to_string(),
        venues_deleted,
        timestamp: chrono::Utc::now().to_rfc3339(),
    };

    (StatusCode::OK, Json(response)).into_response()
}

/// Sample venue matching the demo storefront
fn create_sample_venue() -> CreateVenueRequest {
    CreateVenueRequest {
        name: "Тестовое кафе".to_string(),
        slug: "test-cafe".to_string(),
        description: "Лучшее кафе в городе".to_string(),
        theme_color: "#FF6B6B".to_string(),
        telegram_chat_id: Some("@test_cafe_bot".to_string()),
    }
}

/// Sample menu for the demo venue
fn create_sample_menu(venue_id: u64) -> Vec<CreateMenuItemRequest> {
    vec![
        CreateMenuItemRequest {
            venue_id,
            name: "Капучино".to_string(),
            price: dec!(5.99),
            description: "Классический капучино с молочной пенкой".to_string(),
            category: "Напитки".to_string(),
            image_url: Some(
                "https://images.unsplash.com/photo-1572442388796-11668a67e53d?w=300".to_string(),
            ),
            is_available: true,
        },
        CreateMenuItemRequest {
            venue_id,
            name: "Пицца Маргарита".to_string(),
            price: dec!(12.99),
            description: "Традиционная пицца с томатами и моцареллой".to_string(),
            category: "Основные блюда".to_string(),
            image_url: Some(
                "https://images.unsplash.com/photo-1604382354936-07c5d9983bd3?w=300".to_string(),
            ),
            is_available: true,
        },
        CreateMenuItemRequest {
            venue_id,
            name: "Тирамису".to_string(),
            price: dec!(6.99),
            description: "Нежный итальянский десерт".to_string(),
            category: "Десерты".to_string(),
            image_url: Some(
                "https://images.unsplash.com/photo-1571877227200-a0d98ea607e9?w=300".to_string(),
            ),
            is_available: true,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::InMemoryVenueRepository;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn test_router() -> Router {
        let repository = Arc::new(InMemoryVenueRepository::new());
        let menu_service = Arc::new(MenuService::new(repository));
        create_admin_router(menu_service)
    }

    fn json_post(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_create_venue_returns_created() {
        let app = test_router();

        let response = app
            .oneshot(json_post(
                "/admin/venue",
                serde_json::json!({"name": "Кофейня", "slug": "coffee-house"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);

        let json = body_json(response).await;
        assert_eq!(json["id"], 1);
        assert_eq!(json["slug"], "coffee-house");
        assert_eq!(json["themeColor"], "#FF6B6B");
        assert_eq!(json["menuItems"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_create_venue_rejects_invalid_slug() {
        let app = test_router();

        let response = app
            .oneshot(json_post(
                "/admin/venue",
                serde_json::json!({"name": "Bad", "slug": "Not Valid"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_delete_venue_is_idempotent() {
        let app = test_router();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/admin/venue/42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["message"], "Venue deleted");
    }

    #[tokio::test]
    async fn test_create_menu_item_unknown_venue() {
        let app = test_router();

        let response = app
            .oneshot(json_post(
                "/admin/menu-item",
                serde_json::json!({"venue_id": 99, "name": "Эспрессо", "price": 3.50}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_seed_then_cleanup() {
        let app = test_router();

        let response = app
            .clone()
            .oneshot(json_post("/admin/seed", serde_json::json!({})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);

        let json = body_json(response).await;
        assert_eq!(json["venues_created"], 1);
        assert_eq!(json["items_created"], 3);

        let response = app
            .oneshot(json_post("/admin/cleanup", serde_json::json!({})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["venues_deleted"], 1);
    }
}
