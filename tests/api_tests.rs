mod common;

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use common::{body_json, delete_request, get_request, json_post, test_app};

#[tokio::test]
async fn test_root_reports_running() {
    let app = test_app();

    let response = app.oneshot(get_request("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["message"], "NoirQR API is running");
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_health_status() {
    let app = test_app();

    let response = app.oneshot(get_request("/health/status")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "noirqr-rs");
}

#[tokio::test]
async fn test_venue_lifecycle() {
    let app = test_app();

    // Store starts empty
    let response = app.clone().oneshot(get_request("/venues")).await.unwrap();
    assert_eq!(body_json(response).await, json!([]));

    // Create a venue
    let response = app
        .clone()
        .oneshot(json_post(
            "/admin/venue",
            json!({
                "name": "Тестовое кафе",
                "slug": "test-cafe",
                "description": "Лучшее кафе в городе",
                "themeColor": "#FF6B6B",
                "telegramChatId": "@test_cafe_bot"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let venue = body_json(response).await;
    assert_eq!(venue["id"], 1);
    assert_eq!(venue["slug"], "test-cafe");
    assert_eq!(venue["themeColor"], "#FF6B6B");
    assert_eq!(venue["telegramChatId"], "@test_cafe_bot");
    assert_eq!(venue["menuItems"], json!([]));

    // Fetch it back by slug
    let response = app
        .clone()
        .oneshot(get_request("/venue/test-cafe"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["name"], "Тестовое кафе");

    // Delete and verify it is gone
    let response = app
        .clone()
        .oneshot(delete_request("/admin/venue/1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(get_request("/venue/test-cafe"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Deleting again is still a success
    let response = app
        .oneshot(delete_request("/admin/venue/1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_menu_item_lifecycle() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(json_post(
            "/admin/venue",
            json!({"name": "Тестовое кафе", "slug": "test-cafe"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // Add a menu item
    let response = app
        .clone()
        .oneshot(json_post(
            "/admin/menu-item",
            json!({
                "venue_id": 1,
                "name": "Капучино",
                "price": 5.99,
                "category": "Напитки"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let item = body_json(response).await;
    assert_eq!(item["id"], 1);
    assert_eq!(item["venue_id"], 1);
    assert_eq!(item["name"], "Капучино");
    assert_eq!(item["price"], 5.99);
    assert_eq!(item["isAvailable"], true);

    // Menu endpoint returns it
    let response = app
        .clone()
        .oneshot(get_request("/venue/test-cafe/menu"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let menu = body_json(response).await;
    assert_eq!(menu.as_array().unwrap().len(), 1);
    assert_eq!(menu[0]["name"], "Капучино");

    // Remove the item
    let response = app
        .clone()
        .oneshot(delete_request("/admin/menu-item/1/1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(get_request("/venue/test-cafe/menu"))
        .await
        .unwrap();
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn test_venue_ids_are_max_plus_one() {
    let app = test_app();

    for slug in ["first", "second"] {
        let response = app
            .clone()
            .oneshot(json_post(
                "/admin/venue",
                json!({"name": slug, "slug": slug}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    // Delete venue 2, next id reuses 2
    let response = app
        .clone()
        .oneshot(delete_request("/admin/venue/2"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(json_post(
            "/admin/venue",
            json!({"name": "third", "slug": "third"}),
        ))
        .await
        .unwrap();

    assert_eq!(body_json(response).await["id"], 2);
}

#[tokio::test]
async fn test_duplicate_slug_rejected() {
    let app = test_app();

    let request = json!({"name": "Кафе", "slug": "test-cafe"});

    let response = app
        .clone()
        .oneshot(json_post("/admin/venue", request.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(json_post("/admin/venue", request))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("already exists"));
}

#[tokio::test]
async fn test_menu_item_for_unknown_venue() {
    let app = test_app();

    let response = app
        .oneshot(json_post(
            "/admin/menu-item",
            json!({"venue_id": 99, "name": "Эспрессо", "price": 3.50}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_slug_returns_404() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(get_request("/venue/no-such-cafe"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .oneshot(get_request("/venue/no-such-cafe/menu"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_order_acknowledgement_is_constant() {
    let app = test_app();

    let response = app
        .oneshot(json_post(
            "/order",
            json!({
                "venue_id": 1,
                "items": [{"id": 1, "quantity": 2}],
                "table": 7
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Order received successfully");
    assert_eq!(body["order_id"], 12345);
    assert_eq!(body["status"], "processing");
}

#[tokio::test]
async fn test_seed_populates_sample_venue() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(json_post("/admin/seed", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(get_request("/venue/test-cafe/menu"))
        .await
        .unwrap();

    let menu = body_json(response).await;
    let names: Vec<&str> = menu
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Капучино", "Пицца Маргарита", "Тирамису"]);

    // Cleanup empties the store
    let response = app
        .clone()
        .oneshot(json_post("/admin/cleanup", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get_request("/venues")).await.unwrap();
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn test_validation_errors_return_400() {
    let app = test_app();

    // Empty name
    let response = app
        .clone()
        .oneshot(json_post("/admin/venue", json!({"name": "", "slug": "ok"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Slug with invalid characters
    let response = app
        .clone()
        .oneshot(json_post(
            "/admin/venue",
            json!({"name": "Кафе", "slug": "Bad Slug!"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Negative price
    let response = app
        .clone()
        .oneshot(json_post(
            "/admin/venue",
            json!({"name": "Кафе", "slug": "cafe"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(json_post(
            "/admin/menu-item",
            json!({"venue_id": 1, "name": "Кофе", "price": -1.0}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_security_headers_present() {
    let app = test_app();

    let response = app.oneshot(get_request("/venues")).await.unwrap();

    assert_eq!(response.headers()["X-Content-Type-Options"], "nosniff");
    assert_eq!(response.headers()["X-Frame-Options"], "DENY");
}

#[tokio::test]
async fn test_metrics_exposed() {
    let app = test_app();

    // Generate some traffic first
    let _ = app.clone().oneshot(get_request("/venues")).await.unwrap();

    let response = app.oneshot(get_request("/metrics")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains("http_requests_total"));
}
