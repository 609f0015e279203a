use axum::{middleware, routing::get, Router};
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use noirqr_rs::{
    handlers::{
        create_admin_router, create_api_router, health_check, metrics_handler,
        request_validation_middleware, security_headers_middleware,
    },
    init_observability,
    observability::{observability_middleware, Metrics},
    repositories::InMemoryVenueRepository,
    services::MenuService,
    Config,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration first (basic logging only)
    let config = Config::from_environment()?;
    println!("Configuration loaded successfully");

    init_observability(
        &config.observability.service_name,
        config.observability.enable_json_logging,
    )?;

    info!("Starting noirqr-rs service");
    info!(
        "Service: {} v{}",
        config.observability.service_name, config.observability.service_version
    );

    let metrics = Arc::new(Metrics::new()?);
    info!("Metrics initialized successfully");

    let venue_repository = Arc::new(InMemoryVenueRepository::new());
    info!("Repositories initialized successfully");

    let menu_service = Arc::new(MenuService::new_with_metrics(
        venue_repository,
        metrics.clone(),
    ));
    info!("Services initialized successfully");

    let app = create_app(metrics, menu_service, config.server.max_request_size);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Server listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;

    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install CTRL+C signal handler: {}", e);
        }
        info!("Shutdown signal received");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

fn create_app(
    metrics: Arc<Metrics>,
    menu_service: Arc<MenuService>,
    max_request_size: usize,
) -> Router {
    let metrics_for_middleware = metrics.clone();

    Router::new()
        // Health and metrics endpoints (with metrics state)
        .route("/health/status", get(health_check))
        .route("/metrics", get(metrics_handler))
        .with_state(metrics)
        // Public storefront endpoints
        .merge(create_api_router(menu_service.clone()))
        // Admin endpoints
        .merge(create_admin_router(menu_service))
        // Add middleware layers (order matters - outer to inner)
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(move |req, next| {
            request_validation_middleware(max_request_size, req, next)
        }))
        .layer(middleware::from_fn(move |req, next| {
            observability_middleware(metrics_for_middleware.clone(), req, next)
        }))
}
