//! Lords of Esport payments service binary.
//!
//! Loads and validates configuration, wires the Square gateway into the
//! HTTP surface, and serves the payments API.

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::routing::get;
use axum::{Json, Router};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use lords_payments::adapters::http::{api_router, PaymentsAppState};
use lords_payments::adapters::square::SquareGateway;
use lords_payments::config::AppConfig;

#[tokio::main]
async fn main() {
    let config = AppConfig::load().expect("Failed to load configuration");

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level)),
        )
        .init();

    // Fail fast on misconfiguration instead of at the first charge
    config.validate().expect("Invalid configuration");

    tracing::info!(
        environment = ?config.server.environment,
        sandbox = config.payment.is_sandbox(),
        "Starting payments service"
    );

    let gateway = Arc::new(SquareGateway::new(config.payment.clone()));
    let state = PaymentsAppState::new(gateway);

    let cors_origins = config.server.cors_origins_list();
    let cors = if cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(tower_http::cors::Any)
            .allow_methods(tower_http::cors::Any)
            .allow_headers(tower_http::cors::Any)
    } else {
        let origins: Vec<HeaderValue> = cors_origins
            .iter()
            .map(|origin| origin.parse().expect("Invalid CORS origin"))
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(tower_http::cors::Any)
            .allow_headers(tower_http::cors::Any)
    };

    let app = Router::new()
        .route("/api/health", get(health))
        .nest("/api", api_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    let addr = config.server.socket_addr();
    tracing::info!("Payments service listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind");

    axum::serve(listener, app)
        .await
        .expect("Server failed to start");
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "payments",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
