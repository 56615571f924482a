//! Congregate aggregation gateway.
//!
//! A server-side aggregation layer in front of the Planning Center Online
//! REST API: simplified client queries in, denormalized paginated JSON out.

mod config;
mod logging;

use std::net::SocketAddr;

use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::{Json, Router};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use congregate_api::{api_router, AppState};
use congregate_pco::PcoClient;

use config::Config;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(error) => {
            eprintln!("Error: {error}");
            std::process::exit(1);
        }
    };

    logging::init_logging(&config.rust_log);

    let pco = match PcoClient::new(
        config.app_id.clone(),
        config.secret.clone(),
        config.events_per_page,
    ) {
        Ok(client) => client,
        Err(error) => {
            eprintln!("Error: {error}");
            std::process::exit(1);
        }
    };

    let app = Router::new()
        .route("/health", get(health))
        .merge(api_router(AppState { pco }))
        .layer(build_cors(&config.allowed_origins))
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(error) => {
            eprintln!("Failed to bind {addr}: {error}");
            std::process::exit(1);
        }
    };

    info!(%addr, events_per_page = config.events_per_page, "server listening");

    if let Err(error) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        eprintln!("Server error: {error}");
        std::process::exit(1);
    }
}

/// Liveness probe.
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

fn build_cors(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET])
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %error, "failed to install shutdown signal handler");
    }
    info!("shutdown signal received");
}
