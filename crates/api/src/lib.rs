//! HTTP API server for the cargo shipping system.
//!
//! Exposes booking, routing and handling over REST, with structured logging
//! (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;
pub mod seed;
pub mod state;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use config::Config;
pub use state::{AppState, create_default_state};

/// Creates the Axum application router with all routes and shared state.
pub fn create_app(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/cargos", post(routes::cargos::book))
        .route("/cargos/unrouted", get(routes::cargos::list_unrouted))
        .route("/cargos/{id}", get(routes::cargos::get))
        .route("/cargos/{id}/routes", get(routes::cargos::route_candidates))
        .route("/cargos/{id}/route", post(routes::cargos::assign_route))
        .route("/cargos/{id}/handling", get(routes::cargos::handling_history))
        .route("/cargos/{id}/events", get(routes::cargos::events))
        .route("/handling/reports", post(routes::handling::submit))
        .route("/locations", get(routes::network::locations))
        .route("/voyages", get(routes::network::voyages))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
