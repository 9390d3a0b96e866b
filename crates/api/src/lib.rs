//! HTTP API server for the subscription service.
//!
//! Exposes subscription lifecycle endpoints with structured logging
//! (tracing), Prometheus metrics, and correlation-id propagation.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use metrics_exporter_prometheus::PrometheusHandle;
use orchestration::{CustomerProvisioning, EventSink};
use store::SubscriptionStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use config::Config;
use routes::subscriptions::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S, C, E>(state: Arc<AppState<S, C, E>>, metrics_handle: PrometheusHandle) -> Router
where
    S: SubscriptionStore + 'static,
    C: CustomerProvisioning + 'static,
    E: EventSink + 'static,
{
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/subscriptions", post(routes::subscriptions::create::<S, C, E>))
        .route("/subscriptions", get(routes::subscriptions::list::<S, C, E>))
        .route(
            "/subscriptions/{id}",
            get(routes::subscriptions::get::<S, C, E>),
        )
        .route(
            "/subscriptions/{id}/activate",
            post(routes::subscriptions::activate::<S, C, E>),
        )
        .with_state(state)
        .merge(metrics_router)
        .layer(axum::middleware::from_fn(middleware::correlation))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
