//! API server entry point.

use std::sync::Arc;

use api::Config;
use api::routes::subscriptions::AppState;
use orchestration::{
    HttpCustomerClient, InstrumentedService, LoggingEventSink, SubscriptionService,
};
use store::{InMemorySubscriptionStore, PostgresSubscriptionStore};
use tokio::signal;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Waits for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("received SIGINT, starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("received SIGTERM, starting graceful shutdown");
        }
    }
}

async fn serve(app: axum::Router, addr: &str) {
    tracing::info!(%addr, "starting API server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind address");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    tracing::info!("server shut down gracefully");
}

#[tokio::main]
async fn main() {
    let config = Config::from_env();

    // 1. Initialize tracing
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 2. Install Prometheus metrics recorder
    let prometheus_builder = metrics_exporter_prometheus::PrometheusBuilder::new();
    let metrics_handle = prometheus_builder
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    // 3. Wire collaborators and start the server
    let customers = HttpCustomerClient::new(config.customer_client());
    let addr = config.addr();

    match config.database_url {
        Some(ref database_url) => {
            let store = PostgresSubscriptionStore::connect(database_url)
                .await
                .expect("failed to connect to database");
            store
                .run_migrations()
                .await
                .expect("failed to run migrations");

            let service = SubscriptionService::new(store, customers, LoggingEventSink::new());
            let state = Arc::new(AppState {
                subscriptions: InstrumentedService::new(service),
            });
            serve(api::create_app(state, metrics_handle), &addr).await;
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using the in-memory store");

            let service = SubscriptionService::new(
                InMemorySubscriptionStore::new(),
                customers,
                LoggingEventSink::new(),
            );
            let state = Arc::new(AppState {
                subscriptions: InstrumentedService::new(service),
            });
            serve(api::create_app(state, metrics_handle), &addr).await;
        }
    }
}
