use std::sync::Arc;

use anyhow::Context;
use axum::{Json, Router, routing::get};
use sqlx::sqlite::SqlitePoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use spincycle::AppState;
use spincycle::config::Config;
use spincycle::notify::ChannelNotifier;
use spincycle::reservations;
use spincycle::session::Session;
use spincycle::store::{ReservationStore, SqliteStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env();

    let db_pool = SqlitePoolOptions::new()
        .max_connections(16)
        .connect(&config.database_url)
        .await
        .context("failed to open the reservation database")?;

    let store: Arc<dyn ReservationStore> = Arc::new(SqliteStore::open(db_pool).await?);
    let notifier = Arc::new(ChannelNotifier::new(64));
    let session = Arc::new(Session::start(store.clone(), notifier.clone()));

    let app = Router::new()
        .route("/health", get(health))
        .merge(reservations::router())
        .with_state(AppState {
            store,
            session: session.clone(),
            notifier,
        })
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("listening on {}", config.bind_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    session.shutdown();
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "spincycle"
    }))
}
