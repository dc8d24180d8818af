//! Courier API server binary entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use courier_common::config::AppConfig;
use courier_common::db::create_pool;
use courier_engine::store::{PgNotificationStore, PgPreferenceStore};
use courier_notifier::ResendMailer;

use courier_api::routes::create_router;
use courier_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("courier_api=debug,courier_engine=debug,tower_http=debug")
        }))
        .init();

    tracing::info!("Starting Courier API server...");

    // Load configuration
    let config = AppConfig::from_env()?;

    // Create database connection pool and apply migrations
    let pool = create_pool(&config).await?;
    sqlx::migrate!("../../migrations").run(&pool).await?;
    tracing::info!("Database ready");

    // Wire the store adapters and the delivery channel
    let preference_store = Arc::new(PgPreferenceStore::new(pool.clone()));
    let notification_store = Arc::new(PgNotificationStore::new(pool));
    let mailer = ResendMailer::new(
        &config.mail_api_url,
        &config.resend_api_key,
        &config.email_from,
        Duration::from_secs(config.mail_timeout_secs),
    )
    .map_err(|e| anyhow::anyhow!("Failed to build mail client: {}", e))?;

    // Build application state
    let state = AppState::new(preference_store, notification_store, Arc::new(mailer));

    // Build router
    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], 3000));
    tracing::info!("API server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
