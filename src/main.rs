use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use course_api::config::{self, StoreBackend};
use course_api::database::{CourseStore, DatabaseManager, MemoryCourseStore, PgCourseStore};
use course_api::routes;
use course_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();
    tracing::info!("Starting Course API in {:?} mode", config.environment);

    if config.security.jwt_secret.is_empty() {
        anyhow::bail!("JWT_SECRET must be set; every /api/courses request is verified against it");
    }

    let store = open_store(config).await?;
    let state = AppState::new(store.clone(), config.security.jwt_secret.as_str());
    let app = routes::app(state, config);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Course API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    store.close().await;
    tracing::info!("Course API stopped");
    Ok(())
}

async fn open_store(config: &config::AppConfig) -> anyhow::Result<Arc<dyn CourseStore>> {
    match config.database.store {
        StoreBackend::Postgres => {
            let pool = DatabaseManager::connect(&config.database)
                .await
                .context("failed to open PostgreSQL store")?;
            Ok(Arc::new(PgCourseStore::new(pool)))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory course store; data is lost on shutdown");
            Ok(Arc::new(MemoryCourseStore::new()))
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!("Failed to listen for SIGTERM: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
