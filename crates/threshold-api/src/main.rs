//! Threshold API server entry point.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use threshold_core::clock::SystemClock;
use threshold_core::repository::EventRepository;
use threshold_event_store::memory_event_repository::InMemoryEventRepository;
use threshold_event_store::pg_event_repository::PgEventRepository;
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

use threshold_api::config::ServerConfig;
use threshold_api::error::AppError;
use threshold_api::routes;
use threshold_api::state::AppState;
use threshold_api::world::WorldDirectory;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Threshold API server");

    let config = ServerConfig::from_env()?;

    let event_repository: Arc<dyn EventRepository> = match &config.database_url {
        Some(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(config.database_max_connections)
                .connect(database_url)
                .await?;
            let repository = PgEventRepository::new(pool);
            repository.ensure_schema().await?;
            tracing::info!("Using PostgreSQL event store");
            Arc::new(repository)
        }
        None => {
            tracing::warn!("DATABASE_URL not set; events are kept in memory only");
            Arc::new(InMemoryEventRepository::new())
        }
    };

    let app_state = AppState::new(
        Arc::new(SystemClock),
        event_repository,
        Arc::new(WorldDirectory::new()),
    );

    // TODO: Replace CorsLayer::permissive() with restricted origins for production.
    let app = routes::app(app_state).layer(CorsLayer::permissive());

    let addr = config.addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
