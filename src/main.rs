use prediction_pool::{
    build_router,
    game::repository::{InMemoryGameRepository, PostgresGameRepository},
    prediction::repository::{InMemoryPredictionRepository, PostgresPredictionRepository},
    user::repository::{InMemoryUserRepository, PostgresUserRepository},
    AppConfig, AppState,
};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "prediction_pool=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    info!(addr = %config.listen_addr(), "Starting prediction pool server");

    let app_state = match &config.database_url {
        Some(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(config.database_max_connections)
                .connect(database_url)
                .await?;
            sqlx::migrate!("./migrations").run(&pool).await?;
            info!(
                max_connections = config.database_max_connections,
                "Connected to PostgreSQL"
            );

            AppState::new(
                Arc::new(PostgresGameRepository::new(pool.clone())),
                Arc::new(PostgresPredictionRepository::new(pool.clone())),
                Arc::new(PostgresUserRepository::new(pool)),
            )
        }
        None => {
            warn!("DATABASE_URL not set, using in-memory storage");
            AppState::new(
                Arc::new(InMemoryGameRepository::new()),
                Arc::new(InMemoryPredictionRepository::new()),
                Arc::new(InMemoryUserRepository::new()),
            )
        }
    };

    let app = build_router(app_state);

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    info!("Server running on http://{}", config.listen_addr());
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");
}
