use campaign_api::app_state::AppState;
use campaign_api::config::load_config;
use campaign_api::http;
use campaign_api::infra::{seed, sqlite};
use campaign_api::repository::RepositoryError;
use campaign_api::telemetry::init_telemetry;

#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] config::ConfigError),
    #[error("failed to initialize database: {0}")]
    Database(#[from] sqlx::Error),
    #[error("failed to seed database: {0}")]
    Seed(#[from] RepositoryError),
    #[error("HTTP server error: {0}")]
    Server(#[from] std::io::Error),
}

#[actix_web::main]
async fn main() -> Result<(), StartupError> {
    // Load .env file if exists
    let _ = dotenvy::dotenv();

    let config = load_config()?;

    init_telemetry(&config.telemetry);

    let pool = sqlite::init_sqlite(&config.database).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to initialize SQLite");
        e
    })?;

    if config.database.seed_on_start {
        seed::seed_if_empty(&pool).await?;
    }

    let app_state = AppState::new(config.service.clone(), pool.clone());

    let server = http::start_server(config, app_state);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!(error = %e, "Server error");
                pool.close().await;
                return Err(e.into());
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutting down gracefully");
        }
    }

    tracing::info!("Closing SQLite connection pool");
    pool.close().await;

    tracing::info!("Shutdown complete");
    Ok(())
}
