/// SQLite integration

use crate::config::DatabaseConfig;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Open the pool, creating the database file (and its directory) when missing,
/// then apply the embedded migrations if enabled.
pub async fn init_sqlite(config: &DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    tracing::info!(
        database_url = %config.url,
        max_connections = %config.max_connections,
        acquire_timeout_ms = %config.acquire_timeout_ms,
        idle_timeout_ms = %config.idle_timeout_ms,
        "Initializing SQLite connection pool"
    );

    if let Some(dir) = database_dir(&config.url) {
        std::fs::create_dir_all(dir)?;
    }

    let options = SqliteConnectOptions::from_str(&config.url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_millis(config.acquire_timeout_ms))
        .idle_timeout(Duration::from_millis(config.idle_timeout_ms))
        .connect_with(options)
        .await?;

    if config.run_migrations_on_start {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");
    } else {
        tracing::info!("Database migrations skipped");
    }

    Ok(pool)
}

pub async fn check_sqlite_health(pool: &SqlitePool) -> Result<(), String> {
    match sqlx::query("SELECT 1").fetch_one(pool).await {
        Ok(_) => Ok(()),
        Err(e) => Err(format!("SQLite health check failed: {}", e)),
    }
}

/// Parent directory of a file-backed database url; `None` for in-memory urls.
fn database_dir(url: &str) -> Option<&Path> {
    let path = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))?;
    let path = path.split('?').next().unwrap_or_default();

    if path.is_empty() || path.starts_with(":memory:") || path.starts_with("file:") {
        return None;
    }

    Path::new(path)
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_dir() {
        assert_eq!(database_dir("sqlite://data/campaigns.db"), Some(Path::new("data")));
        assert_eq!(
            database_dir("sqlite:///var/lib/app/db.sqlite?mode=rwc"),
            Some(Path::new("/var/lib/app"))
        );
        assert_eq!(database_dir("sqlite://campaigns.db"), None);
        assert_eq!(database_dir("sqlite::memory:"), None);
        assert_eq!(database_dir("postgres://localhost/db"), None);
    }

    #[actix_rt::test]
    async fn test_memory_pool_is_migrated_and_healthy() {
        let config = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            ..Default::default()
        };
        let pool = init_sqlite(&config).await.unwrap();

        assert!(check_sqlite_health(&pool).await.is_ok());
        let tables: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('Usuario', 'Campanha', 'Doacao', 'Noticias', 'Relatorio')",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(tables, 5);
    }
}
