/// Application state

use crate::config::ServiceConfig;
use sqlx::SqlitePool;

/// Shared by every worker; repositories are built per request from `db`.
#[derive(Clone)]
pub struct AppState {
    pub service_config: ServiceConfig,
    pub db: SqlitePool,
}

impl AppState {
    pub fn new(service_config: ServiceConfig, db: SqlitePool) -> Self {
        Self { service_config, db }
    }
}
