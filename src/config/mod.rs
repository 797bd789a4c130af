/// Configuration module
///
/// Loads configuration from TOML files and environment variables.
/// Priority: ENV > TOML > defaults
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    #[serde(default = "default_service_name")]
    pub name: String,
    #[serde(default = "default_service_version")]
    pub version: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_request_body_limit")]
    pub request_body_limit_bytes: usize,
    /// 0 keeps the actix default (one worker per core)
    #[serde(default)]
    pub workers: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TelemetryConfig {
    /// `json` or `compact`
    #[serde(default = "default_log_format")]
    pub log_format: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_request_id_header")]
    pub request_id_header: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_acquire_timeout_ms")]
    pub acquire_timeout_ms: u64,
    #[serde(default = "default_idle_timeout_ms")]
    pub idle_timeout_ms: u64,
    #[serde(default = "default_true")]
    pub run_migrations_on_start: bool,
    #[serde(default)]
    pub seed_on_start: bool,
}

fn default_service_name() -> String {
    "campaign-api".to_string()
}

fn default_service_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_request_body_limit() -> usize {
    1024 * 1024
}

fn default_log_format() -> String {
    "json".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_request_id_header() -> String {
    "x-request-id".to_string()
}

fn default_database_url() -> String {
    "sqlite://data/campaigns.db".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_acquire_timeout_ms() -> u64 {
    3000
}

fn default_idle_timeout_ms() -> u64 {
    300_000
}

fn default_true() -> bool {
    true
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            version: default_service_version(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_body_limit_bytes: default_request_body_limit(),
            workers: 0,
        }
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_format: default_log_format(),
            log_level: default_log_level(),
            request_id_header: default_request_id_header(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
            acquire_timeout_ms: default_acquire_timeout_ms(),
            idle_timeout_ms: default_idle_timeout_ms(),
            run_migrations_on_start: true,
            seed_on_start: false,
        }
    }
}

pub fn load_config() -> Result<Config, config::ConfigError> {
    let env = env::var("APP__ENV").unwrap_or_else(|_| "dev".to_string());

    let mut builder = config::Config::builder();

    // Try to load TOML file, but don't fail if it doesn't exist
    let config_path = format!("configs/{}/default", env);
    if std::path::Path::new(&format!("{}.toml", config_path)).exists() {
        builder = builder.add_source(config::File::with_name(&config_path).required(false));
    }

    // Environment variables override with APP__ prefix
    builder = builder.add_source(
        config::Environment::with_prefix("APP")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    config.try_deserialize()
}
