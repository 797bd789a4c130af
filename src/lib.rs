pub mod app_state;
pub mod config;
pub mod errors;
pub mod http;
pub mod infra;
pub mod models;
pub mod repository;
pub mod telemetry;
