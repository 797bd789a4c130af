/// HTTP server module

pub mod middleware;
pub mod pagination;
pub mod routes;

use actix_web::{web, App, HttpServer};
use std::io;

use crate::app_state::AppState;
use crate::config::Config;
use middleware::{logger::Logger, request_id::RequestId};

pub async fn start_server(config: Config, app_state: AppState) -> io::Result<()> {
    let bind_addr = format!("{}:{}", config.server.host, config.server.port);

    tracing::info!(
        service_name = %config.service.name,
        service_version = %config.service.version,
        bind_addr = %bind_addr,
        workers = config.server.workers,
        log_level = %config.telemetry.log_level,
        log_format = %config.telemetry.log_format,
        "Starting HTTP server"
    );

    let app_state = web::Data::new(app_state);
    let request_id_header = config.telemetry.request_id_header.clone();
    let body_limit = config.server.request_body_limit_bytes;

    let mut server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .app_data(web::PayloadConfig::new(body_limit))
            .wrap(Logger)
            .wrap(RequestId::new(&request_id_header))
            .configure(|cfg| routes::configure(cfg, body_limit))
    });

    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(&bind_addr)?.run().await
}
