/// Service identity route

use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;

use crate::app_state::AppState;

#[derive(Serialize)]
struct VersionResponse<'a> {
    name: &'a str,
    version: &'a str,
}

pub async fn version(state: web::Data<AppState>) -> impl Responder {
    let service = &state.service_config;
    HttpResponse::Ok().json(VersionResponse {
        name: &service.name,
        version: &service.version,
    })
}
