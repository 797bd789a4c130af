/// Health check routes

use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use std::collections::HashMap;

use crate::app_state::AppState;
use crate::infra::sqlite;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Serialize)]
struct ReadyResponse {
    ready: bool,
    checks: HashMap<&'static str, CheckResult>,
}

#[derive(Serialize)]
struct CheckResult {
    ok: bool,
    details: String,
}

pub async fn healthz() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse { status: "ok" })
}

pub async fn readyz(state: web::Data<AppState>) -> impl Responder {
    let mut checks = HashMap::new();

    let ready = match sqlite::check_sqlite_health(&state.db).await {
        Ok(()) => {
            checks.insert(
                "sqlite",
                CheckResult {
                    ok: true,
                    details: "healthy".to_string(),
                },
            );
            true
        }
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            checks.insert(
                "sqlite",
                CheckResult {
                    ok: false,
                    details: e,
                },
            );
            false
        }
    };

    let mut response = if ready {
        HttpResponse::Ok()
    } else {
        HttpResponse::ServiceUnavailable()
    };

    response.json(ReadyResponse { ready, checks })
}
