/// Route modules

pub mod campanhas;
pub mod doacoes;
pub mod health;
pub mod noticias;
pub mod relatorios;
pub mod usuarios;
pub mod version;
pub mod views;

use actix_web::{error, web, HttpRequest};
use serde_json::json;

use crate::errors::ApiError;

/// Register every `/api` route plus extractor configs whose failures render
/// as `{message, error: "BadRequest", errors}`.
pub fn configure(cfg: &mut web::ServiceConfig, body_limit: usize) {
    cfg.app_data(
        web::JsonConfig::default()
            .limit(body_limit)
            .error_handler(|err, req| extractor_error("body", err.to_string(), req)),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|err, req| extractor_error("path", err.to_string(), req)),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, req| extractor_error("query", err.to_string(), req)),
    )
    .service(
        web::scope("/api")
            .service(
                web::scope("/health")
                    .route("", web::get().to(health::healthz))
                    .route("/ready", web::get().to(health::readyz)),
            )
            .route("/version", web::get().to(version::version))
            .service(
                web::scope("/views")
                    .route("/buscar-nome", web::get().to(views::buscar_nome))
                    .route("/doacoes-detalhadas", web::get().to(views::doacoes_detalhadas)),
            )
            // `/publicar` is registered ahead of `/{id}` in every resource scope
            .service(
                web::scope("/usuarios")
                    .route("", web::get().to(usuarios::list_usuarios))
                    .route("", web::post().to(usuarios::create_usuario))
                    .route("/publicar", web::get().to(usuarios::publicar_usuarios))
                    .route("/{id}", web::get().to(usuarios::get_usuario))
                    .route("/{id}", web::put().to(usuarios::update_usuario))
                    .route("/{id}", web::delete().to(usuarios::delete_usuario)),
            )
            .service(
                web::scope("/campanhas")
                    .route("", web::get().to(campanhas::list_campanhas))
                    .route("", web::post().to(campanhas::create_campanha))
                    .route("/publicar", web::get().to(campanhas::publicar_campanhas))
                    .route("/{id}", web::get().to(campanhas::get_campanha))
                    .route("/{id}", web::put().to(campanhas::update_campanha))
                    .route("/{id}", web::delete().to(campanhas::delete_campanha)),
            )
            .service(
                web::scope("/doacoes")
                    .route("", web::get().to(doacoes::list_doacoes))
                    .route("", web::post().to(doacoes::create_doacao))
                    .route("/publicar", web::get().to(doacoes::publicar_doacoes))
                    .route("/{id}", web::get().to(doacoes::get_doacao))
                    .route("/{id}", web::put().to(doacoes::update_doacao))
                    .route("/{id}", web::delete().to(doacoes::delete_doacao)),
            )
            .service(
                web::scope("/noticias")
                    .route("", web::get().to(noticias::list_noticias))
                    .route("", web::post().to(noticias::create_noticia))
                    .route("/publicar", web::get().to(noticias::publicar_noticias))
                    .route("/{id}", web::get().to(noticias::get_noticia))
                    .route("/{id}", web::put().to(noticias::update_noticia))
                    .route("/{id}", web::delete().to(noticias::delete_noticia)),
            )
            .service(
                web::scope("/relatorios")
                    .route("", web::get().to(relatorios::list_relatorios))
                    .route("", web::post().to(relatorios::create_relatorio))
                    .route("/publicar", web::get().to(relatorios::publicar_relatorios))
                    .route("/{id}", web::get().to(relatorios::get_relatorio))
                    .route("/{id}", web::put().to(relatorios::update_relatorio))
                    .route("/{id}", web::delete().to(relatorios::delete_relatorio)),
            ),
    );
}

fn extractor_error(source: &'static str, detail: String, req: &HttpRequest) -> error::Error {
    tracing::warn!(
        method = %req.method(),
        path = %req.path(),
        source,
        error = %detail,
        "Rejected malformed request"
    );

    ApiError::BadRequest {
        message: "Dados inválidos".to_string(),
        errors: Some(json!({ source: [detail] })),
    }
    .into()
}
