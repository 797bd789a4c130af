/// Read-only projections under /api/views

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::app_state::AppState;
use crate::errors::ApiError;
use crate::repository::ViewRepository;

#[derive(Debug, Deserialize)]
pub struct BuscarNomeQuery {
    pub usuario: Option<String>,
}

pub async fn buscar_nome(
    state: web::Data<AppState>,
    query: web::Query<BuscarNomeQuery>,
) -> Result<HttpResponse, ApiError> {
    let usuario = match query.into_inner().usuario {
        Some(usuario) if !usuario.trim().is_empty() => usuario,
        _ => return Err(ApiError::bad_request("Parâmetro 'usuario' é obrigatório")),
    };

    let nome = ViewRepository::new(state.db.clone())
        .buscar_nome(&usuario)
        .await
        .map_err(|e| ApiError::from_repository(e, "Erro interno ao buscar nome"))?
        .ok_or_else(|| ApiError::not_found(format!("Usuário '{}' não encontrado", usuario)))?;

    Ok(HttpResponse::Ok().json(nome))
}

pub async fn doacoes_detalhadas(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let rows = ViewRepository::new(state.db.clone())
        .doacoes_detalhadas()
        .await
        .map_err(|e| ApiError::from_repository(e, "Erro interno ao buscar doações detalhadas"))?;

    Ok(HttpResponse::Ok().json(rows))
}
