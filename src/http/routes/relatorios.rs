/// Report routes

use actix_web::{http::header, web, HttpResponse};
use validator::Validate;

use crate::app_state::AppState;
use crate::errors::ApiError;
use crate::http::pagination::{Page, PageQuery};
use crate::models::Relatorio;
use crate::repository::RelatorioRepository;

fn not_found(id: i64) -> ApiError {
    ApiError::not_found(format!("Relatório {} não encontrado", id))
}

pub async fn list_relatorios(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, ApiError> {
    let relatorios = RelatorioRepository::new(state.db.clone())
        .list()
        .await
        .map_err(|e| ApiError::from_repository(e, "Erro interno ao buscar relatórios"))?;

    Ok(HttpResponse::Ok().json(Page::from_all(relatorios, query.into_inner())))
}

pub async fn get_relatorio(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let relatorio = RelatorioRepository::new(state.db.clone())
        .get_by_id(id)
        .await
        .map_err(|e| ApiError::from_repository(e, "Erro interno ao buscar relatório"))?
        .ok_or_else(|| not_found(id))?;

    Ok(HttpResponse::Ok().json(relatorio))
}

pub async fn publicar_relatorios(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let relatorios = RelatorioRepository::new(state.db.clone())
        .list()
        .await
        .map_err(|e| ApiError::from_repository(e, "Erro interno ao publicar relatórios"))?;

    Ok(HttpResponse::Ok().json(relatorios))
}

pub async fn create_relatorio(
    state: web::Data<AppState>,
    body: web::Json<Relatorio>,
) -> Result<HttpResponse, ApiError> {
    let relatorio = body.into_inner();
    relatorio.validate().map_err(|e| ApiError::validation(&e))?;

    let created = RelatorioRepository::new(state.db.clone())
        .create(&relatorio)
        .await
        .map_err(|e| ApiError::from_repository(e, "Erro interno ao criar relatório"))?;

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/api/relatorios/{}", created.cd_relatorio)))
        .json(created))
}

pub async fn update_relatorio(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<Relatorio>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let relatorio = body.into_inner();
    relatorio.validate().map_err(|e| ApiError::validation(&e))?;

    if relatorio.cd_relatorio != id {
        return Err(ApiError::bad_request("ID na URL não corresponde ao ID do corpo"));
    }

    let updated = RelatorioRepository::new(state.db.clone())
        .update(id, &relatorio)
        .await
        .map_err(|e| ApiError::from_repository(e, "Erro interno ao atualizar relatório"))?
        .ok_or_else(|| not_found(id))?;

    Ok(HttpResponse::Ok().json(updated))
}

pub async fn delete_relatorio(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let deleted = RelatorioRepository::new(state.db.clone())
        .delete(id)
        .await
        .map_err(|e| ApiError::from_repository(e, "Erro interno ao deletar relatório"))?;

    if !deleted {
        return Err(not_found(id));
    }

    Ok(HttpResponse::NoContent().finish())
}
