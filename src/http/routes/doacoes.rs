/// Donation routes

use actix_web::{http::header, web, HttpResponse};
use validator::Validate;

use crate::app_state::AppState;
use crate::errors::ApiError;
use crate::http::pagination::{Page, PageQuery};
use crate::models::Doacao;
use crate::repository::DoacaoRepository;

fn not_found(id: i64) -> ApiError {
    ApiError::not_found(format!("Doação {} não encontrada", id))
}

pub async fn list_doacoes(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, ApiError> {
    let doacoes = DoacaoRepository::new(state.db.clone())
        .list()
        .await
        .map_err(|e| ApiError::from_repository(e, "Erro interno ao buscar doações"))?;

    Ok(HttpResponse::Ok().json(Page::from_all(doacoes, query.into_inner())))
}

pub async fn get_doacao(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let doacao = DoacaoRepository::new(state.db.clone())
        .get_by_id(id)
        .await
        .map_err(|e| ApiError::from_repository(e, "Erro interno ao buscar doação"))?
        .ok_or_else(|| not_found(id))?;

    Ok(HttpResponse::Ok().json(doacao))
}

pub async fn publicar_doacoes(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let doacoes = DoacaoRepository::new(state.db.clone())
        .list()
        .await
        .map_err(|e| ApiError::from_repository(e, "Erro interno ao publicar doações"))?;

    Ok(HttpResponse::Ok().json(doacoes))
}

pub async fn create_doacao(
    state: web::Data<AppState>,
    body: web::Json<Doacao>,
) -> Result<HttpResponse, ApiError> {
    let doacao = body.into_inner();
    doacao.validate().map_err(|e| ApiError::validation(&e))?;

    let created = DoacaoRepository::new(state.db.clone())
        .create(&doacao)
        .await
        .map_err(|e| ApiError::from_repository(e, "Erro interno ao criar doação"))?;

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/api/doacoes/{}", created.cd_doacao)))
        .json(created))
}

pub async fn update_doacao(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<Doacao>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let doacao = body.into_inner();
    doacao.validate().map_err(|e| ApiError::validation(&e))?;

    if doacao.cd_doacao != id {
        return Err(ApiError::bad_request("ID na URL não corresponde ao ID do corpo"));
    }

    let updated = DoacaoRepository::new(state.db.clone())
        .update(id, &doacao)
        .await
        .map_err(|e| ApiError::from_repository(e, "Erro interno ao atualizar doação"))?
        .ok_or_else(|| not_found(id))?;

    Ok(HttpResponse::Ok().json(updated))
}

pub async fn delete_doacao(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let deleted = DoacaoRepository::new(state.db.clone())
        .delete(id)
        .await
        .map_err(|e| ApiError::from_repository(e, "Erro interno ao deletar doação"))?;

    if !deleted {
        return Err(not_found(id));
    }

    Ok(HttpResponse::NoContent().finish())
}
