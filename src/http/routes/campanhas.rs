/// Campaign routes

use actix_web::{http::header, web, HttpResponse};
use validator::Validate;

use crate::app_state::AppState;
use crate::errors::ApiError;
use crate::http::pagination::{Page, PageQuery};
use crate::models::Campanha;
use crate::repository::CampanhaRepository;

fn not_found(id: i64) -> ApiError {
    ApiError::not_found(format!("Campanha {} não encontrada", id))
}

pub async fn list_campanhas(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, ApiError> {
    let campanhas = CampanhaRepository::new(state.db.clone())
        .list()
        .await
        .map_err(|e| ApiError::from_repository(e, "Erro interno ao buscar campanhas"))?;

    Ok(HttpResponse::Ok().json(Page::from_all(campanhas, query.into_inner())))
}

pub async fn get_campanha(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let campanha = CampanhaRepository::new(state.db.clone())
        .get_by_id(id)
        .await
        .map_err(|e| ApiError::from_repository(e, "Erro interno ao buscar campanha"))?
        .ok_or_else(|| not_found(id))?;

    Ok(HttpResponse::Ok().json(campanha))
}

pub async fn publicar_campanhas(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let campanhas = CampanhaRepository::new(state.db.clone())
        .list()
        .await
        .map_err(|e| ApiError::from_repository(e, "Erro interno ao publicar campanhas"))?;

    Ok(HttpResponse::Ok().json(campanhas))
}

pub async fn create_campanha(
    state: web::Data<AppState>,
    body: web::Json<Campanha>,
) -> Result<HttpResponse, ApiError> {
    let campanha = body.into_inner();
    campanha.validate().map_err(|e| ApiError::validation(&e))?;

    let created = CampanhaRepository::new(state.db.clone())
        .create(&campanha)
        .await
        .map_err(|e| ApiError::from_repository(e, "Erro interno ao criar campanha"))?;

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/api/campanhas/{}", created.cd_campanha)))
        .json(created))
}

pub async fn update_campanha(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<Campanha>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let campanha = body.into_inner();
    campanha.validate().map_err(|e| ApiError::validation(&e))?;

    if campanha.cd_campanha != id {
        return Err(ApiError::bad_request("ID na URL não corresponde ao ID do corpo"));
    }

    let updated = CampanhaRepository::new(state.db.clone())
        .update(id, &campanha)
        .await
        .map_err(|e| ApiError::from_repository(e, "Erro interno ao atualizar campanha"))?
        .ok_or_else(|| not_found(id))?;

    Ok(HttpResponse::Ok().json(updated))
}

/// Fails with 500 while donations, news or reports still point at the campaign.
pub async fn delete_campanha(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let deleted = CampanhaRepository::new(state.db.clone())
        .delete(id)
        .await
        .map_err(|e| ApiError::from_repository(e, "Erro interno ao deletar campanha"))?;

    if !deleted {
        return Err(not_found(id));
    }

    Ok(HttpResponse::NoContent().finish())
}
