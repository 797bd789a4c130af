/// News routes

use actix_web::{http::header, web, HttpResponse};
use validator::Validate;

use crate::app_state::AppState;
use crate::errors::ApiError;
use crate::http::pagination::{Page, PageQuery};
use crate::models::Noticia;
use crate::repository::NoticiaRepository;

fn not_found(id: i64) -> ApiError {
    ApiError::not_found(format!("Notícia {} não encontrada", id))
}

pub async fn list_noticias(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, ApiError> {
    let noticias = NoticiaRepository::new(state.db.clone())
        .list()
        .await
        .map_err(|e| ApiError::from_repository(e, "Erro interno ao buscar notícias"))?;

    Ok(HttpResponse::Ok().json(Page::from_all(noticias, query.into_inner())))
}

pub async fn get_noticia(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let noticia = NoticiaRepository::new(state.db.clone())
        .get_by_id(id)
        .await
        .map_err(|e| ApiError::from_repository(e, "Erro interno ao buscar notícia"))?
        .ok_or_else(|| not_found(id))?;

    Ok(HttpResponse::Ok().json(noticia))
}

pub async fn publicar_noticias(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let noticias = NoticiaRepository::new(state.db.clone())
        .list()
        .await
        .map_err(|e| ApiError::from_repository(e, "Erro interno ao publicar notícias"))?;

    Ok(HttpResponse::Ok().json(noticias))
}

pub async fn create_noticia(
    state: web::Data<AppState>,
    body: web::Json<Noticia>,
) -> Result<HttpResponse, ApiError> {
    let noticia = body.into_inner();
    noticia.validate().map_err(|e| ApiError::validation(&e))?;

    let created = NoticiaRepository::new(state.db.clone())
        .create(&noticia)
        .await
        .map_err(|e| ApiError::from_repository(e, "Erro interno ao criar notícia"))?;

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/api/noticias/{}", created.cd_noticias)))
        .json(created))
}

pub async fn update_noticia(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<Noticia>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let noticia = body.into_inner();
    noticia.validate().map_err(|e| ApiError::validation(&e))?;

    if noticia.cd_noticias != id {
        return Err(ApiError::bad_request("ID na URL não corresponde ao ID do corpo"));
    }

    let updated = NoticiaRepository::new(state.db.clone())
        .update(id, &noticia)
        .await
        .map_err(|e| ApiError::from_repository(e, "Erro interno ao atualizar notícia"))?
        .ok_or_else(|| not_found(id))?;

    Ok(HttpResponse::Ok().json(updated))
}

pub async fn delete_noticia(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let deleted = NoticiaRepository::new(state.db.clone())
        .delete(id)
        .await
        .map_err(|e| ApiError::from_repository(e, "Erro interno ao deletar notícia"))?;

    if !deleted {
        return Err(not_found(id));
    }

    Ok(HttpResponse::NoContent().finish())
}
