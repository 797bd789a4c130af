/// User routes

use actix_web::{http::header, web, HttpResponse};
use validator::Validate;

use crate::app_state::AppState;
use crate::errors::ApiError;
use crate::http::pagination::{Page, PageQuery};
use crate::models::Usuario;
use crate::repository::UsuarioRepository;

fn not_found(id: i64) -> ApiError {
    ApiError::not_found(format!("Usuário {} não encontrado", id))
}

pub async fn list_usuarios(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, ApiError> {
    let usuarios = UsuarioRepository::new(state.db.clone())
        .list()
        .await
        .map_err(|e| ApiError::from_repository(e, "Erro interno ao buscar usuários"))?;

    Ok(HttpResponse::Ok().json(Page::from_all(usuarios, query.into_inner())))
}

pub async fn get_usuario(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let usuario = UsuarioRepository::new(state.db.clone())
        .get_by_id(id)
        .await
        .map_err(|e| ApiError::from_repository(e, "Erro interno ao buscar usuário"))?
        .ok_or_else(|| not_found(id))?;

    Ok(HttpResponse::Ok().json(usuario))
}

pub async fn publicar_usuarios(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let usuarios = UsuarioRepository::new(state.db.clone())
        .list()
        .await
        .map_err(|e| ApiError::from_repository(e, "Erro interno ao publicar usuários"))?;

    Ok(HttpResponse::Ok().json(usuarios))
}

pub async fn create_usuario(
    state: web::Data<AppState>,
    body: web::Json<Usuario>,
) -> Result<HttpResponse, ApiError> {
    let usuario = body.into_inner();
    usuario.validate_new().map_err(|e| ApiError::validation(&e))?;

    let created = UsuarioRepository::new(state.db.clone())
        .create(&usuario)
        .await
        .map_err(|e| ApiError::from_repository(e, "Erro interno ao criar usuário"))?;

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/api/usuarios/{}", created.cd_cliente)))
        .json(created))
}

/// A body echoed from GET has no `senha`; the stored password is kept then.
pub async fn update_usuario(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<Usuario>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let usuario = body.into_inner();
    usuario.validate().map_err(|e| ApiError::validation(&e))?;

    if usuario.cd_cliente != id {
        return Err(ApiError::bad_request("ID na URL não corresponde ao ID do corpo"));
    }

    let updated = UsuarioRepository::new(state.db.clone())
        .update(id, &usuario)
        .await
        .map_err(|e| ApiError::from_repository(e, "Erro interno ao atualizar usuário"))?
        .ok_or_else(|| not_found(id))?;

    Ok(HttpResponse::Ok().json(updated))
}

pub async fn delete_usuario(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let deleted = UsuarioRepository::new(state.db.clone())
        .delete(id)
        .await
        .map_err(|e| ApiError::from_repository(e, "Erro interno ao deletar usuário"))?;

    if !deleted {
        return Err(not_found(id));
    }

    Ok(HttpResponse::NoContent().finish())
}
