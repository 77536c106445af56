//! Projet endpoints.
//!
//! ```text
//! GET    /api/projets
//! POST   /api/projets
//! GET    /api/projets/{id}
//! PUT    /api/projets/{id}
//! DELETE /api/projets/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::domain::{Error, Projet, ProjetPayload};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::{SessionContext, resolve_caller};
use crate::inbound::http::state::HttpState;

/// List every projet, newest first.
#[utoipa::path(
    get,
    path = "/api/projets",
    responses(
        (status = 200, description = "Projets", body = [Projet]),
        (status = 401, description = "No session", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["projets"],
    operation_id = "listProjets"
)]
#[get("/projets")]
pub async fn list_projets(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<Projet>>> {
    let caller = resolve_caller(&session, state.sessions.as_ref()).await?;
    let data = state.projets.list(caller.as_ref()).await?;
    Ok(web::Json(data))
}

/// Fetch one projet.
#[utoipa::path(
    get,
    path = "/api/projets/{id}",
    params(("id" = i32, Path, description = "Projet identifier")),
    responses(
        (status = 200, description = "Projet", body = Projet),
        (status = 401, description = "No session", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["projets"],
    operation_id = "getProjet"
)]
#[get("/projets/{id}")]
pub async fn get_projet(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i32>,
) -> ApiResult<web::Json<Projet>> {
    let caller = resolve_caller(&session, state.sessions.as_ref()).await?;
    let projet = state.projets.get(caller.as_ref(), path.into_inner()).await?;
    Ok(web::Json(projet))
}

/// Create a projet attached to an existing programme.
#[utoipa::path(
    post,
    path = "/api/projets",
    request_body = ProjetPayload,
    responses(
        (status = 201, description = "Projet created", body = Projet),
        (status = 400, description = "Validation failed", body = Error),
        (status = 401, description = "No session", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 409, description = "Programme reference does not exist", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["projets"],
    operation_id = "createProjet"
)]
#[post("/projets")]
pub async fn create_projet(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ProjetPayload>,
) -> ApiResult<HttpResponse> {
    let caller = resolve_caller(&session, state.sessions.as_ref()).await?;
    let created = state.projets.create(caller.as_ref(), &payload).await?;
    Ok(HttpResponse::Created().json(created))
}

/// Patch a projet; omitted fields keep their stored values.
#[utoipa::path(
    put,
    path = "/api/projets/{id}",
    params(("id" = i32, Path, description = "Projet identifier")),
    request_body = ProjetPayload,
    responses(
        (status = 200, description = "Projet updated", body = Projet),
        (status = 400, description = "Validation failed", body = Error),
        (status = 401, description = "No session", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 409, description = "Programme reference does not exist", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["projets"],
    operation_id = "updateProjet"
)]
#[put("/projets/{id}")]
pub async fn update_projet(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i32>,
    payload: web::Json<ProjetPayload>,
) -> ApiResult<web::Json<Projet>> {
    let caller = resolve_caller(&session, state.sessions.as_ref()).await?;
    let updated = state
        .projets
        .update(caller.as_ref(), path.into_inner(), &payload)
        .await?;
    Ok(web::Json(updated))
}

/// Delete a projet.
#[utoipa::path(
    delete,
    path = "/api/projets/{id}",
    params(("id" = i32, Path, description = "Projet identifier")),
    responses(
        (status = 204, description = "Projet deleted"),
        (status = 401, description = "No session", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["projets"],
    operation_id = "deleteProjet"
)]
#[delete("/projets/{id}")]
pub async fn delete_projet(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let caller = resolve_caller(&session, state.sessions.as_ref()).await?;
    state
        .projets
        .delete(caller.as_ref(), path.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
