//! Programme endpoints.
//!
//! ```text
//! GET    /api/programmes
//! POST   /api/programmes
//! GET    /api/programmes/{id}
//! PUT    /api/programmes/{id}
//! DELETE /api/programmes/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::domain::{Error, Programme, ProgrammePayload};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::{SessionContext, resolve_caller};
use crate::inbound::http::state::HttpState;

/// List every programme, newest first.
#[utoipa::path(
    get,
    path = "/api/programmes",
    responses(
        (status = 200, description = "Programmes", body = [Programme]),
        (status = 401, description = "No session", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["programmes"],
    operation_id = "listProgrammes"
)]
#[get("/programmes")]
pub async fn list_programmes(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<Programme>>> {
    let caller = resolve_caller(&session, state.sessions.as_ref()).await?;
    let data = state.programmes.list(caller.as_ref()).await?;
    Ok(web::Json(data))
}

/// Fetch one programme.
#[utoipa::path(
    get,
    path = "/api/programmes/{id}",
    params(("id" = i32, Path, description = "Programme identifier")),
    responses(
        (status = 200, description = "Programme", body = Programme),
        (status = 401, description = "No session", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["programmes"],
    operation_id = "getProgramme"
)]
#[get("/programmes/{id}")]
pub async fn get_programme(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i32>,
) -> ApiResult<web::Json<Programme>> {
    let caller = resolve_caller(&session, state.sessions.as_ref()).await?;
    let programme = state
        .programmes
        .get(caller.as_ref(), path.into_inner())
        .await?;
    Ok(web::Json(programme))
}

/// Create a programme.
#[utoipa::path(
    post,
    path = "/api/programmes",
    request_body = ProgrammePayload,
    responses(
        (status = 201, description = "Programme created", body = Programme),
        (status = 400, description = "Validation failed", body = Error),
        (status = 401, description = "No session", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["programmes"],
    operation_id = "createProgramme"
)]
#[post("/programmes")]
pub async fn create_programme(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ProgrammePayload>,
) -> ApiResult<HttpResponse> {
    let caller = resolve_caller(&session, state.sessions.as_ref()).await?;
    let created = state.programmes.create(caller.as_ref(), &payload).await?;
    Ok(HttpResponse::Created().json(created))
}

/// Patch a programme; omitted fields keep their stored values.
#[utoipa::path(
    put,
    path = "/api/programmes/{id}",
    params(("id" = i32, Path, description = "Programme identifier")),
    request_body = ProgrammePayload,
    responses(
        (status = 200, description = "Programme updated", body = Programme),
        (status = 400, description = "Validation failed", body = Error),
        (status = 401, description = "No session", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["programmes"],
    operation_id = "updateProgramme"
)]
#[put("/programmes/{id}")]
pub async fn update_programme(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i32>,
    payload: web::Json<ProgrammePayload>,
) -> ApiResult<web::Json<Programme>> {
    let caller = resolve_caller(&session, state.sessions.as_ref()).await?;
    let updated = state
        .programmes
        .update(caller.as_ref(), path.into_inner(), &payload)
        .await?;
    Ok(web::Json(updated))
}

/// Delete a programme; refused while projets still reference it.
#[utoipa::path(
    delete,
    path = "/api/programmes/{id}",
    params(("id" = i32, Path, description = "Programme identifier")),
    responses(
        (status = 204, description = "Programme deleted"),
        (status = 401, description = "No session", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 409, description = "Still referenced by projets", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["programmes"],
    operation_id = "deleteProgramme"
)]
#[delete("/programmes/{id}")]
pub async fn delete_programme(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let caller = resolve_caller(&session, state.sessions.as_ref()).await?;
    state
        .programmes
        .delete(caller.as_ref(), path.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
