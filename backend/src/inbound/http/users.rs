//! Account management endpoints, admin-only.
//!
//! ```text
//! GET    /api/users
//! POST   /api/users
//! DELETE /api/users/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{Error, Role, User, UserPayload};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::{SessionContext, resolve_caller};
use crate::inbound::http::state::HttpState;

/// Account representation on the wire. The password hash never leaves the
/// domain.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// Server-assigned identifier.
    pub id: i32,
    /// Login name.
    pub username: String,
    /// Granted role.
    pub role: Role,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// List every account.
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Accounts", body = [UserResponse]),
        (status = 401, description = "No session", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<UserResponse>>> {
    let caller = resolve_caller(&session, state.sessions.as_ref()).await?;
    let accounts = state.users.list(caller.as_ref()).await?;
    Ok(web::Json(accounts.into_iter().map(Into::into).collect()))
}

/// Create an account.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = UserPayload,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 400, description = "Validation failed", body = Error),
        (status = 401, description = "No session", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 409, description = "Username already taken", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<UserPayload>,
) -> ApiResult<HttpResponse> {
    let caller = resolve_caller(&session, state.sessions.as_ref()).await?;
    let created = state.users.create(caller.as_ref(), &payload).await?;
    Ok(HttpResponse::Created().json(UserResponse::from(created)))
}

/// Delete an account.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = i32, Path, description = "Account identifier")),
    responses(
        (status = 204, description = "Account deleted"),
        (status = 401, description = "No session", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let caller = resolve_caller(&session, state.sessions.as_ref()).await?;
    state.users.delete(caller.as_ref(), path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
