//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: All HTTP endpoints from the inbound layer (auth, programmes,
//!   projets, users, health)
//! - **Schemas**: The domain types carried on the wire
//! - **Security**: Session cookie authentication scheme
//!
//! The generated specification is served by Swagger UI in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{
    CurrentUser, Error, ErrorCode, EtatAvancement, FieldError, Montant, Programme,
    ProgrammePayload, Projet, ProjetPayload, Province, Role, Secteur, UserPayload,
};
use crate::inbound::http::auth::LoginRequest;
use crate::inbound::http::users::UserResponse;

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/auth/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Programme tracker API",
        description = "HTTP interface for session-authenticated programme and projet management."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::auth::me,
        crate::inbound::http::programmes::list_programmes,
        crate::inbound::http::programmes::get_programme,
        crate::inbound::http::programmes::create_programme,
        crate::inbound::http::programmes::update_programme,
        crate::inbound::http::programmes::delete_programme,
        crate::inbound::http::projets::list_projets,
        crate::inbound::http::projets::get_projet,
        crate::inbound::http::projets::create_projet,
        crate::inbound::http::projets::update_projet,
        crate::inbound::http::projets::delete_projet,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        FieldError,
        Role,
        Secteur,
        Province,
        EtatAvancement,
        Montant,
        CurrentUser,
        Programme,
        ProgrammePayload,
        Projet,
        ProjetPayload,
        UserPayload,
        UserResponse,
        LoginRequest,
    )),
    tags(
        (name = "auth", description = "Session management"),
        (name = "programmes", description = "Programme records"),
        (name = "projets", description = "Projet records"),
        (name = "users", description = "Account administration"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
