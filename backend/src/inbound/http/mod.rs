//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod error;
pub mod health;
pub mod programmes;
pub mod projets;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

pub use error::ApiResult;

use actix_web::{Scope, web};

/// Scope bundling every `/api` endpoint.
pub fn api_scope() -> Scope {
    web::scope("/api")
        .app_data(error::json_config())
        .service(auth::login)
        .service(auth::logout)
        .service(auth::me)
        .service(programmes::list_programmes)
        .service(programmes::get_programme)
        .service(programmes::create_programme)
        .service(programmes::update_programme)
        .service(programmes::delete_programme)
        .service(projets::list_projets)
        .service(projets::get_projet)
        .service(projets::create_projet)
        .service(projets::update_projet)
        .service(projets::delete_projet)
        .service(users::list_users)
        .service(users::create_user)
        .service(users::delete_user)
}
