//! Authentication endpoints.
//!
//! ```text
//! POST /api/auth/login {"username":"admin","password":"secret123"}
//! POST /api/auth/logout
//! GET  /api/auth/me
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{Error, LoginCredentials};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::{SessionContext, resolve_caller};
use crate::inbound::http::state::HttpState;

/// Login request body for `POST /api/auth/login`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Login name.
    pub username: String,
    /// Plaintext password.
    pub password: String,
}

/// Authenticate and establish a session.
///
/// Unknown usernames and wrong passwords fail with the same message so the
/// endpoint never confirms which accounts exist.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error")
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = LoginCredentials::new(&payload.username, &payload.password)?;
    let caller = state.auth.authenticate(&credentials).await?;
    session.persist_user(caller.id)?;
    Ok(HttpResponse::Ok().json(json!({ "user": caller })))
}

/// Terminate the session.
///
/// Clears the cookie and drops any cached identity so the next request with
/// a stale cookie resolves afresh.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Logout success"),
        (status = 500, description = "Internal server error")
    ),
    tags = ["auth"],
    operation_id = "logout",
    security([])
)]
#[post("/auth/logout")]
pub async fn logout(state: web::Data<HttpState>, session: SessionContext) -> HttpResponse {
    session.clear();
    state.sessions.invalidate();
    HttpResponse::Ok().json(json!({ "message": "Déconnexion réussie" }))
}

/// Current caller, as resolved from the session cookie.
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Authenticated caller"),
        (status = 401, description = "No session", body = Error),
        (status = 500, description = "Internal server error")
    ),
    tags = ["auth"],
    operation_id = "me"
)]
#[get("/auth/me")]
pub async fn me(state: web::Data<HttpState>, session: SessionContext) -> ApiResult<HttpResponse> {
    let caller = resolve_caller(&session, state.sessions.as_ref())
        .await?
        .ok_or_else(|| Error::unauthenticated("Authentification requise"))?;
    Ok(HttpResponse::Ok().json(json!({ "user": caller })))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::inbound::http::test_utils::{TEST_PASSWORD, seeded_state, test_session_middleware};
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use serde_json::Value;

    fn test_app(
        state: HttpState,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(state))
            .wrap(test_session_middleware())
            .service(web::scope("/api").service(login).service(logout).service(me))
    }

    #[actix_web::test]
    async fn login_sets_a_cookie_and_returns_the_caller() {
        let app = actix_test::init_service(test_app(seeded_state().await)).await;
        let request = actix_test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(&LoginRequest {
                username: "editeur".into(),
                password: TEST_PASSWORD.into(),
            })
            .to_request();

        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(
            response
                .response()
                .cookies()
                .any(|cookie| cookie.name() == "session")
        );
        let body = actix_test::read_body(response).await;
        let value: Value = serde_json::from_slice(&body).expect("response JSON");
        let user = value.get("user").expect("user object");
        assert_eq!(user.get("username").and_then(Value::as_str), Some("editeur"));
        assert_eq!(user.get("role").and_then(Value::as_str), Some("editeur"));
        assert!(user.get("passwordHash").is_none());
    }

    #[actix_web::test]
    async fn unknown_user_and_wrong_password_fail_identically() {
        let app = actix_test::init_service(test_app(seeded_state().await)).await;

        let mut messages = Vec::new();
        for (username, password) in [("admin", "wrong-pass"), ("inconnu", TEST_PASSWORD)] {
            let request = actix_test::TestRequest::post()
                .uri("/api/auth/login")
                .set_json(&LoginRequest {
                    username: username.into(),
                    password: password.into(),
                })
                .to_request();
            let response = actix_test::call_service(&app, request).await;
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
            let body = actix_test::read_body(response).await;
            let value: Value = serde_json::from_slice(&body).expect("error payload");
            messages.push(
                value
                    .get("message")
                    .and_then(Value::as_str)
                    .map(str::to_owned),
            );
        }
        assert_eq!(messages[0].as_deref(), Some("Identifiants invalides"));
        assert_eq!(messages[0], messages[1]);
    }

    #[actix_web::test]
    async fn blank_credentials_are_a_validation_error() {
        let app = actix_test::init_service(test_app(seeded_state().await)).await;
        let request = actix_test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(&LoginRequest {
                username: "  ".into(),
                password: String::new(),
            })
            .to_request();

        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = actix_test::read_body(response).await;
        let value: Value = serde_json::from_slice(&body).expect("error payload");
        assert_eq!(
            value.get("code").and_then(Value::as_str),
            Some("invalid_request")
        );
    }

    #[actix_web::test]
    async fn me_round_trips_the_session() {
        let app = actix_test::init_service(test_app(seeded_state().await)).await;
        let login_res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/auth/login")
                .set_json(&LoginRequest {
                    username: "decideur".into(),
                    password: TEST_PASSWORD.into(),
                })
                .to_request(),
        )
        .await;
        let cookie = login_res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie");

        let me_res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/auth/me")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(me_res.status(), StatusCode::OK);
        let body = actix_test::read_body(me_res).await;
        let value: Value = serde_json::from_slice(&body).expect("response JSON");
        assert_eq!(
            value
                .get("user")
                .and_then(|user| user.get("username"))
                .and_then(Value::as_str),
            Some("decideur")
        );
    }

    #[actix_web::test]
    async fn me_without_a_session_is_unauthenticated() {
        let app = actix_test::init_service(test_app(seeded_state().await)).await;
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/auth/me")
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn logout_sends_a_removal_cookie() {
        let app = actix_test::init_service(test_app(seeded_state().await)).await;
        let login_res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/auth/login")
                .set_json(&LoginRequest {
                    username: "admin".into(),
                    password: TEST_PASSWORD.into(),
                })
                .to_request(),
        )
        .await;
        let cookie = login_res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie");

        let logout_res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/auth/logout")
                .cookie(cookie.clone())
                .to_request(),
        )
        .await;
        assert_eq!(logout_res.status(), StatusCode::OK);

        // Purging the session answers with an emptied cookie.
        let removal = logout_res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("removal cookie")
            .into_owned();
        assert!(removal.value().is_empty());

        // A client honouring the removal carries an empty cookie, which no
        // longer resolves a caller.
        let me_res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/auth/me")
                .cookie(removal)
                .to_request(),
        )
        .await;
        assert_eq!(me_res.status(), StatusCode::UNAUTHORIZED);
    }
}
