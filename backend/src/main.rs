//! Backend entry-point: wires REST endpoints, session auth, and OpenAPI docs.

use std::env;
use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Key, SameSite};
use actix_web::{App, HttpServer, web};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use backend::ApiDoc;
use backend::domain::ports::{NewUser, UserRepository};
use backend::domain::{
    AuthService, CachedSessionResolver, MIN_PASSWORD_LENGTH, PasswordHash, ProgrammeService,
    ProjetService, Role, UserService,
};
use backend::inbound::http::api_scope;
use backend::inbound::http::health::{HealthState, live, ready};
use backend::inbound::http::state::HttpState;
use backend::outbound::persistence::MemoryStore;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let key_path =
        env::var("SESSION_KEY_FILE").unwrap_or_else(|_| "/var/run/secrets/session_key".into());
    let key = match std::fs::read(&key_path) {
        Ok(bytes) => Key::derive_from(&bytes),
        Err(e) => {
            let allow_dev = env::var("SESSION_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                warn!(path = %key_path, error = %e, "using temporary session key (dev only)");
                Key::generate()
            } else {
                return Err(std::io::Error::other(format!(
                    "failed to read session key at {key_path}: {e}"
                )));
            }
        }
    };

    let cookie_secure = env::var("SESSION_COOKIE_SECURE")
        .map(|v| v != "0")
        .unwrap_or(true);

    let store = Arc::new(MemoryStore::new());
    let users: Arc<dyn UserRepository> = store.clone();
    seed_initial_admin(users.as_ref()).await?;

    let state = web::Data::new(HttpState {
        auth: AuthService::new(users.clone()),
        sessions: Arc::new(CachedSessionResolver::new(users.clone())),
        programmes: ProgrammeService::new(store.clone()),
        projets: ProjetService::new(store),
        users: UserService::new(users),
    });

    let health_state = web::Data::new(HealthState::new());
    // Clone for server factory so readiness probe remains accessible.
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        build_app(
            state.clone(),
            server_health_state.clone(),
            key.clone(),
            cookie_secure,
        )
    })
    .bind(("0.0.0.0", 8080))?;

    health_state.mark_ready();
    server.run().await
}

/// Create the first admin account when the store is empty.
///
/// The password comes from `INITIAL_ADMIN_PASSWORD`; without it the server
/// still starts, but every login fails until an account exists.
async fn seed_initial_admin(users: &dyn UserRepository) -> std::io::Result<()> {
    let existing = users
        .list_all()
        .await
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    if !existing.is_empty() {
        return Ok(());
    }
    match env::var("INITIAL_ADMIN_PASSWORD") {
        Ok(password) if password.chars().count() >= MIN_PASSWORD_LENGTH => {
            let password_hash = PasswordHash::from_plain(&password)
                .map_err(|e| std::io::Error::other(e.to_string()))?;
            users
                .insert(NewUser {
                    username: "admin".to_owned(),
                    password_hash,
                    role: Role::Admin,
                })
                .await
                .map_err(|e| std::io::Error::other(e.to_string()))?;
            info!("seeded initial admin account");
            Ok(())
        }
        Ok(_) => Err(std::io::Error::other(
            "INITIAL_ADMIN_PASSWORD is shorter than the minimum password length",
        )),
        Err(_) => {
            warn!("no accounts exist and INITIAL_ADMIN_PASSWORD is unset; logins will fail");
            Ok(())
        }
    }
}

fn build_app(
    state: web::Data<HttpState>,
    health_state: web::Data<HealthState>,
    key: Key,
    cookie_secure: bool,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_same_site(SameSite::Lax)
        .build();

    let mut app = App::new()
        .app_data(state)
        .app_data(health_state)
        .service(api_scope().wrap(session))
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    {
        app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    }

    app
}
