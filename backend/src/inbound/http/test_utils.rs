//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;

use crate::domain::ports::{NewUser, UserRepository};
use crate::domain::{
    AuthService, CachedSessionResolver, PasswordHash, ProgrammeService, ProjetService, Role,
    UserService,
};
use crate::inbound::http::state::HttpState;
use crate::outbound::persistence::MemoryStore;

/// Password shared by every seeded test account.
pub const TEST_PASSWORD: &str = "secret123";

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Build handler state over a fresh in-memory store seeded with one account
/// per role: `admin`, `editeur`, and `decideur`, all using [`TEST_PASSWORD`].
pub async fn seeded_state() -> HttpState {
    let store = Arc::new(MemoryStore::new());
    for (username, role) in [
        ("admin", Role::Admin),
        ("editeur", Role::Editeur),
        ("decideur", Role::Decideur),
    ] {
        let record = NewUser {
            username: username.to_owned(),
            password_hash: PasswordHash::from_plain(TEST_PASSWORD).expect("test hash"),
            role,
        };
        UserRepository::insert(store.as_ref(), record)
            .await
            .expect("seed account");
    }
    let users: Arc<dyn UserRepository> = store.clone();
    HttpState {
        auth: AuthService::new(users.clone()),
        sessions: Arc::new(CachedSessionResolver::new(users.clone())),
        programmes: ProgrammeService::new(store.clone()),
        projets: ProjetService::new(store),
        users: UserService::new(users),
    }
}
