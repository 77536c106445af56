//! Login credentials and the authentication service.
//!
//! Failed logins are indistinguishable: an unknown username and a wrong
//! password both produce the same unauthenticated error, so the endpoint
//! never confirms which accounts exist.

use std::sync::Arc;

use zeroize::Zeroizing;

use crate::domain::authz::CurrentUser;
use crate::domain::ports::UserRepository;
use crate::domain::validation::{FieldErrors, has_content};
use crate::domain::Error;

/// Validated login credentials.
///
/// The password buffer is zeroed when the credentials are dropped.
#[derive(Debug, Clone)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Validate raw login input.
    pub fn new(username: &str, password: &str) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        if !has_content(username) {
            errors.push("username", "required", "Le nom d'utilisateur est requis");
        }
        if password.is_empty() {
            errors.push("password", "required", "Le mot de passe est requis");
        }
        errors.finish(Self {
            username: username.trim().to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Login name.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Plaintext password, only read by the verifier.
    pub fn password(&self) -> &str {
        &self.password
    }
}

/// Verifies credentials against the account store.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
}

impl AuthService {
    /// Build the service on top of an account store.
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Authenticate the credentials and return the caller they denote.
    pub async fn authenticate(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<CurrentUser, Error> {
        let account = self
            .users
            .find_by_username(credentials.username())
            .await
            .map_err(Error::from)?;
        let Some(account) = account else {
            return Err(invalid_credentials());
        };
        if !account.password_hash.verify(credentials.password()) {
            return Err(invalid_credentials());
        }
        Ok(CurrentUser {
            id: account.id,
            username: account.username,
            role: account.role,
        })
    }
}

fn invalid_credentials() -> Error {
    Error::unauthenticated("Identifiants invalides")
}
