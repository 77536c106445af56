//! Account management behind the authorization gate.
//!
//! Every operation requires the admin capability. Passwords are hashed
//! here, after validation and before the store sees the record.

use std::sync::Arc;

use crate::domain::authz::{Capability, CurrentUser, authorize};
use crate::domain::password::PasswordHash;
use crate::domain::ports::{NewUser, UserRepository};
use crate::domain::user::{User, UserDraft, UserPayload};
use crate::domain::validation::ValidationMode;
use crate::domain::Error;

/// Account use cases, admin-only.
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
}

impl UserService {
    /// Build the service on top of an account store.
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// List every account.
    pub async fn list(&self, caller: Option<&CurrentUser>) -> Result<Vec<User>, Error> {
        authorize(caller, Capability::Admin)?;
        self.users.list_all().await.map_err(Error::from)
    }

    /// Validate, hash, and persist a new account.
    pub async fn create(
        &self,
        caller: Option<&CurrentUser>,
        payload: &UserPayload,
    ) -> Result<User, Error> {
        authorize(caller, Capability::Admin)?;
        let draft = UserDraft::validate(payload, ValidationMode::Create)?;
        let Some(password) = draft.password else {
            // Create-mode validation guarantees a password.
            return Err(Error::internal("Erreur interne"));
        };
        let password_hash = PasswordHash::from_plain(&password)
            .map_err(|_| Error::internal("Erreur interne"))?;
        let record = NewUser {
            username: draft.username,
            password_hash,
            role: draft.role,
        };
        self.users.insert(record).await.map_err(Error::from)
    }

    /// Delete an account.
    pub async fn delete(&self, caller: Option<&CurrentUser>, id: i32) -> Result<(), Error> {
        authorize(caller, Capability::Admin)?;
        self.users.delete(id).await.map_err(Error::from)
    }
}
