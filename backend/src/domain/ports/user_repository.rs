//! Persistence port for user accounts.

use async_trait::async_trait;

use crate::domain::password::PasswordHash;
use crate::domain::ports::repository::RepositoryError;
use crate::domain::role::Role;
use crate::domain::user::User;

/// Account record ready for insertion, password already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Login name, unique across accounts.
    pub username: String,
    /// PHC-encoded password hash.
    pub password_hash: PasswordHash,
    /// Granted role.
    pub role: Role,
}

/// Store of user accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new account; duplicate usernames are rejected.
    async fn insert(&self, record: NewUser) -> Result<User, RepositoryError>;

    /// Fetch account `id` when it exists.
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepositoryError>;

    /// Fetch the account with this login name when it exists.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError>;

    /// Every stored account, oldest first.
    async fn list_all(&self) -> Result<Vec<User>, RepositoryError>;

    /// Delete account `id`.
    async fn delete(&self, id: i32) -> Result<(), RepositoryError>;
}
