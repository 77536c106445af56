//! Session-resolution port.
//!
//! Inbound adapters hold only an opaque user identifier in the session
//! cookie; this port turns it back into a [`CurrentUser`]. Implementations
//! may cache the last resolved session, so logout must call
//! [`SessionResolver::invalidate`] to drop any cached identity.

use async_trait::async_trait;

use crate::domain::authz::CurrentUser;
use crate::domain::Error;

/// Resolves session identifiers into authenticated callers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionResolver: Send + Sync {
    /// Resolve `user_id` into the caller it denotes, `None` when the
    /// account no longer exists.
    async fn resolve(&self, user_id: i32) -> Result<Option<CurrentUser>, Error>;

    /// Drop any cached identity. Called on logout.
    fn invalidate(&self);
}
