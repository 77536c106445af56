//! Session resolution with a last-session cache.
//!
//! The process keeps at most one resolved identity: the caller of the most
//! recent request. A hit on the same user identifier skips the account
//! lookup; logout invalidates the slot explicitly, so a logged-out identity
//! is never served from cache.

use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;

use crate::domain::authz::CurrentUser;
use crate::domain::ports::{SessionResolver, UserRepository};
use crate::domain::Error;

/// Single-slot cache holding the last resolved caller.
#[derive(Debug, Default)]
pub struct SessionCache {
    slot: RwLock<Option<CurrentUser>>,
}

impl SessionCache {
    /// Empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached caller when it matches `user_id`.
    pub fn lookup(&self, user_id: i32) -> Option<CurrentUser> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .filter(|user| user.id == user_id)
            .cloned()
    }

    /// Replace the cached caller.
    pub fn remember(&self, user: CurrentUser) {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = Some(user);
    }

    /// Drop the cached caller.
    pub fn invalidate(&self) {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

/// [`SessionResolver`] backed by the account store with the single-slot
/// cache in front.
pub struct CachedSessionResolver {
    users: Arc<dyn UserRepository>,
    cache: SessionCache,
}

impl CachedSessionResolver {
    /// Build the resolver on top of an account store.
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self {
            users,
            cache: SessionCache::new(),
        }
    }
}

#[async_trait]
impl SessionResolver for CachedSessionResolver {
    async fn resolve(&self, user_id: i32) -> Result<Option<CurrentUser>, Error> {
        if let Some(cached) = self.cache.lookup(user_id) {
            return Ok(Some(cached));
        }
        let Some(account) = self.users.find_by_id(user_id).await.map_err(Error::from)? else {
            return Ok(None);
        };
        let caller = CurrentUser {
            id: account.id,
            username: account.username,
            role: account.role,
        };
        self.cache.remember(caller.clone());
        Ok(Some(caller))
    }

    fn invalidate(&self) {
        self.cache.invalidate();
    }
}
