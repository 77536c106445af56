//! Persistence port for programmes.

use async_trait::async_trait;

use crate::domain::ports::repository::RepositoryError;
use crate::domain::programme::{Programme, ProgrammeDraft};

/// Store of programme records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProgrammeRepository: Send + Sync {
    /// Persist a new programme and return the stored record.
    async fn insert(&self, draft: ProgrammeDraft) -> Result<Programme, RepositoryError>;

    /// Replace the stored programme `id` with the draft.
    async fn update(&self, id: i32, draft: ProgrammeDraft) -> Result<Programme, RepositoryError>;

    /// Delete programme `id`; fails while projets still reference it.
    async fn delete(&self, id: i32) -> Result<(), RepositoryError>;

    /// Fetch programme `id` when it exists.
    async fn find_by_id(&self, id: i32) -> Result<Option<Programme>, RepositoryError>;

    /// Every stored programme, newest first.
    async fn list_all(&self) -> Result<Vec<Programme>, RepositoryError>;
}
