//! Persistence port for projets.

use async_trait::async_trait;

use crate::domain::ports::repository::RepositoryError;
use crate::domain::projet::{Projet, ProjetDraft};

/// Store of projet records.
///
/// The referential check against the owning programme lives behind this
/// port: inserting or re-pointing a projet at a programme that does not
/// exist is a [`RepositoryError::ReferentialConflict`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjetRepository: Send + Sync {
    /// Persist a new projet and return the stored record.
    async fn insert(&self, draft: ProjetDraft) -> Result<Projet, RepositoryError>;

    /// Replace the stored projet `id` with the draft.
    async fn update(&self, id: i32, draft: ProjetDraft) -> Result<Projet, RepositoryError>;

    /// Delete projet `id`.
    async fn delete(&self, id: i32) -> Result<(), RepositoryError>;

    /// Fetch projet `id` when it exists.
    async fn find_by_id(&self, id: i32) -> Result<Option<Projet>, RepositoryError>;

    /// Every stored projet, newest first.
    async fn list_all(&self) -> Result<Vec<Projet>, RepositoryError>;
}
