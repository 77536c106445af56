//! Programme operations behind the authorization gate.

use std::sync::Arc;

use crate::domain::authz::{Capability, CurrentUser, authorize};
use crate::domain::ports::{EntityKind, ProgrammeRepository, RepositoryError};
use crate::domain::programme::{Programme, ProgrammeDraft, ProgrammePayload};
use crate::domain::validation::ValidationMode;
use crate::domain::Error;

/// Programme use cases: every call authorizes first, then validates, then
/// touches the store.
#[derive(Clone)]
pub struct ProgrammeService {
    programmes: Arc<dyn ProgrammeRepository>,
}

impl ProgrammeService {
    /// Build the service on top of a programme store.
    pub fn new(programmes: Arc<dyn ProgrammeRepository>) -> Self {
        Self { programmes }
    }

    /// List every programme.
    pub async fn list(&self, caller: Option<&CurrentUser>) -> Result<Vec<Programme>, Error> {
        authorize(caller, Capability::Read)?;
        self.programmes.list_all().await.map_err(Error::from)
    }

    /// Fetch one programme.
    pub async fn get(&self, caller: Option<&CurrentUser>, id: i32) -> Result<Programme, Error> {
        authorize(caller, Capability::Read)?;
        self.programmes
            .find_by_id(id)
            .await
            .map_err(Error::from)?
            .ok_or_else(|| not_found(id))
    }

    /// Validate and persist a new programme.
    pub async fn create(
        &self,
        caller: Option<&CurrentUser>,
        payload: &ProgrammePayload,
    ) -> Result<Programme, Error> {
        authorize(caller, Capability::Edit)?;
        let draft = ProgrammeDraft::validate(payload, ValidationMode::Create)?;
        self.programmes.insert(draft).await.map_err(Error::from)
    }

    /// Validate a patch against the stored programme and persist the merge.
    pub async fn update(
        &self,
        caller: Option<&CurrentUser>,
        id: i32,
        payload: &ProgrammePayload,
    ) -> Result<Programme, Error> {
        authorize(caller, Capability::Edit)?;
        let existing = self
            .programmes
            .find_by_id(id)
            .await
            .map_err(Error::from)?
            .ok_or_else(|| not_found(id))?;
        let draft = ProgrammeDraft::validate(payload, ValidationMode::Update(&existing))?;
        self.programmes.update(id, draft).await.map_err(Error::from)
    }

    /// Delete a programme; fails while projets still reference it.
    pub async fn delete(&self, caller: Option<&CurrentUser>, id: i32) -> Result<(), Error> {
        authorize(caller, Capability::Edit)?;
        self.programmes.delete(id).await.map_err(Error::from)
    }
}

fn not_found(id: i32) -> Error {
    Error::from(RepositoryError::NotFound {
        entity: EntityKind::Programme,
        id,
    })
}
