//! Projet operations behind the authorization gate.

use std::sync::Arc;

use crate::domain::authz::{Capability, CurrentUser, authorize};
use crate::domain::ports::{EntityKind, ProjetRepository, RepositoryError};
use crate::domain::projet::{Projet, ProjetDraft, ProjetPayload};
use crate::domain::validation::ValidationMode;
use crate::domain::Error;

/// Projet use cases: authorize, validate, then touch the store.
#[derive(Clone)]
pub struct ProjetService {
    projets: Arc<dyn ProjetRepository>,
}

impl ProjetService {
    /// Build the service on top of a projet store.
    pub fn new(projets: Arc<dyn ProjetRepository>) -> Self {
        Self { projets }
    }

    /// List every projet.
    pub async fn list(&self, caller: Option<&CurrentUser>) -> Result<Vec<Projet>, Error> {
        authorize(caller, Capability::Read)?;
        self.projets.list_all().await.map_err(Error::from)
    }

    /// Fetch one projet.
    pub async fn get(&self, caller: Option<&CurrentUser>, id: i32) -> Result<Projet, Error> {
        authorize(caller, Capability::Read)?;
        self.projets
            .find_by_id(id)
            .await
            .map_err(Error::from)?
            .ok_or_else(|| not_found(id))
    }

    /// Validate and persist a new projet.
    ///
    /// The store checks the programme reference; a dangling one comes back
    /// as a conflict, not a validation error.
    pub async fn create(
        &self,
        caller: Option<&CurrentUser>,
        payload: &ProjetPayload,
    ) -> Result<Projet, Error> {
        authorize(caller, Capability::Edit)?;
        let draft = ProjetDraft::validate(payload, ValidationMode::Create)?;
        self.projets.insert(draft).await.map_err(Error::from)
    }

    /// Validate a patch against the stored projet and persist the merge.
    pub async fn update(
        &self,
        caller: Option<&CurrentUser>,
        id: i32,
        payload: &ProjetPayload,
    ) -> Result<Projet, Error> {
        authorize(caller, Capability::Edit)?;
        let existing = self
            .projets
            .find_by_id(id)
            .await
            .map_err(Error::from)?
            .ok_or_else(|| not_found(id))?;
        let draft = ProjetDraft::validate(payload, ValidationMode::Update(&existing))?;
        self.projets.update(id, draft).await.map_err(Error::from)
    }

    /// Delete a projet.
    pub async fn delete(&self, caller: Option<&CurrentUser>, id: i32) -> Result<(), Error> {
        authorize(caller, Capability::Edit)?;
        self.projets.delete(id).await.map_err(Error::from)
    }
}

fn not_found(id: i32) -> Error {
    Error::from(RepositoryError::NotFound {
        entity: EntityKind::Projet,
        id,
    })
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::enums::{EtatAvancement, Province};
    use crate::domain::ports::MockProjetRepository;
    use crate::domain::role::Role;
    use crate::domain::ErrorCode;
    use chrono::{TimeZone, Utc};

    fn caller(role: Role) -> CurrentUser {
        CurrentUser {
            id: 1,
            username: "aicha".to_owned(),
            role,
        }
    }

    fn stored_projet(id: i32) -> Projet {
        let created = Utc
            .with_ymd_and_hms(2024, 3, 5, 8, 30, 0)
            .single()
            .expect("timestamp");
        Projet {
            id,
            nom: "Unité de valorisation".to_owned(),
            objectifs: None,
            partenaires: None,
            programme_id: 3,
            maitre_ouvrage: None,
            provinces: vec![Province::Tiznit],
            communes: None,
            indicateurs_qualitatifs: None,
            indicateurs_quantitatifs: None,
            etat_avancement: EtatAvancement::Planifie,
            remarques: None,
            montant_global: None,
            participation_region: None,
            date_debut: None,
            duree: None,
            created_at: created,
            updated_at: created,
        }
    }

    fn valid_payload() -> ProjetPayload {
        ProjetPayload {
            nom: Some("Port de pêche de Tifnit".to_owned()),
            programme_id: Some(3),
            etat_avancement: Some("En cours".to_owned()),
            ..ProjetPayload::default()
        }
    }

    #[actix_rt::test]
    async fn decideur_cannot_delete() {
        let projets = MockProjetRepository::new();
        let service = ProjetService::new(Arc::new(projets));
        let user = caller(Role::Decideur);

        let error = service.delete(Some(&user), 11).await.expect_err("denied");
        assert_eq!(error.code(), ErrorCode::Forbidden);
    }

    #[actix_rt::test]
    async fn create_with_a_dangling_programme_is_a_conflict() {
        let mut projets = MockProjetRepository::new();
        projets.expect_insert().returning(|_| {
            Err(RepositoryError::ReferentialConflict {
                detail: "Le programme référencé n'existe pas".to_owned(),
            })
        });
        let service = ProjetService::new(Arc::new(projets));
        let user = caller(Role::Editeur);

        let error = service
            .create(Some(&user), &valid_payload())
            .await
            .expect_err("dangling reference");
        assert_eq!(error.code(), ErrorCode::Conflict);
    }

    #[actix_rt::test]
    async fn create_persists_a_validated_draft() {
        let mut projets = MockProjetRepository::new();
        projets
            .expect_insert()
            .withf(|draft| draft.programme_id == 3)
            .returning(|draft| {
                let mut stored = stored_projet(11);
                stored.nom = draft.nom;
                stored.etat_avancement = draft.etat_avancement;
                Ok(stored)
            });
        let service = ProjetService::new(Arc::new(projets));
        let user = caller(Role::Editeur);

        let created = service
            .create(Some(&user), &valid_payload())
            .await
            .expect("create succeeds");
        assert_eq!(created.etat_avancement, EtatAvancement::EnCours);
    }

    #[actix_rt::test]
    async fn update_merges_over_the_stored_record() {
        let mut projets = MockProjetRepository::new();
        projets
            .expect_find_by_id()
            .returning(|id| Ok(Some(stored_projet(id))));
        projets
            .expect_update()
            .withf(|_, draft| {
                draft.nom == "Unité de valorisation"
                    && draft.etat_avancement == EtatAvancement::Termine
            })
            .returning(|id, draft| {
                let mut stored = stored_projet(id);
                stored.etat_avancement = draft.etat_avancement;
                Ok(stored)
            });
        let service = ProjetService::new(Arc::new(projets));
        let user = caller(Role::Admin);

        let patch = ProjetPayload {
            etat_avancement: Some("Terminé".to_owned()),
            ..ProjetPayload::default()
        };
        let updated = service
            .update(Some(&user), 11, &patch)
            .await
            .expect("update succeeds");
        assert_eq!(updated.etat_avancement, EtatAvancement::Termine);
    }

    #[actix_rt::test]
    async fn missing_projets_surface_as_not_found() {
        let mut projets = MockProjetRepository::new();
        projets.expect_find_by_id().returning(|_| Ok(None));
        let service = ProjetService::new(Arc::new(projets));
        let user = caller(Role::Editeur);

        let error = service
            .update(Some(&user), 404, &valid_payload())
            .await
            .expect_err("missing");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }
}
