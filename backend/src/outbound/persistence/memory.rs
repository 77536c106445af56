//! In-memory persistence adapter.
//!
//! Backs all three repository ports with process-local maps and serial
//! identifiers. Referential and uniqueness checks live here, behind the
//! ports, exactly where a relational store would enforce them.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::ports::{
    EntityKind, NewUser, ProgrammeRepository, ProjetRepository, RepositoryError, UserRepository,
};
use crate::domain::{Programme, ProgrammeDraft, Projet, ProjetDraft, User};

#[derive(Debug, Default)]
struct Tables {
    programmes: BTreeMap<i32, Programme>,
    projets: BTreeMap<i32, Projet>,
    users: BTreeMap<i32, User>,
    next_programme_id: i32,
    next_projet_id: i32,
    next_user_id: i32,
}

/// Process-local store implementing every repository port.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn missing(entity: EntityKind, id: i32) -> RepositoryError {
    RepositoryError::NotFound { entity, id }
}

#[async_trait]
impl ProgrammeRepository for MemoryStore {
    async fn insert(&self, draft: ProgrammeDraft) -> Result<Programme, RepositoryError> {
        let mut tables = self.write();
        tables.next_programme_id += 1;
        let now = Utc::now();
        let programme = Programme {
            id: tables.next_programme_id,
            nom: draft.nom,
            secteur: draft.secteur,
            objectif_global: draft.objectif_global,
            partenaires: draft.partenaires,
            montant_global: draft.montant_global,
            participation_region: draft.participation_region,
            date_debut: draft.date_debut,
            duree: draft.duree,
            created_at: now,
            updated_at: now,
        };
        tables.programmes.insert(programme.id, programme.clone());
        Ok(programme)
    }

    async fn update(&self, id: i32, draft: ProgrammeDraft) -> Result<Programme, RepositoryError> {
        let mut tables = self.write();
        let stored = tables
            .programmes
            .get_mut(&id)
            .ok_or_else(|| missing(EntityKind::Programme, id))?;
        stored.nom = draft.nom;
        stored.secteur = draft.secteur;
        stored.objectif_global = draft.objectif_global;
        stored.partenaires = draft.partenaires;
        stored.montant_global = draft.montant_global;
        stored.participation_region = draft.participation_region;
        stored.date_debut = draft.date_debut;
        stored.duree = draft.duree;
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn delete(&self, id: i32) -> Result<(), RepositoryError> {
        let mut tables = self.write();
        if !tables.programmes.contains_key(&id) {
            return Err(missing(EntityKind::Programme, id));
        }
        if tables.projets.values().any(|p| p.programme_id == id) {
            return Err(RepositoryError::ReferentialConflict {
                detail: "Des projets référencent encore ce programme".to_owned(),
            });
        }
        tables.programmes.remove(&id);
        Ok(())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Programme>, RepositoryError> {
        Ok(self.read().programmes.get(&id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Programme>, RepositoryError> {
        Ok(self.read().programmes.values().rev().cloned().collect())
    }
}

#[async_trait]
impl ProjetRepository for MemoryStore {
    async fn insert(&self, draft: ProjetDraft) -> Result<Projet, RepositoryError> {
        let mut tables = self.write();
        if !tables.programmes.contains_key(&draft.programme_id) {
            return Err(dangling_programme());
        }
        tables.next_projet_id += 1;
        let now = Utc::now();
        let projet = Projet {
            id: tables.next_projet_id,
            nom: draft.nom,
            objectifs: draft.objectifs,
            partenaires: draft.partenaires,
            programme_id: draft.programme_id,
            maitre_ouvrage: draft.maitre_ouvrage,
            provinces: draft.provinces,
            communes: draft.communes,
            indicateurs_qualitatifs: draft.indicateurs_qualitatifs,
            indicateurs_quantitatifs: draft.indicateurs_quantitatifs,
            etat_avancement: draft.etat_avancement,
            remarques: draft.remarques,
            montant_global: draft.montant_global,
            participation_region: draft.participation_region,
            date_debut: draft.date_debut,
            duree: draft.duree,
            created_at: now,
            updated_at: now,
        };
        tables.projets.insert(projet.id, projet.clone());
        Ok(projet)
    }

    async fn update(&self, id: i32, draft: ProjetDraft) -> Result<Projet, RepositoryError> {
        let mut tables = self.write();
        if !tables.projets.contains_key(&id) {
            return Err(missing(EntityKind::Projet, id));
        }
        if !tables.programmes.contains_key(&draft.programme_id) {
            return Err(dangling_programme());
        }
        let stored = tables
            .projets
            .get_mut(&id)
            .ok_or_else(|| missing(EntityKind::Projet, id))?;
        stored.nom = draft.nom;
        stored.objectifs = draft.objectifs;
        stored.partenaires = draft.partenaires;
        stored.programme_id = draft.programme_id;
        stored.maitre_ouvrage = draft.maitre_ouvrage;
        stored.provinces = draft.provinces;
        stored.communes = draft.communes;
        stored.indicateurs_qualitatifs = draft.indicateurs_qualitatifs;
        stored.indicateurs_quantitatifs = draft.indicateurs_quantitatifs;
        stored.etat_avancement = draft.etat_avancement;
        stored.remarques = draft.remarques;
        stored.montant_global = draft.montant_global;
        stored.participation_region = draft.participation_region;
        stored.date_debut = draft.date_debut;
        stored.duree = draft.duree;
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn delete(&self, id: i32) -> Result<(), RepositoryError> {
        let mut tables = self.write();
        tables
            .projets
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| missing(EntityKind::Projet, id))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Projet>, RepositoryError> {
        Ok(self.read().projets.get(&id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Projet>, RepositoryError> {
        Ok(self.read().projets.values().rev().cloned().collect())
    }
}

fn dangling_programme() -> RepositoryError {
    RepositoryError::ReferentialConflict {
        detail: "Le programme référencé n'existe pas".to_owned(),
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn insert(&self, record: NewUser) -> Result<User, RepositoryError> {
        let mut tables = self.write();
        if tables
            .users
            .values()
            .any(|user| user.username == record.username)
        {
            return Err(RepositoryError::Duplicate {
                detail: "Ce nom d'utilisateur existe déjà".to_owned(),
            });
        }
        tables.next_user_id += 1;
        let now = Utc::now();
        let user = User {
            id: tables.next_user_id,
            username: record.username,
            password_hash: record.password_hash,
            role: record.role,
            created_at: now,
            updated_at: now,
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepositoryError> {
        Ok(self.read().users.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .read()
            .users
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>, RepositoryError> {
        Ok(self.read().users.values().cloned().collect())
    }

    async fn delete(&self, id: i32) -> Result<(), RepositoryError> {
        let mut tables = self.write();
        tables
            .users
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| missing(EntityKind::User, id))
    }
}
