//! Shared persistence-port vocabulary.

use serde_json::json;

use crate::domain::Error;

/// Kind of persisted entity, used in not-found and conflict reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Programme record.
    Programme,
    /// Projet record.
    Projet,
    /// User account.
    User,
}

impl EntityKind {
    /// Stable identifier used in error details.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Programme => "programme",
            Self::Projet => "projet",
            Self::User => "user",
        }
    }

    /// Fixed-locale not-found message for this kind.
    const fn not_found_message(self) -> &'static str {
        match self {
            Self::Programme => "Programme introuvable",
            Self::Projet => "Projet introuvable",
            Self::User => "Utilisateur introuvable",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failures reported by the persistence ports.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    /// No record with this identifier.
    #[error("{entity} {id} not found")]
    NotFound {
        /// Kind of missing entity.
        entity: EntityKind,
        /// Requested identifier.
        id: i32,
    },
    /// The operation would break a reference between records.
    #[error("referential conflict: {detail}")]
    ReferentialConflict {
        /// Fixed-locale description of the conflict.
        detail: String,
    },
    /// A uniqueness constraint was violated.
    #[error("duplicate: {detail}")]
    Duplicate {
        /// Fixed-locale description of the duplicate.
        detail: String,
    },
    /// The backing store failed.
    #[error("backend failure: {message}")]
    Backend {
        /// Store-specific diagnostic, not shown to clients.
        message: String,
    },
}

impl From<RepositoryError> for Error {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::NotFound { entity, id } => {
                Self::not_found(entity.not_found_message())
                    .with_details(json!({ "entityKind": entity.as_str(), "id": id }))
            }
            RepositoryError::ReferentialConflict { detail } => {
                Self::conflict(detail).with_details(json!({ "kind": "referential" }))
            }
            RepositoryError::Duplicate { detail } => {
                Self::conflict(detail).with_details(json!({ "kind": "duplicate" }))
            }
            RepositoryError::Backend { .. } => Self::internal("Erreur interne"),
        }
    }
}
