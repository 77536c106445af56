//! Role model: the three application roles and their capability order.
//!
//! Roles form a total order `admin ≥ editeur ≥ decideur`. Every capability
//! check in the system goes through [`Role::satisfies`]; call sites must not
//! re-derive role comparisons inline.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Application role, ordered by capability rank.
///
/// ## Invariants
/// - `rank(decideur) = 0 < rank(editeur) = 1 < rank(admin) = 2`.
/// - A role satisfies a requirement exactly when its rank is at least the
///   required rank, so `satisfies` is reflexive and transitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Read-only access to programmes and projets.
    Decideur,
    /// May create, update, and delete programmes and projets.
    Editeur,
    /// Full access, including user management.
    Admin,
}

impl Role {
    /// Every role, in ascending rank order.
    pub const ALL: [Self; 3] = [Self::Decideur, Self::Editeur, Self::Admin];

    /// Wire representation shared with the client-side closed set.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Decideur => "decideur",
            Self::Editeur => "editeur",
            Self::Admin => "admin",
        }
    }

    const fn rank(self) -> u8 {
        match self {
            Self::Decideur => 0,
            Self::Editeur => 1,
            Self::Admin => 2,
        }
    }

    /// Whether a caller holding `self` meets the `required` role.
    pub const fn satisfies(self, required: Self) -> bool {
        self.rank() >= required.rank()
    }

    /// Any authenticated role may read.
    pub const fn can_read(self) -> bool {
        self.satisfies(Self::Decideur)
    }

    /// Editeur and above may mutate programmes and projets.
    pub const fn can_edit(self) -> bool {
        self.satisfies(Self::Editeur)
    }

    /// Only admin may manage users.
    pub const fn can_admin(self) -> bool {
        self.satisfies(Self::Admin)
    }

    /// Comma-separated accepted labels, used by validation messages.
    pub fn accepted_labels() -> String {
        Self::ALL
            .iter()
            .map(|role| role.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse error for [`Role`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRoleError {
    /// Rejected input value.
    pub input: String,
}

impl fmt::Display for ParseRoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid role: {}", self.input)
    }
}

impl std::error::Error for ParseRoleError {}

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "decideur" => Ok(Self::Decideur),
            "editeur" => Ok(Self::Editeur),
            "admin" => Ok(Self::Admin),
            _ => Err(ParseRoleError {
                input: value.to_owned(),
            }),
        }
    }
}
