//! Capability-based authorization checks.
//!
//! Every protected operation names the [`Capability`] it requires; the
//! single [`authorize`] gate maps it to the minimum [`Role`] and compares
//! against the caller's role. The check is pure and stateless, so the same
//! caller and capability always produce the same outcome.

use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::role::Role;
use crate::domain::Error;

/// Authenticated caller as resolved from the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    /// Server-assigned identifier.
    pub id: i32,
    /// Login name.
    pub username: String,
    /// Granted role.
    pub role: Role,
}

/// Action category a protected operation requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Consult records.
    Read,
    /// Create, modify, or delete programmes and projets.
    Edit,
    /// Manage user accounts.
    Admin,
}

impl Capability {
    /// Minimum role satisfying this capability.
    pub const fn required_role(self) -> Role {
        match self {
            Self::Read => Role::Decideur,
            Self::Edit => Role::Editeur,
            Self::Admin => Role::Admin,
        }
    }

    /// Stable identifier used in error details.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Edit => "edit",
            Self::Admin => "admin",
        }
    }
}

/// Check that `caller` may exercise `capability`.
///
/// An anonymous caller is always [`ErrorCode::Unauthenticated`], even when
/// the capability would have been denied anyway; an authenticated caller
/// whose role does not satisfy the requirement is
/// [`ErrorCode::Forbidden`] with the required capability in the details.
///
/// [`ErrorCode::Unauthenticated`]: crate::domain::ErrorCode::Unauthenticated
/// [`ErrorCode::Forbidden`]: crate::domain::ErrorCode::Forbidden
pub fn authorize(caller: Option<&CurrentUser>, capability: Capability) -> Result<(), Error> {
    let Some(user) = caller else {
        return Err(Error::unauthenticated("Authentification requise"));
    };
    if user.role.satisfies(capability.required_role()) {
        Ok(())
    } else {
        Err(Error::forbidden("Droits insuffisants")
            .with_details(json!({ "requiredCapability": capability.as_str() })))
    }
}
