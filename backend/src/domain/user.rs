//! User account entity, payload, and validation.
//!
//! Accounts carry the password hash, so the entity deliberately does not
//! implement `Serialize`; inbound adapters expose a dedicated response DTO
//! instead.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::ToSchema;
use zeroize::Zeroizing;

use crate::domain::password::PasswordHash;
use crate::domain::role::Role;
use crate::domain::validation::{FieldErrors, ValidationMode, has_content};

/// Minimum accepted password length, matching the client-side rule.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Persisted user account.
///
/// Not serialisable: the hash must never reach the wire.
#[derive(Debug, Clone)]
pub struct User {
    /// Server-assigned identifier.
    pub id: i32,
    /// Login name, unique across accounts.
    pub username: String,
    /// PHC-encoded password hash.
    pub password_hash: PasswordHash,
    /// Granted role.
    pub role: Role,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Untrusted account payload as sent by the client.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPayload {
    /// Login name.
    pub username: Option<String>,
    /// Plaintext password, hashed before persistence.
    pub password: Option<String>,
    /// Role label, validated against the closed set.
    pub role: Option<String>,
}

/// Normalized account record, validated and ready for persistence.
///
/// The plaintext password is wrapped in [`Zeroizing`] so it is wiped once
/// the draft is hashed and dropped; on update `None` keeps the stored hash.
#[derive(Debug, Clone)]
pub struct UserDraft {
    /// Login name (non-blank).
    pub username: String,
    /// Plaintext password to hash, absent when the patch keeps the old one.
    pub password: Option<Zeroizing<String>>,
    /// Granted role.
    pub role: Role,
}

impl UserDraft {
    /// Validate an untrusted payload into a normalized draft.
    ///
    /// Create mode requires a username and a password of at least
    /// [`MIN_PASSWORD_LENGTH`] characters; the role defaults to
    /// [`Role::Decideur`] when omitted. Update mode merges over the stored
    /// account and only re-checks the fields the patch touches.
    pub fn validate(
        payload: &UserPayload,
        mode: ValidationMode<'_, User>,
    ) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        let existing = mode.existing();

        let username = match (payload.username.as_deref(), existing) {
            (Some(value), _) => {
                if has_content(value) {
                    Some(value.trim().to_owned())
                } else {
                    errors.push("username", "required", "Le nom d'utilisateur est requis");
                    None
                }
            }
            (None, Some(user)) => Some(user.username.clone()),
            (None, None) => {
                errors.push("username", "required", "Le nom d'utilisateur est requis");
                None
            }
        };

        let password = match (payload.password.as_deref(), existing) {
            (Some(value), _) => {
                if value.chars().count() >= MIN_PASSWORD_LENGTH {
                    Some(Zeroizing::new(value.to_owned()))
                } else {
                    errors.push(
                        "password",
                        "too_short",
                        "Le mot de passe doit contenir au moins 6 caractères",
                    );
                    None
                }
            }
            // Patch without a password keeps the stored hash.
            (None, Some(_)) => None,
            (None, None) => {
                errors.push(
                    "password",
                    "required",
                    "Le mot de passe doit contenir au moins 6 caractères",
                );
                None
            }
        };

        let role = match (payload.role.as_deref(), existing) {
            (Some(value), _) => match value.parse::<Role>() {
                Ok(role) => Some(role),
                Err(_) => {
                    errors.push(
                        "role",
                        "invalid_value",
                        "Le rôle doit être admin, editeur ou decideur",
                    );
                    None
                }
            },
            (None, Some(user)) => Some(user.role),
            (None, None) => Some(Role::Decideur),
        };

        let draft = Self {
            username: username.unwrap_or_default(),
            password,
            role: role.unwrap_or(Role::Decideur),
        };
        errors.finish(draft)
    }
}
