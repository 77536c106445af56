//! Domain layer: entities, validation, authorization, and ports.
//!
//! Everything here is transport agnostic. Inbound adapters translate HTTP
//! requests into these types and outbound adapters implement the ports.

mod auth;
mod authz;
mod enums;
mod error;
mod money;
mod password;
pub mod ports;
mod programme;
mod programme_service;
mod projet;
mod projet_service;
mod role;
mod session;
mod user;
mod user_service;
mod validation;

pub use auth::{AuthService, LoginCredentials};
pub use authz::{Capability, CurrentUser, authorize};
pub use enums::{EtatAvancement, Province, Secteur, UnknownLabelError};
pub use error::{Error, ErrorCode, ErrorValidationError};
pub use money::{Montant, ParseMontantError};
pub use password::{PasswordHash, PasswordHashError};
pub use programme::{Programme, ProgrammeDraft, ProgrammePayload};
pub use programme_service::ProgrammeService;
pub use projet::{Projet, ProjetDraft, ProjetPayload};
pub use projet_service::ProjetService;
pub use role::{ParseRoleError, Role};
pub use session::{CachedSessionResolver, SessionCache};
pub use user::{MIN_PASSWORD_LENGTH, User, UserDraft, UserPayload};
pub use user_service::UserService;
pub use validation::{DateInput, FieldError, FieldErrors, ValidationMode};
