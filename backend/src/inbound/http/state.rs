//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain services and ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::SessionResolver;
use crate::domain::{AuthService, ProgrammeService, ProjetService, UserService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Credential verification.
    pub auth: AuthService,
    /// Session-cookie resolution.
    pub sessions: Arc<dyn SessionResolver>,
    /// Programme use cases.
    pub programmes: ProgrammeService,
    /// Projet use cases.
    pub projets: ProjetService,
    /// Account management use cases.
    pub users: UserService,
}
