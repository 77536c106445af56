//! Outbound ports of the domain.
//!
//! Adapters implement these traits; the domain services depend only on the
//! trait objects. Mock implementations are generated for tests.

mod programme_repository;
mod projet_repository;
mod repository;
mod session_resolver;
mod user_repository;

pub use programme_repository::ProgrammeRepository;
pub use projet_repository::ProjetRepository;
pub use repository::{EntityKind, RepositoryError};
pub use session_resolver::SessionResolver;
pub use user_repository::{NewUser, UserRepository};

#[cfg(test)]
pub use programme_repository::MockProgrammeRepository;
#[cfg(test)]
pub use projet_repository::MockProjetRepository;
#[cfg(test)]
pub use session_resolver::MockSessionResolver;
#[cfg(test)]
pub use user_repository::MockUserRepository;
