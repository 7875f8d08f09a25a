//! Core domain logic for the employee roster.
//! This crate is the single source of truth for the record identity and
//! persistence contract.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{
    active_logging, default_level, init_logging, LogError, LogSettings, LogTarget,
};
pub use model::employer::{Employer, EmployerDraft, EmployerId, EmployerPayload};
pub use repo::employer_repo::{
    EmployerRepository, RepoError, RepoResult, SqliteEmployerRepository,
};
pub use service::employer_service::{EmployerService, ServiceError, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
