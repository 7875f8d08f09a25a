//! Employer use-case service.
//!
//! # Responsibility
//! - Provide the five roster operations for transport callers.
//! - Map repository outcomes onto the caller-facing error taxonomy.
//!
//! # Invariants
//! - Every call reads from or writes to the repository; nothing is cached.
//! - An update whose payload id differs from the target id never reaches
//!   the repository.
//! - No field validation happens here; payloads are forwarded as supplied.

use crate::model::employer::{Employer, EmployerId, EmployerPayload};
use crate::repo::employer_repo::{EmployerRepository, RepoError};
use log::{debug, error, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Caller-facing failure of a roster operation.
#[derive(Debug)]
pub enum ServiceError {
    /// The referenced id does not exist at the time of the call.
    NotFound(EmployerId),
    /// Update payload id disagrees with the targeted id.
    IdentifierMismatch {
        path_id: EmployerId,
        payload_id: Option<EmployerId>,
    },
    /// Persistence is unavailable or returned undecodable data.
    Store(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "employer not found: {id}"),
            Self::IdentifierMismatch {
                path_id,
                payload_id: Some(payload_id),
            } => write!(
                f,
                "payload id {payload_id} does not match target id {path_id}"
            ),
            Self::IdentifierMismatch {
                path_id,
                payload_id: None,
            } => write!(f, "payload id is missing for target id {path_id}"),
            Self::Store(err) => write!(f, "store failure: {err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::NotFound(_) | Self::IdentifierMismatch { .. } => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
            other => Self::Store(other),
        }
    }
}

impl ServiceError {
    /// Stable machine-readable code used in logs.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::IdentifierMismatch { .. } => "identifier_mismatch",
            Self::Store(_) => "store_failure",
        }
    }
}

/// Use-case service over an employer repository.
pub struct EmployerService<R: EmployerRepository> {
    repo: R,
}

impl<R: EmployerRepository> EmployerService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns the current roster snapshot, possibly empty.
    pub fn list_employers(&self) -> ServiceResult<Vec<Employer>> {
        let employers = self.repo.list_employers().map_err(log_failure("list", None))?;
        debug!(
            "event=employer_list module=service status=ok count={}",
            employers.len()
        );
        Ok(employers)
    }

    /// Returns one record or `NotFound`.
    pub fn get_employer(&self, id: EmployerId) -> ServiceResult<Employer> {
        self.repo
            .get_employer(id)
            .map_err(log_failure("get", Some(id)))?
            .ok_or(ServiceError::NotFound(id))
    }

    /// Stores the payload as a new record and returns it with its assigned id.
    ///
    /// Any `id` in the payload is ignored.
    pub fn create_employer(&self, payload: EmployerPayload) -> ServiceResult<Employer> {
        let created = self
            .repo
            .insert_employer(&payload.fields)
            .map_err(log_failure("create", None))?;
        debug!(
            "event=employer_create module=service status=ok id={}",
            created.id
        );
        Ok(created)
    }

    /// Replaces every field of the record at `id`.
    ///
    /// # Contract
    /// - `payload.id` must equal `id`, otherwise `IdentifierMismatch` and the
    ///   store is untouched.
    /// - Concurrent updates to one id are last-write-wins.
    pub fn update_employer(&self, id: EmployerId, payload: EmployerPayload) -> ServiceResult<()> {
        if payload.id != Some(id) {
            warn!(
                "event=employer_update module=service status=error error_code=identifier_mismatch id={}",
                id
            );
            return Err(ServiceError::IdentifierMismatch {
                path_id: id,
                payload_id: payload.id,
            });
        }

        self.repo
            .replace_employer(id, &payload.fields)
            .map_err(log_failure("update", Some(id)))?;
        debug!("event=employer_update module=service status=ok id={id}");
        Ok(())
    }

    /// Removes the record at `id`; a second delete of the same id is `NotFound`.
    pub fn delete_employer(&self, id: EmployerId) -> ServiceResult<()> {
        self.repo
            .delete_employer(id)
            .map_err(log_failure("delete", Some(id)))?;
        debug!("event=employer_delete module=service status=ok id={id}");
        Ok(())
    }
}

fn log_failure(
    operation: &'static str,
    id: Option<EmployerId>,
) -> impl FnOnce(RepoError) -> ServiceError {
    move |err| {
        let err = ServiceError::from(err);
        let id = id.map_or_else(|| "-".to_string(), |id| id.to_string());
        match &err {
            ServiceError::Store(source) => error!(
                "event=employer_{operation} module=service status=error error_code={} id={} error={}",
                err.code(),
                id,
                source
            ),
            _ => debug!(
                "event=employer_{operation} module=service status=error error_code={} id={}",
                err.code(),
                id
            ),
        }
        err
    }
}
