//! Shared request state.
//!
//! # Responsibility
//! - Own the single store connection for the lifetime of the server.
//! - Run service calls off the async executor.
//!
//! # Invariants
//! - The connection is locked for exactly one service call at a time, so
//!   every store operation is atomic with respect to other requests.

use crate::error::ApiError;
use employer_core::{EmployerService, ServiceResult, SqliteEmployerRepository};
use log::{error, warn};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

/// Service type handed to request closures.
pub type SqliteEmployerService<'conn> = EmployerService<SqliteEmployerRepository<'conn>>;

#[derive(Clone)]
pub struct AppState {
    conn: Arc<Mutex<Connection>>,
}

impl AppState {
    /// Wraps a connection already opened through `employer_core::db`.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Runs one service call on the blocking pool.
    ///
    /// A fresh repository and service are built per call; nothing read here
    /// outlives the call.
    pub async fn with_service<T, F>(&self, f: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: for<'conn> FnOnce(&SqliteEmployerService<'conn>) -> ServiceResult<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        let joined = tokio::task::spawn_blocking(move || {
            let guard = conn.lock().unwrap_or_else(|poisoned| {
                // Each store call is one statement; a panic cannot leave a partial write.
                warn!("event=store_lock module=http status=recovered error_code=lock_poisoned");
                conn.clear_poison();
                poisoned.into_inner()
            });
            let service = EmployerService::new(SqliteEmployerRepository::new(&guard));
            f(&service).map_err(ApiError::from)
        })
        .await;

        match joined {
            Ok(result) => result,
            Err(err) => {
                error!(
                    "event=store_call module=http status=error error_code=task_join_failed error={}",
                    err
                );
                Err(ApiError::Internal)
            }
        }
    }
}
