//! Employer repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide keyed storage over the canonical `employers` table.
//! - Own identity assignment for new records.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Ids come from `AUTOINCREMENT` and are never handed out twice for one file.
//! - `replace_employer`/`delete_employer` report `NotFound` instead of silently
//!   succeeding when no row matched.
//! - Read paths reject undecodable rows instead of masking them.

use crate::db::DbError;
use crate::model::employer::{Employer, EmployerDraft, EmployerId};
use rusqlite::{params, Connection, Row};
use rust_decimal::Decimal;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const EMPLOYER_SELECT_SQL: &str = "SELECT
    id,
    first_name,
    last_name,
    email,
    phone,
    position,
    salary,
    hire_date
FROM employers";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for employer persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(EmployerId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "employer not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted employer data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Keyed store of employer records.
///
/// Each method is a single SQL statement, so every mutation is atomic on its
/// own. Nothing orders two calls against each other.
pub trait EmployerRepository {
    /// Returns every current record in insertion order.
    fn list_employers(&self) -> RepoResult<Vec<Employer>>;
    /// Exact-match lookup; `None` when the id does not exist.
    fn get_employer(&self, id: EmployerId) -> RepoResult<Option<Employer>>;
    /// Persists a new record and returns it with its assigned id.
    fn insert_employer(&self, draft: &EmployerDraft) -> RepoResult<Employer>;
    /// Overwrites every field of an existing record.
    fn replace_employer(&self, id: EmployerId, draft: &EmployerDraft) -> RepoResult<()>;
    /// Removes an existing record.
    fn delete_employer(&self, id: EmployerId) -> RepoResult<()>;
}

/// SQLite-backed employer repository.
pub struct SqliteEmployerRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEmployerRepository<'conn> {
    /// Wraps a connection previously returned by `open_db`/`open_db_in_memory`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl EmployerRepository for SqliteEmployerRepository<'_> {
    fn list_employers(&self) -> RepoResult<Vec<Employer>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EMPLOYER_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut employers = Vec::new();

        while let Some(row) = rows.next()? {
            employers.push(parse_employer_row(row)?);
        }

        Ok(employers)
    }

    fn get_employer(&self, id: EmployerId) -> RepoResult<Option<Employer>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EMPLOYER_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_employer_row(row)?));
        }

        Ok(None)
    }

    fn insert_employer(&self, draft: &EmployerDraft) -> RepoResult<Employer> {
        self.conn.execute(
            "INSERT INTO employers (
                first_name,
                last_name,
                email,
                phone,
                position,
                salary,
                hire_date
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                draft.first_name.as_str(),
                draft.last_name.as_str(),
                draft.email.as_str(),
                draft.phone.as_str(),
                draft.position.as_str(),
                draft.salary.to_string(),
                draft.hire_date.as_str(),
            ],
        )?;

        // Connection is held exclusively for the whole call.
        let id = self.conn.last_insert_rowid();
        Ok(Employer::from_draft(id, draft.clone()))
    }

    fn replace_employer(&self, id: EmployerId, draft: &EmployerDraft) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE employers
             SET
                first_name = ?1,
                last_name = ?2,
                email = ?3,
                phone = ?4,
                position = ?5,
                salary = ?6,
                hire_date = ?7
             WHERE id = ?8;",
            params![
                draft.first_name.as_str(),
                draft.last_name.as_str(),
                draft.email.as_str(),
                draft.phone.as_str(),
                draft.position.as_str(),
                draft.salary.to_string(),
                draft.hire_date.as_str(),
                id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn delete_employer(&self, id: EmployerId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM employers WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_employer_row(row: &Row<'_>) -> RepoResult<Employer> {
    let id: EmployerId = row.get("id")?;

    let salary_text: String = row.get("salary")?;
    let salary = Decimal::from_str(&salary_text).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid salary value `{salary_text}` in employers.salary for id {id}"
        ))
    })?;

    Ok(Employer {
        id,
        fields: EmployerDraft {
            first_name: row.get("first_name")?,
            last_name: row.get("last_name")?,
            email: row.get("email")?,
            phone: row.get("phone")?,
            position: row.get("position")?,
            salary,
            hire_date: row.get("hire_date")?,
        },
    })
}
