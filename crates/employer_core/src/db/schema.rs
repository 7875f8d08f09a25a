//! The `employers` table and its version stamp.
//!
//! `PRAGMA user_version` holds [`SCHEMA_VERSION`] once the table exists. A
//! file stamped higher is refused rather than read with a guessed layout.

use super::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

/// Layout version written into `PRAGMA user_version`.
pub const SCHEMA_VERSION: u32 = 1;

// Salary is TEXT so the decimal survives unchanged.
const CREATE_EMPLOYERS_SQL: &str = "CREATE TABLE IF NOT EXISTS employers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name TEXT NOT NULL DEFAULT '',
    last_name TEXT NOT NULL DEFAULT '',
    email TEXT NOT NULL DEFAULT '',
    phone TEXT NOT NULL DEFAULT '',
    position TEXT NOT NULL DEFAULT '',
    salary TEXT NOT NULL DEFAULT '0',
    hire_date TEXT NOT NULL
);";

/// Creates the table on a fresh file and stamps it; no-op on a current one.
pub fn ensure_schema(conn: &mut Connection) -> DbResult<()> {
    let found: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if found > SCHEMA_VERSION {
        return Err(DbError::SchemaTooNew {
            found,
            supported: SCHEMA_VERSION,
        });
    }
    if found == SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn.transaction()?;
    tx.execute_batch(CREATE_EMPLOYERS_SQL)?;
    tx.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    tx.commit()?;

    info!("event=schema_create module=db status=ok version={SCHEMA_VERSION}");
    Ok(())
}
