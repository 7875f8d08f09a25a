use employer_core::db::schema::SCHEMA_VERSION;
use employer_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::Connection;

fn employer_columns(conn: &Connection) -> Vec<String> {
    let mut stmt = conn.prepare("PRAGMA table_info(employers);").unwrap();
    stmt.query_map([], |row| row.get::<_, String>("name"))
        .unwrap()
        .map(|name| name.unwrap())
        .collect()
}

fn stamped_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

#[test]
fn fresh_store_has_exactly_the_record_columns() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(
        employer_columns(&conn),
        vec![
            "id",
            "first_name",
            "last_name",
            "email",
            "phone",
            "position",
            "salary",
            "hire_date",
        ]
    );
    assert_eq!(stamped_version(&conn), SCHEMA_VERSION);
}

#[test]
fn id_column_is_autoincrement_primary_key() {
    let conn = open_db_in_memory().unwrap();
    let sql: String = conn
        .query_row(
            "SELECT sql FROM sqlite_master WHERE type = 'table' AND name = 'employers';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert!(sql.contains("id INTEGER PRIMARY KEY AUTOINCREMENT"));
}

#[test]
fn hire_date_is_the_only_column_without_a_default() {
    let conn = open_db_in_memory().unwrap();
    conn.execute("INSERT INTO employers (hire_date) VALUES ('2024-01-01');", [])
        .unwrap();
    let (first_name, salary): (String, String) = conn
        .query_row(
            "SELECT first_name, salary FROM employers WHERE id = 1;",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(first_name, "");
    assert_eq!(salary, "0");

    let missing_date = conn.execute("INSERT INTO employers (first_name) VALUES ('Ana');", []);
    assert!(missing_date.is_err());
}

#[test]
fn reopening_a_current_file_keeps_rows_and_stamp() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roster.sqlite3");

    let conn = open_db(&path).unwrap();
    conn.execute("INSERT INTO employers (hire_date) VALUES ('2024-01-01');", [])
        .unwrap();
    drop(conn);

    let conn = open_db(&path).unwrap();
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM employers;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
    assert_eq!(stamped_version(&conn), SCHEMA_VERSION);
}

#[test]
fn file_stamped_by_a_newer_build_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("newer.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.pragma_update(None, "user_version", SCHEMA_VERSION + 1)
        .unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::SchemaTooNew { found, supported } => {
            assert_eq!(found, SCHEMA_VERSION + 1);
            assert_eq!(supported, SCHEMA_VERSION);
        }
        other => panic!("unexpected error: {other}"),
    }

    let untouched = Connection::open(&path).unwrap();
    let tables: i64 = untouched
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE name = 'employers';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(tables, 0);
}
