use rusqlite::Connection;
use suite_core::db::migrations::{apply_migrations, latest_version, MigrationOutcome};
use suite_core::db::{open_db, open_db_in_memory, DbError};

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "contacts");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("contacts.db");

    let conn_first = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_first), latest_version());
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    assert_table_exists(&conn_second, "contacts");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unversioned_legacy_file_is_adopted_with_rows_intact() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legacy.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE contacts (
            name TEXT PRIMARY KEY,
            phone TEXT,
            email TEXT
        );
        INSERT INTO contacts (name, phone, email) VALUES ('Ada', '555-1000', NULL);",
    )
    .unwrap();
    drop(conn);

    let mut conn = Connection::open(&path).unwrap();
    assert_eq!(
        apply_migrations(&mut conn).unwrap(),
        MigrationOutcome::Applied {
            from_version: 0,
            to_version: latest_version(),
            adopted_legacy: true,
        }
    );
    drop(conn);

    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn), latest_version());
    let phone: String = conn
        .query_row("SELECT phone FROM contacts WHERE name = 'Ada';", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(phone, "555-1000");
}

#[test]
fn fresh_connection_is_migrated_once_then_up_to_date() {
    let mut conn = Connection::open_in_memory().unwrap();

    assert_eq!(
        apply_migrations(&mut conn).unwrap(),
        MigrationOutcome::Applied {
            from_version: 0,
            to_version: latest_version(),
            adopted_legacy: false,
        }
    );
    assert_eq!(
        apply_migrations(&mut conn).unwrap(),
        MigrationOutcome::UpToDate {
            version: latest_version()
        }
    );
}

#[test]
fn failing_migration_reports_its_version_and_commits_nothing() {
    let mut conn = Connection::open_in_memory().unwrap();
    // An index occupying the name fails table creation even with IF NOT EXISTS.
    conn.execute_batch(
        "CREATE TABLE other (value TEXT);
         CREATE INDEX contacts ON other (value);",
    )
    .unwrap();

    let err = apply_migrations(&mut conn).unwrap_err();
    assert!(matches!(err, DbError::Migration { version: 1, .. }));
    assert_eq!(schema_version(&conn), 0);
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
