//! Contact store schema migrations.
//!
//! # Invariants
//! - Versions are strictly increasing and mirrored to `PRAGMA user_version`.
//! - All pending migrations commit together or not at all.
//! - An unversioned file that already holds a `contacts` table (written by
//!   the previous tooling) is adopted in place, rows untouched.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: include_str!("0001_init.sql"),
}];

/// What [`apply_migrations`] did to a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationOutcome {
    UpToDate { version: u32 },
    Applied {
        from_version: u32,
        to_version: u32,
        /// The file predates versioning but already had a `contacts` table.
        adopted_legacy: bool,
    },
}

/// Returns the latest migration version known by this binary.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Brings the connection's schema to [`latest_version`].
pub fn apply_migrations(conn: &mut Connection) -> DbResult<MigrationOutcome> {
    let from_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let to_version = latest_version();

    match from_version.cmp(&to_version) {
        Ordering::Greater => Err(DbError::UnsupportedSchemaVersion {
            db_version: from_version,
            latest_supported: to_version,
        }),
        Ordering::Equal => Ok(MigrationOutcome::UpToDate {
            version: from_version,
        }),
        Ordering::Less => {
            let adopted_legacy = from_version == 0 && has_contacts_table(conn)?;

            let tx = conn.transaction()?;
            for migration in MIGRATIONS.iter().filter(|m| m.version > from_version) {
                tx.execute_batch(migration.sql)
                    .and_then(|()| tx.pragma_update(None, "user_version", migration.version))
                    .map_err(|source| DbError::Migration {
                        version: migration.version,
                        source,
                    })?;
            }
            tx.commit()?;

            if adopted_legacy {
                info!("event=db_adopt_legacy module=db status=ok to_version={to_version}");
            }
            info!(
                "event=db_migrate module=db status=ok from_version={from_version} to_version={to_version}"
            );
            Ok(MigrationOutcome::Applied {
                from_version,
                to_version,
                adopted_legacy,
            })
        }
    }
}

fn has_contacts_table(conn: &Connection) -> DbResult<bool> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'contacts');",
        [],
        |row| row.get(0),
    )?;
    Ok(exists)
}
