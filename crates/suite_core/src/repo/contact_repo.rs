//! Contact repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide keyed CRUD APIs over the `contacts` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - A duplicate `name` on insert is an expected outcome (`Ok(false)`), not
//!   an error. Every other SQLite failure propagates.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Update is read-modify-write inside one IMMEDIATE transaction; an empty
//!   update only checks that the record exists.
//! - Error messages never carry contact field values.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::contact::{Contact, ContactUpdate};
use log::debug;
use rusqlite::{
    params, Connection, ErrorCode, OptionalExtension, Row, Transaction, TransactionBehavior,
};
use std::error::Error;
use std::fmt::{Display, Formatter};

const CONTACT_SELECT_SQL: &str = "SELECT name, phone, email FROM contacts";
const CONTACT_COLUMNS: [&str; 3] = ["name", "phone", "email"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for contact persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted contact data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
            Self::UninitializedConnection { .. } => None,
            Self::MissingRequiredTable(_) => None,
            Self::MissingRequiredColumn { .. } => None,
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

/// Repository interface for contact CRUD operations.
///
/// Boolean results report business outcomes: `false` means the key was
/// already taken (add) or not present (delete, update).
pub trait ContactRepository {
    fn add_contact(&self, contact: &Contact) -> RepoResult<bool>;
    fn get_contact(&self, name: &str) -> RepoResult<Option<Contact>>;
    /// Returns every contact ordered by `name` ascending.
    fn list_contacts(&self) -> RepoResult<Vec<Contact>>;
    fn delete_contact(&self, name: &str) -> RepoResult<bool>;
    fn update_contact(&self, name: &str, update: &ContactUpdate) -> RepoResult<bool>;
}

/// SQLite-backed contact repository over a borrowed connection.
pub struct SqliteContactRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteContactRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations were not applied.
    /// - `MissingRequiredTable`/`MissingRequiredColumn` when the schema does
    ///   not have the `contacts` shape.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_contact_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl ContactRepository for SqliteContactRepository<'_> {
    fn add_contact(&self, contact: &Contact) -> RepoResult<bool> {
        let inserted = self.conn.execute(
            "INSERT INTO contacts (name, phone, email) VALUES (?1, ?2, ?3);",
            params![
                contact.name.as_str(),
                contact.phone.as_str(),
                contact.email.as_deref()
            ],
        );

        match inserted {
            Ok(_) => Ok(true),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                debug!("event=contact_add module=repo status=duplicate");
                Ok(false)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn get_contact(&self, name: &str) -> RepoResult<Option<Contact>> {
        select_contact(self.conn, name)
    }

    fn list_contacts(&self) -> RepoResult<Vec<Contact>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CONTACT_SELECT_SQL} ORDER BY name ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut contacts = Vec::new();

        while let Some(row) = rows.next()? {
            contacts.push(parse_contact_row(row)?);
        }

        Ok(contacts)
    }

    fn delete_contact(&self, name: &str) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM contacts WHERE name = ?1;", [name])?;
        Ok(changed > 0)
    }

    fn update_contact(&self, name: &str, update: &ContactUpdate) -> RepoResult<bool> {
        if update.is_empty() {
            return Ok(select_contact(self.conn, name)?.is_some());
        }

        // Write lock must be taken before the read so the busy timeout applies.
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;

        let Some(mut contact) = select_contact(&tx, name)? else {
            return Ok(false);
        };
        contact.apply(update);

        let changed = tx.execute(
            "UPDATE contacts SET phone = ?1, email = ?2 WHERE name = ?3;",
            params![contact.phone.as_str(), contact.email.as_deref(), name],
        )?;
        tx.commit()?;

        Ok(changed > 0)
    }
}

fn select_contact(conn: &Connection, name: &str) -> RepoResult<Option<Contact>> {
    let mut stmt = conn.prepare(&format!("{CONTACT_SELECT_SQL} WHERE name = ?1;"))?;
    let row = stmt
        .query_row([name], |row| {
            Ok((
                row.get::<_, String>("name")?,
                row.get::<_, Option<String>>("phone")?,
                row.get::<_, Option<String>>("email")?,
            ))
        })
        .optional()?;

    row.map(|(name, phone, email)| build_contact(name, phone, email))
        .transpose()
}

fn parse_contact_row(row: &Row<'_>) -> RepoResult<Contact> {
    build_contact(row.get("name")?, row.get("phone")?, row.get("email")?)
}

fn build_contact(name: String, phone: Option<String>, email: Option<String>) -> RepoResult<Contact> {
    let phone =
        phone.ok_or_else(|| RepoError::InvalidData("contacts.phone is NULL".to_string()))?;

    Ok(Contact { name, phone, email })
}

fn ensure_contact_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, "contacts")? {
        return Err(RepoError::MissingRequiredTable("contacts"));
    }

    for column in CONTACT_COLUMNS {
        if !table_has_column(conn, "contacts", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "contacts",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
