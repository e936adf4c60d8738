//! Path-scoped contact store.
//!
//! # Responsibility
//! - Own the location of the contact store file.
//! - Run each operation on its own short-lived connection.
//!
//! # Invariants
//! - No connection outlives a single operation.
//! - The schema is current before any contact is read or written.

use crate::db::open_db;
use crate::model::contact::{Contact, ContactUpdate};
use crate::repo::contact_repo::{ContactRepository, RepoResult, SqliteContactRepository};
use log::{error, info};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// File name used when no explicit store path is configured.
pub const DEFAULT_DB_FILE_NAME: &str = "contacts.db";

/// Durable contact store addressed by file path.
#[derive(Debug, Clone)]
pub struct ContactStore {
    path: PathBuf,
}

impl ContactStore {
    /// Opens the store at `path`, creating the file and schema on first use.
    ///
    /// Safe to call on every process start.
    pub fn open(path: impl Into<PathBuf>) -> RepoResult<Self> {
        let store = Self { path: path.into() };
        store.initialize()?;
        Ok(store)
    }

    /// Ensures the backing schema exists. Idempotent.
    pub fn initialize(&self) -> RepoResult<()> {
        self.run("contact_store_init", |_| Ok(()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn run<T>(
        &self,
        event: &'static str,
        op: impl FnOnce(&SqliteContactRepository<'_>) -> RepoResult<T>,
    ) -> RepoResult<T> {
        let started_at = Instant::now();
        let result = self.with_repo(op);

        match &result {
            Ok(_) => info!(
                "event={event} module=store status=ok duration_ms={}",
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event={event} module=store status=error duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            ),
        }

        result
    }

    fn with_repo<T>(
        &self,
        op: impl FnOnce(&SqliteContactRepository<'_>) -> RepoResult<T>,
    ) -> RepoResult<T> {
        let conn = open_db(&self.path)?;
        let repo = SqliteContactRepository::try_new(&conn)?;
        op(&repo)
    }
}

impl ContactRepository for ContactStore {
    fn add_contact(&self, contact: &Contact) -> RepoResult<bool> {
        self.run("contact_add", |repo| repo.add_contact(contact))
    }

    fn get_contact(&self, name: &str) -> RepoResult<Option<Contact>> {
        self.run("contact_get", |repo| repo.get_contact(name))
    }

    fn list_contacts(&self) -> RepoResult<Vec<Contact>> {
        self.run("contact_list", |repo| repo.list_contacts())
    }

    fn delete_contact(&self, name: &str) -> RepoResult<bool> {
        self.run("contact_delete", |repo| repo.delete_contact(name))
    }

    fn update_contact(&self, name: &str, update: &ContactUpdate) -> RepoResult<bool> {
        self.run("contact_update", |repo| repo.update_contact(name, update))
    }
}
