//! Contact store core for the `suite` toolbox.
//! This crate owns the record model, its SQLite persistence and logging.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod store;

pub use logging::{default_log_level, init_logging};
pub use model::contact::{Contact, ContactUpdate};
pub use repo::contact_repo::{ContactRepository, RepoError, RepoResult, SqliteContactRepository};
pub use store::{ContactStore, DEFAULT_DB_FILE_NAME};
