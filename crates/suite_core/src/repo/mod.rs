//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the data access contract for contacts.
//! - Isolate SQLite query details from the store and CLI.
//!
//! # Invariants
//! - Expected business outcomes (duplicate key, missing key) are values,
//!   not errors. Transport errors are errors.

pub mod contact_repo;
