//! Domain model for the contact store.
//!
//! # Invariants
//! - A contact is identified by its exact, case-sensitive `name`.

pub mod contact;
