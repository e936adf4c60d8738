//! Contact record and update request.
//!
//! # Responsibility
//! - Define the one record shape persisted in `contacts`.
//! - Describe partial updates without exposing storage details.
//!
//! # Invariants
//! - `name` is the unique key; two records never share it.
//! - `phone` is always present; `email` is optional.

use serde::{Deserialize, Serialize};

/// One entry of the contact book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Unique, case-sensitive key.
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
}

impl Contact {
    /// Creates a contact with no email.
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            email: None,
        }
    }

    /// Sets the optional email, builder style.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Applies an update in place.
    ///
    /// Fields left as `None` in `update` keep their current value; there is
    /// no way to clear `email` through an update.
    pub fn apply(&mut self, update: &ContactUpdate) {
        if let Some(phone) = &update.phone {
            self.phone = phone.clone();
        }
        if let Some(email) = &update.email {
            self.email = Some(email.clone());
        }
    }
}

/// Partial update for an existing contact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactUpdate {
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl ContactUpdate {
    /// Returns whether this update would leave any record unchanged.
    pub fn is_empty(&self) -> bool {
        self.phone.is_none() && self.email.is_none()
    }
}
