//! Terminal rendering for contact command results.
//!
//! Colors come from `colored`, which drops them when stdout is not a
//! terminal or `NO_COLOR` is set.

use colored::Colorize;
use suite_core::Contact;

pub(crate) const ADDED: &str = "Contact added successfully!";
pub(crate) const ALREADY_EXISTS: &str = "Contact already exists!";
pub(crate) const NOT_FOUND: &str = "Contact not found!";
pub(crate) const DELETED: &str = "Contact deleted successfully!";
pub(crate) const UPDATED: &str = "Contact updated successfully!";
pub(crate) const NO_CONTACTS: &str = "No contacts found!";

const LIST_HEADER: &str = "Contact List:";
const LIST_RULE_WIDTH: usize = 50;
const ENTRY_RULE_WIDTH: usize = 30;
const MISSING_FIELD: &str = "None";

/// Green on success, red on failure.
pub(crate) fn outcome(ok: bool, success: &str, failure: &str) -> String {
    if ok {
        success.green().to_string()
    } else {
        self::failure(failure)
    }
}

pub(crate) fn failure(message: &str) -> String {
    message.red().to_string()
}

pub(crate) fn contact_details(contact: &Contact) -> String {
    let email = contact.email.as_deref().unwrap_or(MISSING_FIELD);
    [
        format!("Name: {}", contact.name).yellow().to_string(),
        format!("Phone: {}", contact.phone).yellow().to_string(),
        format!("Email: {email}").yellow().to_string(),
    ]
    .join("\n")
}

pub(crate) fn contact_list(contacts: &[Contact]) -> String {
    if contacts.is_empty() {
        return failure(NO_CONTACTS);
    }

    let entry_rule = "-".repeat(ENTRY_RULE_WIDTH).cyan().to_string();
    let mut lines = vec![
        String::new(),
        LIST_HEADER.cyan().to_string(),
        "=".repeat(LIST_RULE_WIDTH).cyan().to_string(),
    ];
    for contact in contacts {
        lines.push(contact_details(contact));
        lines.push(entry_rule.clone());
    }
    lines.join("\n")
}
