//! CLI command definitions, routing, and logging setup.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{eyre, Result};
use log::debug;
use suite_core::{
    default_log_level, Contact, ContactRepository, ContactStore, ContactUpdate,
    DEFAULT_DB_FILE_NAME,
};

use crate::output;

/// A suite of useful CLI tools.
#[derive(Parser)]
#[command(name = "suite", version, about = "A suite of useful CLI tools.", long_about = None)]
pub(crate) struct Cli {
    /// Contact store file.
    #[arg(long, env = "SUITE_CONTACTS_DB", default_value = DEFAULT_DB_FILE_NAME, global = true)]
    pub db: PathBuf,

    /// Log level: trace, debug, info, warn or error.
    #[arg(long, env = "SUITE_LOG_LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Directory for rolling log files. Logging is off when unset.
    #[arg(long, env = "SUITE_LOG_DIR", global = true)]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level command groups.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Contact management tools.
    Contacts {
        #[command(subcommand)]
        action: ContactsAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ContactsAction {
    /// Add a new contact.
    Add {
        name: String,
        phone: String,

        /// Contact email address.
        #[arg(short, long)]
        email: Option<String>,
    },

    /// Get a specific contact.
    Get {
        name: String,

        /// Print the record as JSON (`null` when absent).
        #[arg(long)]
        json: bool,
    },

    /// List all contacts.
    List {
        /// Print the records as a JSON array.
        #[arg(long)]
        json: bool,
    },

    /// Delete a contact.
    Delete { name: String },

    /// Update a contact's details.
    Update {
        name: String,

        /// New phone number.
        #[arg(short, long)]
        phone: Option<String>,

        /// New email address.
        #[arg(short, long)]
        email: Option<String>,
    },
}

/// Starts file logging when a log directory is configured.
///
/// Relative directories are resolved against the working directory.
pub(crate) fn init_logging(cli: &Cli) -> Result<()> {
    let Some(log_dir) = &cli.log_dir else {
        return Ok(());
    };

    let log_dir = if log_dir.is_absolute() {
        log_dir.clone()
    } else {
        std::env::current_dir()?.join(log_dir)
    };
    let level = cli.log_level.as_deref().unwrap_or(default_log_level());

    suite_core::init_logging(level, &log_dir).map_err(|err| eyre!(err))
}

pub(crate) fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Contacts { action } => {
            let store = ContactStore::open(&cli.db)?;
            let stdout = io::stdout();
            run_contacts(&store, action, &mut stdout.lock())
        }
    }
}

/// Executes one contact action against `repo` and writes the result.
///
/// Business outcomes (duplicate, not found) are printed, never returned as
/// errors. Storage failures propagate.
pub(crate) fn run_contacts(
    repo: &impl ContactRepository,
    action: ContactsAction,
    out: &mut impl Write,
) -> Result<()> {
    match action {
        ContactsAction::Add { name, phone, email } => {
            let contact = Contact { name, phone, email };
            let added = repo.add_contact(&contact)?;
            debug!("event=cli_contacts module=cli action=add added={added}");
            writeln!(
                out,
                "{}",
                output::outcome(added, output::ADDED, output::ALREADY_EXISTS)
            )?;
        }
        ContactsAction::Get { name, json } => {
            let contact = repo.get_contact(&name)?;
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&contact)?)?;
            } else {
                match contact {
                    Some(contact) => writeln!(out, "{}", output::contact_details(&contact))?,
                    None => writeln!(out, "{}", output::failure(output::NOT_FOUND))?,
                }
            }
        }
        ContactsAction::List { json } => {
            let contacts = repo.list_contacts()?;
            debug!(
                "event=cli_contacts module=cli action=list count={}",
                contacts.len()
            );
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&contacts)?)?;
            } else {
                writeln!(out, "{}", output::contact_list(&contacts))?;
            }
        }
        ContactsAction::Delete { name } => {
            let deleted = repo.delete_contact(&name)?;
            writeln!(
                out,
                "{}",
                output::outcome(deleted, output::DELETED, output::NOT_FOUND)
            )?;
        }
        ContactsAction::Update { name, phone, email } => {
            let updated = repo.update_contact(&name, &ContactUpdate { phone, email })?;
            writeln!(
                out,
                "{}",
                output::outcome(updated, output::UPDATED, output::NOT_FOUND)
            )?;
        }
    }

    Ok(())
}
