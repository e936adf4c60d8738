//! `suite` CLI entry point.
//!
//! Hosts the contact management command group on top of `suite_core`.

mod commands;
mod output;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_logging(&cli)?;
    commands::run(cli)
}
