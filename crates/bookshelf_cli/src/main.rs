//! Command-line front end for the Bookshelf catalog.
//!
//! # Responsibility
//! - Resolve configuration, start logging, and open the library database.
//! - Translate each subcommand into one core library operation.
//!
//! # Invariants
//! - Book validation lives in `bookshelf_core`; this binary only collects
//!   raw text and prints results.
//! - A logging setup failure is reported but never blocks the command.

mod cli;
mod commands;
mod config;

use anyhow::{Context, Result};
use bookshelf_core::db::open_db;
use bookshelf_core::{init_logging, Library, SqliteLibraryStorage};
use clap::Parser;
use cli::{Cli, Command};
use config::AppConfig;
use log::info;
use std::io;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Version => return commands::version(&mut out),
        Command::GenreList => return commands::genre_list(&mut out),
        _ => {}
    }

    let config = AppConfig::resolve(&cli)?;
    if let Err(err) = init_logging(&config.log_level, &config.log_dir) {
        eprintln!("warning: file logging disabled: {err}");
    }

    config.ensure_db_dir()?;
    let conn = open_db(&config.db_path).with_context(|| {
        format!(
            "failed to open library database `{}`",
            config.db_path.display()
        )
    })?;
    let mut library = Library::load(SqliteLibraryStorage::new(&conn));
    info!(
        "event=cli_command module=cli status=start count={}",
        library.len()
    );

    commands::run(&cli.command, &mut library, &mut out)
}
