//! Command-line surface.
//!
//! Positions shown to and accepted from the user are 1-based; the library
//! itself is 0-based.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// `bookshelf` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(name = "bookshelf", about = "Personal library catalog", version)]
pub struct Cli {
    /// SQLite file holding the library.
    #[arg(long = "db", env = "BOOKSHELF_DB_PATH", value_name = "path", global = true)]
    pub db_path: Option<PathBuf>,
    /// One of trace|debug|info|warn|error. Defaults by build mode.
    #[arg(long = "log-level", value_name = "level", global = true)]
    pub log_level: Option<String>,
    /// Absolute directory for rolling log files.
    #[arg(long = "log-dir", value_name = "dir", global = true)]
    pub log_dir: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List books, sectioned by genre when grouping is on.
    List {
        /// Ignore genre grouping for this listing.
        #[arg(long)]
        flat: bool,
    },
    /// Show every field of one book.
    Show { position: usize },
    /// Add a book.
    Add(AddArgs),
    /// Edit a book; omitted fields keep their current value.
    Edit {
        position: usize,
        #[command(flatten)]
        fields: EditArgs,
    },
    /// Remove a book.
    Remove { position: usize },
    /// Advance to the next sort mode and re-sort.
    Sort,
    /// Print the genres in use, in the current sort direction.
    Genres,
    /// Turn genre grouping on or off.
    Group {
        #[arg(value_enum)]
        state: Toggle,
    },
    /// Print every accepted genre label.
    GenreList,
    /// Print the core library version.
    Version,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

/// Raw field text for a new book. Values are validated by the core form.
#[derive(Debug, Clone, Args)]
pub struct AddArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long = "first-name", value_name = "name")]
    pub author_first_name: String,
    #[arg(long = "last-name", value_name = "name")]
    pub author_last_name: String,
    #[arg(long)]
    pub year: String,
    #[arg(long)]
    pub pages: String,
    /// Estimated reading time in hours.
    #[arg(long)]
    pub hours: String,
    #[arg(long)]
    pub genre: String,
    #[arg(long, default_value = "1")]
    pub rating: String,
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct EditArgs {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long = "first-name", value_name = "name")]
    pub author_first_name: Option<String>,
    #[arg(long = "last-name", value_name = "name")]
    pub author_last_name: Option<String>,
    #[arg(long)]
    pub year: Option<String>,
    #[arg(long)]
    pub pages: Option<String>,
    #[arg(long)]
    pub hours: Option<String>,
    #[arg(long)]
    pub genre: Option<String>,
    #[arg(long)]
    pub rating: Option<String>,
    /// Pass an empty string to clear notes.
    #[arg(long)]
    pub notes: Option<String>,
}
