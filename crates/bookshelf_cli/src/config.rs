//! Runtime configuration resolved from flags, environment and platform
//! directories.

use crate::cli::Cli;
use anyhow::{anyhow, Context, Result};
use bookshelf_core::default_log_level;
use directories::BaseDirs;
use std::fs;
use std::path::{Path, PathBuf};

/// Folder created beneath the platform data directory.
const APP_DIR_NAME: &str = "bookshelf";
const DB_FILE_NAME: &str = "bookshelf.sqlite3";
const LOG_DIR_NAME: &str = "logs";

/// Fully resolved settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    pub log_dir: PathBuf,
}

impl AppConfig {
    /// Fills unset options from the platform data directory.
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let data_dir = || -> Result<PathBuf> {
            let base_dirs =
                BaseDirs::new().ok_or_else(|| anyhow!("could not locate a data directory"))?;
            Ok(base_dirs.data_dir().join(APP_DIR_NAME))
        };

        let db_path = match non_empty_path(cli.db_path.as_deref()) {
            Some(path) => path,
            None => data_dir()?.join(DB_FILE_NAME),
        };
        let log_dir = match non_empty_path(cli.log_dir.as_deref()) {
            Some(path) => path,
            None => data_dir()?.join(LOG_DIR_NAME),
        };
        let log_level = cli
            .log_level
            .clone()
            .unwrap_or_else(|| default_log_level().to_string());

        Ok(Self {
            db_path,
            log_level,
            log_dir,
        })
    }

    /// Creates the directory that will hold the database file.
    pub fn ensure_db_dir(&self) -> Result<()> {
        if let Some(parent) = self.db_path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create data directory `{}`", parent.display())
            })?;
        }
        Ok(())
    }
}

fn non_empty_path(path: Option<&Path>) -> Option<PathBuf> {
    path.filter(|value| !value.as_os_str().is_empty())
        .map(Path::to_path_buf)
}
