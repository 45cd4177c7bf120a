//! Builder for opening the SQLite gateway.

use std::path::{Path, PathBuf};

use super::SqliteTaskRepository;
use crate::error::{OwlError, Result};

/// Directory under the XDG data home that holds the store and image cache.
pub const APP_PREFIX: &str = "orgaowl";

/// Builder for creating and configuring [`SqliteTaskRepository`] instances.
#[derive(Debug, Clone, Default)]
pub struct RepositoryBuilder {
    database_path: Option<PathBuf>,
}

impl RepositoryBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/orgaowl/orgaowl.db` or
    /// `~/.local/share/orgaowl/orgaowl.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.database_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Opens the configured store, creating the file, its parent directory and
    /// the schema when they are missing.
    ///
    /// # Errors
    ///
    /// Returns `OwlError::FileSystem` if the parent directory cannot be created
    /// Returns `OwlError::Database` if database initialization fails
    pub async fn build(self) -> Result<SqliteTaskRepository> {
        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| OwlError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        SqliteTaskRepository::open(db_path).await
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    pub fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix(APP_PREFIX)
            .place_data_file("orgaowl.db")
            .map_err(|e| OwlError::XdgDirectory(e.to_string()))
    }
}
