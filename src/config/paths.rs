//! Path management for Bunker
//!
//! ## Path Resolution Order
//!
//! 1. `BUNKER_DATA_DIR` environment variable (if set)
//! 2. The platform config directory reported by `directories`
//!    (`~/.config/bunker` on Linux, `%APPDATA%\bunker` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::BunkerError;
use crate::store::Table;

/// Manages all paths used by Bunker
#[derive(Debug, Clone)]
pub struct BunkerPaths {
    /// Base directory for all Bunker data
    base_dir: PathBuf,
}

impl BunkerPaths {
    /// Create a new BunkerPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, BunkerError> {
        let base_dir = if let Ok(custom) = std::env::var("BUNKER_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create BunkerPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory holding the table files
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path of the CSV file backing a table
    pub fn table_file(&self, table: Table) -> PathBuf {
        self.data_dir().join(format!("{}.csv", table.name()))
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), BunkerError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| BunkerError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| BunkerError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if Bunker has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, BunkerError> {
    ProjectDirs::from("", "", "bunker")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| BunkerError::Config("Could not determine a home directory".into()))
}
