//! File system persistence for configuration
//!
//! This module handles reading and writing the config file with:
//! - Atomic writes (no partial/corrupted files)
//! - A best-effort `.backup` copy of the previous file before each overwrite
//! - Directory creation
//! - NO PANICS - all errors are handled via Result types

use crate::{Config, ConfigError, ConfigResult};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Handles configuration file persistence
#[derive(Debug, Clone)]
pub struct ConfigPersistence {
    config_path: PathBuf,
}

impl ConfigPersistence {
    /// Creates a new persistence handler for the given config file path
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// Returns the path of the backing file
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Returns true if the backing file exists
    pub fn exists(&self) -> bool {
        self.config_path.is_file()
    }

    /// Path of the copy kept from the previous write
    pub fn backup_path(&self) -> PathBuf {
        let mut name = self
            .config_path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".backup");
        self.config_path.with_file_name(name)
    }

    /// Reads and parses the configuration file
    ///
    /// No field rules are checked here. A missing file is `MissingFile`;
    /// empty or malformed content is `ParseError`.
    pub fn read(&self) -> ConfigResult<Config> {
        if !self.config_path.exists() {
            return Err(ConfigError::MissingFile {
                path: self.config_path.clone(),
            });
        }

        let contents =
            fs::read_to_string(&self.config_path).map_err(|e| ConfigError::ReadError {
                path: self.config_path.clone(),
                source: e,
            })?;

        // An empty file is corrupted, not an implicit default
        if contents.trim().is_empty() {
            return Err(ConfigError::ParseError {
                path: self.config_path.clone(),
                source: <serde_json::Error as serde::de::Error>::custom("config file is empty"),
            });
        }

        serde_json::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: self.config_path.clone(),
            source: e,
        })
    }

    /// Saves configuration to file atomically
    ///
    /// This uses a temporary file and atomic rename to ensure the config
    /// file is never left in a corrupted state. Field rules are the caller's
    /// responsibility.
    ///
    /// The write goes ahead whatever state the previous file is in: failing
    /// to copy it to `.backup` is logged, never returned.
    pub fn write(&self, config: &Config) -> ConfigResult<()> {
        // Ensure config directory exists
        self.ensure_directory()?;

        if self.config_path.exists() {
            if let Err(e) = self.backup_config() {
                log::warn!("Overwriting config without a backup: {}", e);
            }
        }

        let mut json = serde_json::to_string_pretty(config).map_err(ConfigError::SerializeError)?;
        json.push('\n');

        // Write to temporary file first
        let temp_file = self.create_temp_file()?;
        self.write_atomic(temp_file, &json)?;

        log::info!("Config saved to {}", self.config_path.display());
        Ok(())
    }

    /// Ensures the directory holding the config file exists
    pub fn ensure_directory(&self) -> ConfigResult<()> {
        match self.config_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => ensure_directory_exists(parent),
            _ => Ok(()),
        }
    }

    /// Creates a backup of the current config file
    fn backup_config(&self) -> ConfigResult<()> {
        let backup_path = self.backup_path();
        fs::copy(&self.config_path, &backup_path).map_err(|e| ConfigError::WriteError {
            path: backup_path.clone(),
            source: e,
        })?;
        log::debug!("Backed up config to {}", backup_path.display());
        Ok(())
    }

    /// Creates a temporary file in the same directory as the config file
    fn create_temp_file(&self) -> ConfigResult<NamedTempFile> {
        let dir = match self.config_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        NamedTempFile::new_in(dir).map_err(|e| ConfigError::WriteError {
            path: self.config_path.clone(),
            source: e,
        })
    }

    /// Writes content to a temporary file and atomically renames it
    fn write_atomic(&self, mut temp_file: NamedTempFile, content: &str) -> ConfigResult<()> {
        let write_error = |e: std::io::Error| ConfigError::WriteError {
            path: self.config_path.clone(),
            source: e,
        };

        temp_file.write_all(content.as_bytes()).map_err(write_error)?;
        temp_file.flush().map_err(write_error)?;

        temp_file
            .persist(&self.config_path)
            .map_err(|e| write_error(e.error))?;

        Ok(())
    }
}

/// Creates `path` and its parents if it does not exist yet
pub(crate) fn ensure_directory_exists(path: &Path) -> ConfigResult<()> {
    if !path.is_dir() {
        fs::create_dir_all(path).map_err(|e| ConfigError::DirectoryCreationError {
            path: path.to_path_buf(),
            source: e,
        })?;
        log::info!("Created config directory: {}", path.display());
    }
    Ok(())
}
