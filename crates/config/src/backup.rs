//! Configuration backup utilities
//!
//! Timestamped copies of the raw config file, taken before a repair
//! overwrites it. Copies are byte-for-byte so that a corrupted file can be
//! inspected afterwards. Old copies are rotated out.

use crate::{Config, ConfigError, ConfigResult};
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_BACKUP_STEM: &str = "app.config";
const BACKUP_EXTENSION: &str = "json";

/// Number of backups kept unless [`ConfigBackupManager::with_max_backups`] says otherwise
pub const DEFAULT_MAX_BACKUPS: usize = 10;

/// Manages configuration backups
///
/// Backups are named `<stem>_YYYYMMDD_HHMMSS_mmm.json` with a UTC timestamp,
/// so file names sort chronologically.
#[derive(Debug, Clone)]
pub struct ConfigBackupManager {
    backup_dir: PathBuf,
    prefix: String,
    max_backups: usize,
}

impl ConfigBackupManager {
    /// Creates a new backup manager
    ///
    /// Backups are stored in the specified directory.
    pub fn new(backup_dir: PathBuf) -> Self {
        Self {
            backup_dir,
            prefix: format!("{}_", DEFAULT_BACKUP_STEM),
            max_backups: DEFAULT_MAX_BACKUPS,
        }
    }

    /// Names backups after `stem` instead of `app.config`
    pub fn with_stem(mut self, stem: &str) -> Self {
        self.prefix = format!("{}_", stem);
        self
    }

    /// Sets the maximum number of backups to keep
    pub fn with_max_backups(mut self, max: usize) -> Self {
        self.max_backups = max;
        self
    }

    /// Returns the backup directory
    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// Copies the file at `source` into the backup directory
    ///
    /// Returns the path to the backup file.
    pub fn backup_file(&self, source: &Path) -> ConfigResult<PathBuf> {
        self.ensure_backup_dir()?;

        let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S_%3f");
        let backup_filename = format!("{}{}.{}", self.prefix, timestamp, BACKUP_EXTENSION);
        let backup_path = self.backup_dir.join(backup_filename);

        fs::copy(source, &backup_path).map_err(|e| ConfigError::WriteError {
            path: backup_path.clone(),
            source: e,
        })?;

        log::info!(
            "Backed up {} to {}",
            source.display(),
            backup_path.display()
        );

        self.prune()?;

        Ok(backup_path)
    }

    /// Parses a backup file back into a document
    ///
    /// Field rules are not checked here.
    pub fn restore_from_backup(&self, backup_path: &Path) -> ConfigResult<Config> {
        if !backup_path.exists() {
            return Err(ConfigError::MissingFile {
                path: backup_path.to_path_buf(),
            });
        }

        let contents = fs::read_to_string(backup_path).map_err(|e| ConfigError::ReadError {
            path: backup_path.to_path_buf(),
            source: e,
        })?;

        let config: Config =
            serde_json::from_str(&contents).map_err(|e| ConfigError::ParseError {
                path: backup_path.to_path_buf(),
                source: e,
            })?;

        log::debug!("Read backup {}", backup_path.display());

        Ok(config)
    }

    /// Lists all available backups, newest first
    pub fn list_backups(&self) -> ConfigResult<Vec<BackupInfo>> {
        if !self.backup_dir.exists() {
            return Ok(Vec::new());
        }

        let mut backups = Vec::new();

        let entries = fs::read_dir(&self.backup_dir).map_err(|e| ConfigError::ReadError {
            path: self.backup_dir.clone(),
            source: e,
        })?;

        for entry in entries {
            let entry = entry.map_err(ConfigError::IoError)?;
            let path = entry.path();

            if !path.is_file()
                || path.extension().and_then(|s| s.to_str()) != Some(BACKUP_EXTENSION)
            {
                continue;
            }

            if let Some(filename) = path.file_name().and_then(|s| s.to_str()) {
                if filename.starts_with(&self.prefix) {
                    let metadata = fs::metadata(&path).map_err(ConfigError::IoError)?;
                    let created = metadata
                        .created()
                        .or_else(|_| metadata.modified())
                        .map_err(ConfigError::IoError)?;

                    backups.push(BackupInfo {
                        path: path.clone(),
                        filename: filename.to_string(),
                        created,
                        size_bytes: metadata.len(),
                    });
                }
            }
        }

        // Timestamped names sort chronologically
        backups.sort_by(|a, b| b.filename.cmp(&a.filename));

        Ok(backups)
    }

    /// Deletes a specific backup
    pub fn delete_backup(&self, backup_path: &Path) -> ConfigResult<()> {
        if !backup_path.starts_with(&self.backup_dir) {
            return Err(ConfigError::WriteError {
                path: backup_path.to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "backup path is not in the backup directory",
                ),
            });
        }

        fs::remove_file(backup_path).map_err(|e| ConfigError::WriteError {
            path: backup_path.to_path_buf(),
            source: e,
        })?;

        log::info!("Deleted backup at {}", backup_path.display());

        Ok(())
    }

    /// Deletes all backups
    pub fn delete_all_backups(&self) -> ConfigResult<usize> {
        let backups = self.list_backups()?;
        let count = backups.len();

        for backup in backups {
            self.delete_backup(&backup.path)?;
        }

        log::info!("Deleted {} backup(s)", count);

        Ok(count)
    }

    /// Ensures the backup directory exists
    fn ensure_backup_dir(&self) -> ConfigResult<()> {
        crate::persistence::ensure_directory_exists(&self.backup_dir)
    }

    /// Deletes all but the `max_backups` most recent backups
    ///
    /// Returns the number of backups deleted.
    pub fn prune(&self) -> ConfigResult<usize> {
        let backups = self.list_backups()?;

        if backups.len() <= self.max_backups {
            return Ok(0);
        }

        let stale = &backups[self.max_backups..];
        for backup in stale {
            self.delete_backup(&backup.path)?;
        }

        log::info!("Rotated backups, deleted {} old backup(s)", stale.len());
        Ok(stale.len())
    }
}

/// Information about a config backup
#[derive(Debug, Clone)]
pub struct BackupInfo {
    /// Full path to the backup file
    pub path: PathBuf,
    /// Filename of the backup
    pub filename: String,
    /// Creation timestamp
    pub created: std::time::SystemTime,
    /// File size in bytes
    pub size_bytes: u64,
}

impl BackupInfo {
    /// Returns a human-readable timestamp
    pub fn created_timestamp(&self) -> String {
        use std::time::UNIX_EPOCH;

        self.created
            .duration_since(UNIX_EPOCH)
            .ok()
            .and_then(|d| {
                chrono::DateTime::from_timestamp(d.as_secs() as i64, 0)
                    .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
            })
            .unwrap_or_else(|| "Unknown".to_string())
    }

    /// Returns file size in a human-readable format
    pub fn size_human(&self) -> String {
        let bytes = self.size_bytes as f64;
        if bytes < 1024.0 {
            format!("{} B", bytes)
        } else if bytes < 1024.0 * 1024.0 {
            format!("{:.1} KB", bytes / 1024.0)
        } else {
            format!("{:.1} MB", bytes / (1024.0 * 1024.0))
        }
    }
}
