//! Out-of-band validation and repair of the configuration file
//!
//! `ConfigLoader` works on the file alone and never touches a running
//! `ConfigStore`. It takes no lock: calling [`ConfigLoader::repair`] while a
//! store is serving updates races with the store's writes. Use it from
//! operator tooling and health checks, not from request handlers.

use crate::backup::ConfigBackupManager;
use crate::persistence::ConfigPersistence;
use crate::{Config, ConfigError, ConfigResult};
use std::path::{Path, PathBuf};

/// Name of the directory, inside the config directory, that receives
/// copies of files replaced by a repair
pub const REPAIR_BACKUP_DIR: &str = "backups";

/// Validates, loads and repairs a configuration file
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    persistence: ConfigPersistence,
}

impl ConfigLoader {
    /// Creates a loader for `config_dir/config_file`
    pub fn new(config_dir: impl Into<PathBuf>, config_file: impl AsRef<Path>) -> Self {
        let config_dir = config_dir.into();
        let persistence = ConfigPersistence::new(config_dir.join(config_file));
        Self {
            config_dir,
            persistence,
        }
    }

    /// Returns the full config file path
    pub fn config_path(&self) -> &Path {
        self.persistence.path()
    }

    /// Backup manager used by [`ConfigLoader::repair`]
    ///
    /// Backups are named after the config file, e.g. `app.config_<timestamp>.json`.
    pub fn backup_manager(&self) -> ConfigBackupManager {
        let manager = ConfigBackupManager::new(self.config_dir.join(REPAIR_BACKUP_DIR));
        match self.config_path().file_stem().and_then(|s| s.to_str()) {
            Some(stem) => manager.with_stem(stem),
            None => manager,
        }
    }

    /// Checks that the file exists, parses, and satisfies every field rule
    pub fn validate(&self) -> ConfigResult<()> {
        let config = self.persistence.read()?;
        config.validate().map_err(ConfigError::ValidationError)
    }

    /// Reads and parses the file without checking field rules
    pub fn load(&self) -> ConfigResult<Config> {
        self.persistence.read()
    }

    /// Overwrites the file with `default_config`, whatever its current state
    ///
    /// This is destructive. Only call it after [`ConfigLoader::validate`] has
    /// failed. A copy of the file being replaced is kept in the `backups`
    /// directory when possible; failing to take that copy does not stop the
    /// repair.
    pub fn repair(&self, default_config: &Config) -> ConfigResult<()> {
        if self.persistence.exists() {
            if let Err(e) = self.backup_manager().backup_file(self.config_path()) {
                log::warn!("Could not back up config before repair: {}", e);
            }
        }

        self.persistence.write(default_config)?;

        log::warn!(
            "Repaired config file at {}",
            self.config_path().display()
        );
        Ok(())
    }

    /// Overwrites the file with the document kept in `backup_path`
    ///
    /// The backup must parse and satisfy every field rule; otherwise the
    /// current file is left alone. Like [`ConfigLoader::repair`], the file
    /// being replaced is copied into `backups` first when possible.
    pub fn restore(&self, backup_path: &Path) -> ConfigResult<Config> {
        let manager = self.backup_manager();
        let config = manager.restore_from_backup(backup_path)?;
        config.validate().map_err(ConfigError::ValidationError)?;

        if self.persistence.exists() {
            if let Err(e) = manager.backup_file(self.config_path()) {
                log::warn!("Could not back up config before restore: {}", e);
            }
        }

        self.persistence.write(&config)?;

        log::warn!(
            "Restored config file at {} from {}",
            self.config_path().display(),
            backup_path.display()
        );
        Ok(config)
    }
}
