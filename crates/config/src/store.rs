//! Configuration store - the live, process-wide configuration document

use crate::persistence::ConfigPersistence;
use crate::{Config, ConfigError, ConfigResult, DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILE};
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Single source of truth for the running configuration
///
/// The store owns the in-memory document and is the only writer of the
/// backing file during normal operation. Reads take a shared lock. Updates
/// and resets hold the exclusive lock across both the file write and the
/// in-memory swap, so a reader never sees a document that differs from the
/// last successfully written file.
///
/// Share it between request handlers with `Arc<ConfigStore>`.
#[derive(Debug)]
pub struct ConfigStore {
    persistence: ConfigPersistence,
    config_dir: PathBuf,
    current: RwLock<Option<Config>>,
}

impl Default for ConfigStore {
    /// A store backed by `./config/app.config.json`
    fn default() -> Self {
        Self::new(DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILE)
    }
}

impl ConfigStore {
    /// Creates an uninitialized store for `config_dir/config_file`
    pub fn new(config_dir: impl Into<PathBuf>, config_file: impl AsRef<Path>) -> Self {
        let config_dir = config_dir.into();
        let persistence = ConfigPersistence::new(config_dir.join(config_file));

        Self {
            persistence,
            config_dir,
            current: RwLock::new(None),
        }
    }

    /// Creates a store using the default file name inside `config_dir`
    pub fn with_directory(config_dir: impl Into<PathBuf>) -> Self {
        Self::new(config_dir, DEFAULT_CONFIG_FILE)
    }

    /// Returns the config directory path
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Returns the full config file path
    pub fn config_path(&self) -> &Path {
        self.persistence.path()
    }

    /// Returns true once a document has been loaded
    pub fn is_initialized(&self) -> bool {
        self.read_lock().map(|guard| guard.is_some()).unwrap_or(false)
    }

    /// Loads the configuration, writing the default document first if no
    /// file exists yet
    ///
    /// An existing file is never rewritten. If it parses but breaks field
    /// rules, the problems are logged and the document is still loaded.
    ///
    /// Returns Ok(true) if a new file was created, Ok(false) if one already existed.
    pub fn initialize(&self) -> ConfigResult<bool> {
        let mut guard = self.write_lock()?;

        self.persistence.ensure_directory()?;

        let created = if self.persistence.exists() {
            log::info!(
                "Config file already exists at {}",
                self.config_path().display()
            );
            false
        } else {
            self.persistence.write(&Config::default())?;
            log::info!(
                "Generated default config at {}",
                self.config_path().display()
            );
            true
        };

        let config = self.persistence.read()?;

        if let Err(errors) = config.validate() {
            let error_msg = errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            log::warn!("Config validation warnings: {}", error_msg);
        }

        *guard = Some(config);
        Ok(created)
    }

    /// Returns a copy of the current document
    pub fn get(&self) -> ConfigResult<Config> {
        self.read_lock()?
            .as_ref()
            .cloned()
            .ok_or(ConfigError::NotInitialized)
    }

    /// Executes a closure with read-only access to the current document
    pub fn with_config<F, R>(&self, f: F) -> ConfigResult<R>
    where
        F: FnOnce(&Config) -> R,
    {
        let guard = self.read_lock()?;
        guard.as_ref().map(f).ok_or(ConfigError::NotInitialized)
    }

    /// Replaces the document with `config`
    ///
    /// The document is validated first. It then becomes visible only if the
    /// file write succeeds; on any error the previous document stays in place.
    pub fn update(&self, config: Config) -> ConfigResult<Config> {
        config.validate().map_err(ConfigError::ValidationError)?;

        let mut guard = self.write_lock()?;
        self.persistence.write(&config)?;
        *guard = Some(config.clone());

        log::info!("Configuration updated");
        Ok(config)
    }

    /// Binds a raw JSON body and applies it with [`ConfigStore::update`]
    pub fn update_json(&self, body: &[u8]) -> ConfigResult<Config> {
        let config = Config::bind(body)?;
        self.update(config)
    }

    /// Resets the configuration to defaults
    ///
    /// This overwrites the existing config file with default values.
    pub fn reset(&self) -> ConfigResult<Config> {
        let mut guard = self.write_lock()?;

        self.persistence.ensure_directory()?;

        let default_config = Config::default();
        self.persistence.write(&default_config)?;
        *guard = Some(default_config.clone());

        log::info!("Configuration reset to defaults");
        Ok(default_config)
    }

    fn read_lock(&self) -> ConfigResult<RwLockReadGuard<'_, Option<Config>>> {
        self.current.read().map_err(|_| ConfigError::LockPoisoned)
    }

    fn write_lock(&self) -> ConfigResult<RwLockWriteGuard<'_, Option<Config>>> {
        self.current.write().map_err(|_| ConfigError::LockPoisoned)
    }
}
