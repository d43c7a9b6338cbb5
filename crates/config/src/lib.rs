//! Listarr Configuration System
//!
//! This crate owns the single process-wide configuration document: its
//! shape, the rules every field must satisfy, and how it is kept on disk.
//!
//! # Architecture
//!
//! - **Section-based**: each group of settings is a type implementing `ConfigSection`
//! - **Fail closed**: request bodies are deserialized then validated before anything is written
//! - **Atomic writes**: the backing file is never left half-written
//! - **One owner**: `ConfigStore` holds the live document behind a readers-writer lock
//! - **Out-of-band repair**: `ConfigLoader` checks and regenerates the file without touching the store
//!
//! # Example
//!
//! ```rust,no_run
//! use listarr_config::ConfigStore;
//!
//! let store = ConfigStore::default();
//! store.initialize().expect("Failed to initialize config");
//!
//! let config = store.get().expect("Config is initialized");
//! println!("Page size limit: {}", config.app.max_page_size);
//! ```

mod error;
mod loader;
mod persistence;
mod store;
mod validation;

pub mod backup;

// Config sections
pub mod app_config;
pub mod auth_config;
pub mod database_config;
pub mod download_config;
pub mod integrations_config;
pub mod server_config;
pub mod sync_config;

pub use error::{ConfigError, ConfigResult, ErrorKind, ValidationError};
pub use loader::ConfigLoader;
pub use persistence::ConfigPersistence;
pub use store::ConfigStore;
pub use validation::{ConfigSection, Validator};

// Re-export config sections
pub use app_config::{AppConfig, Environment, LogLevel};
pub use auth_config::AuthConfig;
pub use database_config::DatabaseConfig;
pub use download_config::{DownloadConfig, FileFormat, QualityPreset};
pub use integrations_config::IntegrationsConfig;
pub use server_config::ServerConfig;
pub use sync_config::{CategorySync, ConflictStrategy, SyncConfig};

use serde::{Deserialize, Serialize};

/// Directory holding the configuration file, relative to the working directory
pub const DEFAULT_CONFIG_DIR: &str = "./config";

/// File name of the configuration document
pub const DEFAULT_CONFIG_FILE: &str = "app.config.json";

/// The configuration document
///
/// This contains all config sections and is what gets persisted to
/// `app.config.json` and served over the config endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Config {
    /// Application-level settings
    pub app: AppConfig,

    /// Database connection settings
    pub database: DatabaseConfig,

    /// HTTP server settings
    pub server: ServerConfig,

    /// Authentication settings
    pub auth: AuthConfig,

    /// Third-party integrations
    pub integrations: IntegrationsConfig,

    /// Playlist and collection synchronization
    pub sync: SyncConfig,

    /// Download client integration
    pub downloads: DownloadConfig,
}

impl Config {
    /// Creates a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Deserializes a caller-supplied document and validates it
    ///
    /// Malformed JSON, wrong types, missing fields and unknown keys yield
    /// `ConfigError::BadInput`. A well-formed document that breaks a field
    /// rule yields `ConfigError::ValidationError` naming every offending field.
    pub fn bind(bytes: &[u8]) -> ConfigResult<Self> {
        let config: Config = serde_json::from_slice(bytes).map_err(ConfigError::BadInput)?;
        config.validate().map_err(ConfigError::ValidationError)?;
        Ok(config)
    }

    /// Validates the entire configuration
    ///
    /// Returns all validation errors found across all sections.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(mut e) = self.app.validate() {
            errors.append(&mut e);
        }

        if let Err(mut e) = self.database.validate() {
            errors.append(&mut e);
        }

        if let Err(mut e) = self.server.validate() {
            errors.append(&mut e);
        }

        if let Err(mut e) = self.auth.validate() {
            errors.append(&mut e);
        }

        if let Err(mut e) = self.integrations.validate() {
            errors.append(&mut e);
        }

        if let Err(mut e) = self.sync.validate() {
            errors.append(&mut e);
        }

        if let Err(mut e) = self.downloads.validate() {
            errors.append(&mut e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app: AppConfig::default(),
            database: DatabaseConfig::default(),
            server: ServerConfig::default(),
            auth: AuthConfig::default(),
            integrations: IntegrationsConfig::default(),
            sync: SyncConfig::default(),
            downloads: DownloadConfig::default(),
        }
    }
}
