//! Application-level configuration section

use crate::validation::{ConfigSection, ValidationError, Validator};
use serde::{Deserialize, Serialize};

/// Log level for application logging
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
    /// Any other literal. Kept so validation can report it by field name.
    #[serde(untagged)]
    Unrecognized(String),
}

impl LogLevel {
    /// Literal values accepted for `app.logLevel`
    pub const VARIANTS: &'static [&'static str] = &["debug", "info", "warn", "error"];

    pub fn as_str(&self) -> &str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Unrecognized(other) => other,
        }
    }

    /// The raw literal, if it matched no known variant
    pub fn unrecognized(&self) -> Option<&str> {
        match self {
            LogLevel::Unrecognized(other) => Some(other),
            _ => None,
        }
    }

    /// Maps the level onto the `log` crate's filter
    ///
    /// Unrecognized levels fall back to `Info`.
    pub fn as_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info | LogLevel::Unrecognized(_) => log::LevelFilter::Info,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deployment environment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Staging,
    Production,
    #[serde(untagged)]
    Unrecognized(String),
}

impl Environment {
    /// Literal values accepted for `app.environment`
    pub const VARIANTS: &'static [&'static str] = &["development", "staging", "production"];

    pub fn as_str(&self) -> &str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
            Environment::Unrecognized(other) => other,
        }
    }

    /// The raw literal, if it matched no known variant
    pub fn unrecognized(&self) -> Option<&str> {
        match self {
            Environment::Unrecognized(other) => Some(other),
            _ => None,
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Application-level settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AppConfig {
    /// Display name of the application
    pub name: String,

    /// Deployment environment
    pub environment: Environment,

    /// Public URL of this backend
    pub base_url: String,

    /// URL of the frontend served to users
    pub frontend_url: String,

    /// API version prefix (e.g. "v1")
    pub api_version: String,

    /// Log level for application output
    pub log_level: LogLevel,

    /// Upper bound for paginated list responses (1-1000)
    pub max_page_size: u32,

    /// Enable response caching
    pub enable_caching: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: "listarr".to_string(),
            environment: Environment::Development,
            base_url: "http://localhost:8080".to_string(),
            frontend_url: "http://localhost:3000".to_string(),
            api_version: "v1".to_string(),
            log_level: LogLevel::Info,
            max_page_size: 100,
            enable_caching: true,
        }
    }
}

impl ConfigSection for AppConfig {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        Validator::collect_errors(vec![
            Validator::not_empty(&self.name, "app.name"),
            Validator::recognized(
                self.environment.unrecognized(),
                Environment::VARIANTS,
                "app.environment",
            ),
            Validator::not_empty(&self.base_url, "app.baseUrl"),
            Validator::not_empty(&self.api_version, "app.apiVersion"),
            Validator::recognized(
                self.log_level.unrecognized(),
                LogLevel::VARIANTS,
                "app.logLevel",
            ),
            Validator::in_range(self.max_page_size, 1, 1000, "app.maxPageSize"),
        ])
    }

    fn section_name(&self) -> &'static str {
        "app"
    }
}
