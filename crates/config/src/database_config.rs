//! Database connection configuration section

use crate::validation::{ConfigSection, ValidationError, Validator};
use serde::{Deserialize, Serialize};

/// Environment variables that override database connection parameters
pub const ENV_DB_HOST: &str = "DB_HOST";
pub const ENV_DB_USER: &str = "DB_USER";
pub const ENV_DB_PASSWORD: &str = "DB_PASSWORD";
pub const ENV_DB_NAME: &str = "DB_NAME";
pub const ENV_DB_PORT: &str = "DB_PORT";

/// Database connection settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,

    /// May be empty for trust or peer authentication
    pub password: String,

    /// Database name
    pub name: String,

    /// libpq sslmode value (e.g. "disable", "require")
    pub ssl_mode: String,

    pub max_open_connections: u32,

    /// Must not exceed `max_open_connections`
    pub max_idle_connections: u32,

    pub connection_timeout_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: String::new(),
            name: "listarr".to_string(),
            ssl_mode: "disable".to_string(),
            max_open_connections: 25,
            max_idle_connections: 5,
            connection_timeout_seconds: 10,
        }
    }
}

impl DatabaseConfig {
    /// Applies `DB_*` environment variable overrides to this copy
    ///
    /// Only the caller's value changes; the stored document is untouched.
    /// An unparseable `DB_PORT` is ignored with a warning.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(ENV_DB_HOST) {
            self.host = host;
        }
        if let Some(user) = lookup(ENV_DB_USER) {
            self.user = user;
        }
        if let Some(password) = lookup(ENV_DB_PASSWORD) {
            self.password = password;
        }
        if let Some(name) = lookup(ENV_DB_NAME) {
            self.name = name;
        }
        if let Some(port) = lookup(ENV_DB_PORT) {
            match port.parse::<u16>() {
                Ok(p) => self.port = p,
                Err(_) => log::warn!("Ignoring invalid {} value: {}", ENV_DB_PORT, port),
            }
        }
    }

    /// Builds a key/value connection string
    pub fn connection_url(&self) -> String {
        let mut dsn = format!(
            "host={} user={} dbname={} port={} sslmode={}",
            self.host, self.user, self.name, self.port, self.ssl_mode
        );
        if !self.password.is_empty() {
            dsn.push_str(&format!(" password={}", self.password));
        }
        dsn
    }
}

impl ConfigSection for DatabaseConfig {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut results = vec![
            Validator::not_empty(&self.host, "database.host"),
            Validator::at_least(self.port, 1, "database.port"),
            Validator::not_empty(&self.user, "database.user"),
            Validator::not_empty(&self.name, "database.name"),
            Validator::at_least(self.max_open_connections, 1, "database.maxOpenConnections"),
            Validator::at_least(
                self.connection_timeout_seconds,
                1,
                "database.connectionTimeoutSeconds",
            ),
        ];

        if self.max_idle_connections > self.max_open_connections {
            results.push(Err(ValidationError::with_value(
                "database.maxIdleConnections",
                "must not exceed database.maxOpenConnections",
                self.max_idle_connections,
            )));
        }

        Validator::collect_errors(results)
    }

    fn section_name(&self) -> &'static str {
        "database"
    }
}
