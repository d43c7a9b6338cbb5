//! Authentication configuration section

use crate::validation::{ConfigSection, ValidationError, Validator};
use serde::{Deserialize, Serialize};

/// Placeholder secret written into the default document
pub const DEFAULT_SECRET: &str = "change-me";

/// Session, token and origin settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AuthConfig {
    pub session_lifetime_minutes: u32,
    pub token_lifetime_minutes: u32,
    pub refresh_token_lifetime_days: u32,

    /// Signing secret for session tokens
    pub secret: String,

    /// Origins allowed to call the API from a browser
    pub allowed_origins: Vec<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_lifetime_minutes: 1440,
            token_lifetime_minutes: 60,
            refresh_token_lifetime_days: 30,
            secret: DEFAULT_SECRET.to_string(),
            allowed_origins: vec!["http://localhost:3000".to_string()],
        }
    }
}

impl AuthConfig {
    /// True while the secret is still the shipped placeholder
    pub fn uses_default_secret(&self) -> bool {
        self.secret == DEFAULT_SECRET
    }
}

impl ConfigSection for AuthConfig {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut results = vec![
            Validator::at_least(
                self.session_lifetime_minutes,
                1,
                "auth.sessionLifetimeMinutes",
            ),
            Validator::at_least(self.token_lifetime_minutes, 1, "auth.tokenLifetimeMinutes"),
            Validator::at_least(
                self.refresh_token_lifetime_days,
                1,
                "auth.refreshTokenLifetimeDays",
            ),
            Validator::not_empty(&self.secret, "auth.secret"),
        ];
        results.extend(Validator::entries_not_empty(
            &self.allowed_origins,
            "auth.allowedOrigins",
        ));

        Validator::collect_errors(results)
    }

    fn section_name(&self) -> &'static str {
        "auth"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = AuthConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.uses_default_secret());
    }

    #[test]
    fn test_empty_secret() {
        let mut config = AuthConfig::default();
        config.secret = String::new();
        let errors = config.validate().unwrap_err();
        assert_eq!(errors[0].field, "auth.secret");
    }

    #[test]
    fn test_zero_lifetimes() {
        let mut config = AuthConfig::default();
        config.session_lifetime_minutes = 0;
        config.token_lifetime_minutes = 0;
        config.refresh_token_lifetime_days = 0;
        assert_eq!(config.validate().unwrap_err().len(), 3);
    }

    #[test]
    fn test_empty_origin_list_is_allowed() {
        let mut config = AuthConfig::default();
        config.allowed_origins.clear();
        assert!(config.validate().is_ok());

        config.allowed_origins.push(String::new());
        assert!(config.validate().is_err());
    }
}
