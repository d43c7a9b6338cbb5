//! Third-party integration configuration section
//!
//! Each integration carries an `enabled` flag. Its credential fields are only
//! required while that flag is set, so a disabled integration may keep empty
//! or stale credentials.

use crate::validation::{ConfigSection, ValidationError, Validator};
use serde::{Deserialize, Serialize};

/// Spotify Web API credentials
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SpotifyIntegration {
    pub enabled: bool,
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

impl ConfigSection for SpotifyIntegration {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let flag = "integrations.spotify.enabled";
        Validator::collect_errors(vec![
            Validator::required_if(
                self.enabled,
                &self.client_id,
                "integrations.spotify.clientId",
                flag,
            ),
            Validator::required_if(
                self.enabled,
                &self.client_secret,
                "integrations.spotify.clientSecret",
                flag,
            ),
            Validator::required_if(
                self.enabled,
                &self.redirect_uri,
                "integrations.spotify.redirectUri",
                flag,
            ),
        ])
    }

    fn section_name(&self) -> &'static str {
        "integrations.spotify"
    }
}

/// Last.fm API credentials
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LastFmIntegration {
    pub enabled: bool,
    pub api_key: String,
    pub api_secret: String,
    pub username: String,
}

impl ConfigSection for LastFmIntegration {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let flag = "integrations.lastFm.enabled";
        Validator::collect_errors(vec![
            Validator::required_if(self.enabled, &self.api_key, "integrations.lastFm.apiKey", flag),
            Validator::required_if(
                self.enabled,
                &self.api_secret,
                "integrations.lastFm.apiSecret",
                flag,
            ),
            Validator::required_if(
                self.enabled,
                &self.username,
                "integrations.lastFm.username",
                flag,
            ),
        ])
    }

    fn section_name(&self) -> &'static str {
        "integrations.lastFm"
    }
}

/// Plex Media Server connection
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PlexIntegration {
    pub enabled: bool,
    pub server_url: String,
    pub token: String,
}

impl ConfigSection for PlexIntegration {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let flag = "integrations.plex.enabled";
        Validator::collect_errors(vec![
            Validator::required_if(
                self.enabled,
                &self.server_url,
                "integrations.plex.serverUrl",
                flag,
            ),
            Validator::required_if(self.enabled, &self.token, "integrations.plex.token", flag),
        ])
    }

    fn section_name(&self) -> &'static str {
        "integrations.plex"
    }
}

/// Jellyfin server connection
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JellyfinIntegration {
    pub enabled: bool,
    pub server_url: String,
    pub api_key: String,
    pub user_id: String,
}

impl ConfigSection for JellyfinIntegration {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let flag = "integrations.jellyfin.enabled";
        Validator::collect_errors(vec![
            Validator::required_if(
                self.enabled,
                &self.server_url,
                "integrations.jellyfin.serverUrl",
                flag,
            ),
            Validator::required_if(
                self.enabled,
                &self.api_key,
                "integrations.jellyfin.apiKey",
                flag,
            ),
            Validator::required_if(
                self.enabled,
                &self.user_id,
                "integrations.jellyfin.userId",
                flag,
            ),
        ])
    }

    fn section_name(&self) -> &'static str {
        "integrations.jellyfin"
    }
}

/// The fixed set of supported integrations
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct IntegrationsConfig {
    pub spotify: SpotifyIntegration,
    pub last_fm: LastFmIntegration,
    pub plex: PlexIntegration,
    pub jellyfin: JellyfinIntegration,
}

impl IntegrationsConfig {
    /// Names of the integrations whose `enabled` flag is set
    pub fn enabled_names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.spotify.enabled {
            names.push(self.spotify.section_name());
        }
        if self.last_fm.enabled {
            names.push(self.last_fm.section_name());
        }
        if self.plex.enabled {
            names.push(self.plex.section_name());
        }
        if self.jellyfin.enabled {
            names.push(self.jellyfin.section_name());
        }
        names
    }
}

impl ConfigSection for IntegrationsConfig {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(mut e) = self.spotify.validate() {
            errors.append(&mut e);
        }
        if let Err(mut e) = self.last_fm.validate() {
            errors.append(&mut e);
        }
        if let Err(mut e) = self.plex.validate() {
            errors.append(&mut e);
        }
        if let Err(mut e) = self.jellyfin.validate() {
            errors.append(&mut e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn section_name(&self) -> &'static str {
        "integrations"
    }
}
