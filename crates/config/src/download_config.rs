//! Download client configuration section

use crate::validation::{ConfigSection, ValidationError, Validator};
use serde::{Deserialize, Serialize};

/// Audio container requested from the download client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    Mp3,
    Flac,
    Aac,
    Ogg,
    Opus,
    #[serde(untagged)]
    Unrecognized(String),
}

impl FileFormat {
    pub const VARIANTS: &'static [&'static str] = &["mp3", "flac", "aac", "ogg", "opus"];

    pub fn as_str(&self) -> &str {
        match self {
            FileFormat::Mp3 => "mp3",
            FileFormat::Flac => "flac",
            FileFormat::Aac => "aac",
            FileFormat::Ogg => "ogg",
            FileFormat::Opus => "opus",
            FileFormat::Unrecognized(other) => other,
        }
    }

    /// The raw literal, if it matched no known variant
    pub fn unrecognized(&self) -> Option<&str> {
        match self {
            FileFormat::Unrecognized(other) => Some(other),
            _ => None,
        }
    }
}

impl std::fmt::Display for FileFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Quality preset passed to the download client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum QualityPreset {
    Low,
    Medium,
    High,
    Lossless,
    #[serde(untagged)]
    Unrecognized(String),
}

impl QualityPreset {
    pub const VARIANTS: &'static [&'static str] = &["low", "medium", "high", "lossless"];

    pub fn as_str(&self) -> &str {
        match self {
            QualityPreset::Low => "low",
            QualityPreset::Medium => "medium",
            QualityPreset::High => "high",
            QualityPreset::Lossless => "lossless",
            QualityPreset::Unrecognized(other) => other,
        }
    }

    /// The raw literal, if it matched no known variant
    pub fn unrecognized(&self) -> Option<&str> {
        match self {
            QualityPreset::Unrecognized(other) => Some(other),
            _ => None,
        }
    }
}

impl std::fmt::Display for QualityPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Download integration settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DownloadConfig {
    pub enabled: bool,

    /// Base URL of the download client's API
    pub client_url: String,
    pub api_key: String,

    /// Where finished downloads are placed
    pub download_directory: String,

    pub file_format: FileFormat,
    pub quality_preset: QualityPreset,
    pub max_concurrent_downloads: u32,

    /// Retries per failed download, 0 disables retrying
    pub max_retries: u32,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            client_url: String::new(),
            api_key: String::new(),
            download_directory: "./downloads".to_string(),
            file_format: FileFormat::Flac,
            quality_preset: QualityPreset::High,
            max_concurrent_downloads: 2,
            max_retries: 3,
        }
    }
}

impl ConfigSection for DownloadConfig {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let flag = "downloads.enabled";
        Validator::collect_errors(vec![
            Validator::required_if(self.enabled, &self.client_url, "downloads.clientUrl", flag),
            Validator::required_if(self.enabled, &self.api_key, "downloads.apiKey", flag),
            Validator::required_if(
                self.enabled,
                &self.download_directory,
                "downloads.downloadDirectory",
                flag,
            ),
            Validator::recognized(
                self.file_format.unrecognized(),
                FileFormat::VARIANTS,
                "downloads.fileFormat",
            ),
            Validator::recognized(
                self.quality_preset.unrecognized(),
                QualityPreset::VARIANTS,
                "downloads.qualityPreset",
            ),
            Validator::at_least(
                self.max_concurrent_downloads,
                1,
                "downloads.maxConcurrentDownloads",
            ),
        ])
    }

    fn section_name(&self) -> &'static str {
        "downloads"
    }
}
