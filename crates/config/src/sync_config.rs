//! Synchronization configuration section

use crate::validation::{ConfigSection, ValidationError, Validator};
use serde::{Deserialize, Serialize};

/// How to resolve an item changed both locally and remotely
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConflictStrategy {
    NewestWins,
    LocalWins,
    RemoteWins,
    Manual,
    #[serde(untagged)]
    Unrecognized(String),
}

impl ConflictStrategy {
    pub const VARIANTS: &'static [&'static str] =
        &["newest_wins", "local_wins", "remote_wins", "manual"];

    pub fn as_str(&self) -> &str {
        match self {
            ConflictStrategy::NewestWins => "newest_wins",
            ConflictStrategy::LocalWins => "local_wins",
            ConflictStrategy::RemoteWins => "remote_wins",
            ConflictStrategy::Manual => "manual",
            ConflictStrategy::Unrecognized(other) => other,
        }
    }

    /// The raw literal, if it matched no known variant
    pub fn unrecognized(&self) -> Option<&str> {
        match self {
            ConflictStrategy::Unrecognized(other) => Some(other),
            _ => None,
        }
    }
}

impl std::fmt::Display for ConflictStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settings for one synchronized category
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CategorySync {
    pub enabled: bool,
    pub interval_minutes: u32,
    pub conflict_strategy: ConflictStrategy,

    /// Delete local items that no longer exist remotely
    pub remove_missing: bool,
}

impl Default for CategorySync {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_minutes: 60,
            conflict_strategy: ConflictStrategy::NewestWins,
            remove_missing: false,
        }
    }
}

impl CategorySync {
    fn validate_at(&self, prefix: &str) -> Vec<Result<(), ValidationError>> {
        vec![
            Validator::at_least(
                self.interval_minutes,
                1,
                &format!("{}.intervalMinutes", prefix),
            ),
            Validator::recognized(
                self.conflict_strategy.unrecognized(),
                ConflictStrategy::VARIANTS,
                &format!("{}.conflictStrategy", prefix),
            ),
        ]
    }
}

/// Global synchronization settings plus per-category overrides
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SyncConfig {
    pub enabled: bool,
    pub interval_minutes: u32,

    /// Retries per failed sync run, 0 disables retrying
    pub max_retries: u32,

    pub conflict_strategy: ConflictStrategy,
    pub playlists: CategorySync,
    pub collections: CategorySync,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_minutes: 60,
            max_retries: 3,
            conflict_strategy: ConflictStrategy::NewestWins,
            playlists: CategorySync::default(),
            collections: CategorySync {
                interval_minutes: 360,
                ..CategorySync::default()
            },
        }
    }
}

impl SyncConfig {
    /// True if the category runs, taking the global switch into account
    pub fn category_active(&self, category: &CategorySync) -> bool {
        self.enabled && category.enabled
    }
}

impl ConfigSection for SyncConfig {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut results = vec![
            Validator::at_least(self.interval_minutes, 1, "sync.intervalMinutes"),
            Validator::recognized(
                self.conflict_strategy.unrecognized(),
                ConflictStrategy::VARIANTS,
                "sync.conflictStrategy",
            ),
        ];
        results.extend(self.playlists.validate_at("sync.playlists"));
        results.extend(self.collections.validate_at("sync.collections"));

        Validator::collect_errors(results)
    }

    fn section_name(&self) -> &'static str {
        "sync"
    }
}
