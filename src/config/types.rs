//! Configuration data model.
//!
//! Struct definitions plus default values. Source discovery and env overrides
//! live in sibling modules so precedence behavior stays in one place.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use super::defaults::{APP_DIR_NAME, DEFAULT_API_BASE_URL, DEFAULT_API_TIMEOUT_SECS};
use super::init::config_root_dir;

/// Top-level runtime configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub storage: StorageConfig,
    pub display: DisplayConfig,
}

impl Config {
    /// Directory holding the durable store, when one can be resolved.
    pub fn storage_dir(&self) -> Option<PathBuf> {
        if let Some(dir) = self.storage.dir.as_deref().map(str::trim) {
            if !dir.is_empty() {
                return Some(PathBuf::from(dir));
            }
        }
        config_root_dir().map(|root| root.join(APP_DIR_NAME))
    }
}

/// Backend connection settings used by the HTTP client adapter.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_secs: DEFAULT_API_TIMEOUT_SECS,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

/// Durable store placement.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct StorageConfig {
    /// Explicit store directory; `None` uses `~/.config/agendavet`.
    pub dir: Option<String>,
}

/// Terminal output settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct DisplayConfig {
    pub color: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

/// Configuration payload plus the file it came from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    /// `None` when built-in defaults were used.
    pub source: Option<PathBuf>,
}

/// Result of explicit global config initialization (`agendavet init`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlobalConfigInitResult {
    Created { path: PathBuf },
    AlreadyInitialized { path: PathBuf },
    Overwritten { path: PathBuf, backup_path: PathBuf },
}
