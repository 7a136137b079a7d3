//! Configuration structures for pickup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{PickupError, Result};

/// Main configuration for pickup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PickupConfig {
    /// Storage configuration.
    pub storage: StorageConfig,

    /// Summary display configuration.
    pub display: DisplayConfig,

    /// Message extraction configuration.
    pub extraction: ExtractionConfig,
}

/// Where the parcel collection lives.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the JSON data file. `None` uses the platform data directory.
    pub data_file: Option<PathBuf>,
}

/// Summary display configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Maximum number of pending parcels shown in the summary.
    pub max_show: usize,

    /// Message shown when nothing is pending.
    pub empty_message: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            max_show: crate::summary::DEFAULT_MAX_SHOW,
            empty_message: crate::summary::EMPTY_MESSAGE.to_string(),
        }
    }
}

/// Message extraction configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Carrier names tried after the built-in list.
    pub extra_carriers: Vec<String>,
}

impl PickupConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| config_error("cannot read", path, e))?;
        serde_json::from_str(&content).map_err(|e| config_error("invalid config", path, e))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| config_error("cannot serialize", path, e))?;
        std::fs::write(path, content).map_err(|e| config_error("cannot write", path, e))
    }
}

fn config_error(action: &str, path: &Path, e: impl std::fmt::Display) -> PickupError {
    PickupError::Config(format!("{} {}: {}", action, path.display(), e))
}
