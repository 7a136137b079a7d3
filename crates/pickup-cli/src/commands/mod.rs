//! CLI subcommands.

pub mod add;
pub mod clear;
pub mod config;
pub mod delete;
pub mod list;
pub mod mark;
pub mod summary;

use std::path::{Path, PathBuf};

use tracing::debug;

use pickup_core::{JsonFileStore, ParcelBook, PickupConfig};

/// Resolved configuration and data location shared by the parcel commands.
pub struct Context {
    pub config: PickupConfig,
    pub data_file: PathBuf,
}

impl Context {
    /// Load configuration from `config_path`, the default config file if it
    /// exists, or built-in defaults. `data_override` wins over the config.
    pub fn load(config_path: Option<&Path>, data_override: Option<PathBuf>) -> anyhow::Result<Self> {
        let config = match config_path {
            Some(path) => PickupConfig::from_file(path)?,
            None => {
                let default_path = default_config_path();
                if default_path.exists() {
                    PickupConfig::from_file(&default_path)?
                } else {
                    PickupConfig::default()
                }
            }
        };

        let data_file = data_override
            .or_else(|| config.storage.data_file.clone())
            .unwrap_or_else(default_data_path);

        debug!("Using data file {}", data_file.display());

        Ok(Self { config, data_file })
    }

    /// Open the parcel book. An unreadable data file is logged and read as
    /// an empty collection.
    pub fn open_book(&self) -> ParcelBook<JsonFileStore> {
        ParcelBook::from_config(JsonFileStore::new(&self.data_file), &self.config)
            .recover_malformed(true)
    }
}

/// Default configuration file location.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pickup")
        .join("config.json")
}

/// Default parcel data file location.
pub fn default_data_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pickup")
        .join("kuaidi.json")
}

/// Display format for timestamps.
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
