//! JSON file store.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::StoreError;
use crate::models::parcel::ParcelRecord;

use super::{decode_document, ParcelStore, Result};

/// Stores the collection as a JSON array in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store backed by `path`. The file is not touched until used.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the backing file exists.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Create the file with an empty collection if it is missing.
    ///
    /// Returns `true` when a file was created.
    pub fn init(&self) -> Result<bool> {
        if self.exists() {
            return Ok(false);
        }
        self.save(&[])?;
        info!("Created empty parcel store at {}", self.path.display());
        Ok(true)
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }
}

impl ParcelStore for JsonFileStore {
    fn load(&self) -> Result<Vec<ParcelRecord>> {
        debug!("Loading parcels from {}", self.path.display());

        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Store file does not exist yet");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let records = decode_document(&content).map_err(|reason| StoreError::Malformed {
            path: self.path.clone(),
            reason,
        })?;

        debug!("Loaded {} parcels", records.len());
        Ok(records)
    }

    fn save(&self, records: &[ParcelRecord]) -> Result<()> {
        let dir = self.parent_dir();
        fs::create_dir_all(dir)?;

        let content = serde_json::to_string_pretty(records)?;
        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(content.as_bytes())?;
        file.flush()?;
        file.persist(&self.path).map_err(|e| e.error)?;

        info!("Saved {} parcels to {}", records.len(), self.path.display());
        Ok(())
    }
}
