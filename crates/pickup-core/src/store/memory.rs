//! In-memory store.

use std::cell::{Cell, RefCell};
use std::path::PathBuf;

use crate::error::StoreError;
use crate::models::parcel::ParcelRecord;

use super::{ParcelStore, Result};

/// Keeps the collection in memory. Used in tests and by embedders that
/// persist elsewhere.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RefCell<Vec<ParcelRecord>>,
    saves: Cell<usize>,
    malformed: RefCell<Option<String>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `records`.
    pub fn with_records(records: Vec<ParcelRecord>) -> Self {
        Self {
            records: RefCell::new(records),
            ..Default::default()
        }
    }

    /// Create a store whose `load` reports a malformed document until the
    /// next `save`.
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self {
            malformed: RefCell::new(Some(reason.into())),
            ..Default::default()
        }
    }

    /// Copy of the current collection.
    pub fn snapshot(&self) -> Vec<ParcelRecord> {
        self.records.borrow().clone()
    }

    /// Number of `save` calls so far.
    pub fn saves(&self) -> usize {
        self.saves.get()
    }
}

impl ParcelStore for MemoryStore {
    fn load(&self) -> Result<Vec<ParcelRecord>> {
        if let Some(reason) = self.malformed.borrow().as_ref() {
            return Err(StoreError::Malformed {
                path: PathBuf::from("<memory>"),
                reason: reason.clone(),
            });
        }
        Ok(self.snapshot())
    }

    fn save(&self, records: &[ParcelRecord]) -> Result<()> {
        *self.records.borrow_mut() = records.to_vec();
        self.malformed.borrow_mut().take();
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}
