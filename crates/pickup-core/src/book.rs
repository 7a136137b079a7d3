//! High-level parcel operations over a store.

use tracing::{info, warn};

use crate::error::{PickupError, Result};
use crate::message::{split_batch, NotificationParser};
use crate::models::config::PickupConfig;
use crate::models::parcel::{ParcelRecord, ParcelStatus};
use crate::reconcile::{Reconciler, Reconciliation};
use crate::store::ParcelStore;
use crate::summary::Summary;

/// Parcel collection bound to a store.
///
/// Every mutating operation loads the collection, applies one change and
/// saves the whole collection once.
pub struct ParcelBook<S> {
    store: S,
    reconciler: Reconciler<NotificationParser>,
    recover_malformed: bool,
}

impl<S: ParcelStore> ParcelBook<S> {
    /// Create a book using the built-in parsing rules.
    pub fn new(store: S) -> Self {
        Self {
            store,
            reconciler: Reconciler::default(),
            recover_malformed: false,
        }
    }

    /// Create a book configured from `config`.
    pub fn from_config(store: S, config: &PickupConfig) -> Self {
        Self {
            reconciler: Reconciler::new(NotificationParser::from_config(&config.extraction)),
            ..Self::new(store)
        }
    }

    /// Treat an unreadable store as an empty collection instead of failing.
    pub fn recover_malformed(mut self, recover: bool) -> Self {
        self.recover_malformed = recover;
        self
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load the current collection.
    pub fn records(&self) -> Result<Vec<ParcelRecord>> {
        match self.store.load() {
            Err(e) if e.is_malformed() && self.recover_malformed => {
                warn!("Failed to read parcel data, treating it as empty: {}", e);
                Ok(Vec::new())
            }
            other => Ok(other?),
        }
    }

    /// Import a batch of notifications separated by line breaks or `;`.
    pub fn add_batch(&self, input: &str) -> Result<Reconciliation> {
        let lines = split_batch(input);
        if lines.is_empty() {
            return Err(PickupError::EmptyInput);
        }

        info!("Importing {} candidate messages", lines.len());
        let result = self.reconciler.reconcile(self.records()?, &lines);
        if result.skipped == lines.len() {
            return Err(PickupError::NoValidMessages);
        }

        self.store.save(&result.records)?;
        Ok(result)
    }

    /// Delete the record named by `selector`.
    pub fn delete(&self, selector: &str) -> Result<ParcelRecord> {
        let mut records = self.records()?;
        let index = resolve(&records, selector)?;
        let removed = records.remove(index);
        self.store.save(&records)?;

        info!("Deleted parcel: {}", removed.label());
        Ok(removed)
    }

    /// Remove every record. Returns how many were removed.
    pub fn clear(&self) -> Result<usize> {
        let count = self.records()?.len();
        self.store.save(&[])?;

        info!("Cleared {} parcels", count);
        Ok(count)
    }

    /// Set the status of the record named by `selector`.
    pub fn mark(&self, selector: &str, status: ParcelStatus) -> Result<ParcelRecord> {
        let mut records = self.records()?;
        let index = resolve(&records, selector)?;
        records[index].status = status;
        self.store.save(&records)?;

        let record = records.swap_remove(index);
        info!("Parcel status updated: {} -> {}", record.label(), record.status);
        Ok(record)
    }

    /// Summary of the newest pending parcels.
    pub fn summary(&self, max_show: usize) -> Result<Summary> {
        Ok(Summary::build(&self.records()?, max_show))
    }
}

/// Resolve a selector to an index: an exact pickup code first, then a
/// 1-based position.
pub fn resolve(records: &[ParcelRecord], selector: &str) -> Result<usize> {
    let selector = selector.trim();

    if let Some(index) = records.iter().position(|r| r.pickup_code == selector) {
        return Ok(index);
    }

    selector
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=records.len()).contains(n))
        .map(|n| n - 1)
        .ok_or_else(|| PickupError::NotFound(selector.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn record(carrier: &str, code: &str) -> ParcelRecord {
        let time = NaiveDate::from_ymd_opt(2025, 8, 19)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        ParcelRecord::new(carrier, code, "北门", time)
    }

    #[test]
    fn test_add_batch_saves_once() {
        let book = ParcelBook::new(MemoryStore::new());

        let result = book
            .add_batch("【菜鸟裹裹】取件码:1234,地址:A小区;顺丰快递 验证码 9988 请到菜鸟驿站领取\n噪音")
            .unwrap();

        assert_eq!(result.added, vec!["菜鸟 - 1234", "顺丰 - 9988"]);
        assert_eq!(result.skipped, 1);
        assert_eq!(book.store().saves(), 1);
        assert_eq!(book.store().snapshot().len(), 2);
    }

    #[test]
    fn test_add_batch_rejects_empty_and_invalid_input() {
        let book = ParcelBook::new(MemoryStore::new());

        assert!(matches!(book.add_batch(" ; \n"), Err(PickupError::EmptyInput)));
        assert!(matches!(
            book.add_batch("hello;world"),
            Err(PickupError::NoValidMessages)
        ));
        assert_eq!(book.store().saves(), 0);
    }

    #[test]
    fn test_delete_by_code_and_position() {
        let store = MemoryStore::with_records(vec![
            record("中通", "1111"),
            record("圆通", "2222"),
            record("韵达", "3333"),
        ]);
        let book = ParcelBook::new(store);

        assert_eq!(book.delete("2222").unwrap().carrier, "圆通");
        assert_eq!(book.delete("2").unwrap().pickup_code, "3333");

        let remaining = book.store().snapshot();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].pickup_code, "1111");
    }

    #[test]
    fn test_code_wins_over_position() {
        let records = vec![record("中通", "2"), record("圆通", "1")];
        assert_eq!(resolve(&records, "1").unwrap(), 1);
        assert_eq!(resolve(&records, "2").unwrap(), 0);
    }

    #[test]
    fn test_unknown_selector() {
        let book = ParcelBook::new(MemoryStore::with_records(vec![record("中通", "1111")]));

        assert!(matches!(book.delete("0"), Err(PickupError::NotFound(_))));
        assert!(matches!(book.delete("2"), Err(PickupError::NotFound(_))));
        assert!(matches!(
            book.mark("nope", ParcelStatus::Collected),
            Err(PickupError::NotFound(_))
        ));
        assert_eq!(book.store().saves(), 0);
    }

    #[test]
    fn test_mark_then_reimport_keeps_status() {
        let book = ParcelBook::new(MemoryStore::new());
        book.add_batch("【中通】取件码 5566 地址:北门").unwrap();

        let marked = book.mark("5566", ParcelStatus::Collected).unwrap();
        assert_eq!(marked.status, ParcelStatus::Collected);

        let result = book.add_batch("【中通】取件码 5566 地址:南门").unwrap();
        assert!(result.added.is_empty());
        assert_eq!(result.records[0].address, "南门");
        assert_eq!(result.records[0].status, ParcelStatus::Collected);
    }

    #[test]
    fn test_clear() {
        let book = ParcelBook::new(MemoryStore::with_records(vec![
            record("中通", "1111"),
            record("圆通", "2222"),
        ]));

        assert_eq!(book.clear().unwrap(), 2);
        assert!(book.records().unwrap().is_empty());
    }

    #[test]
    fn test_malformed_store() {
        let strict = ParcelBook::new(MemoryStore::malformed("bad json"));
        assert!(strict.records().unwrap_err().is_malformed_store());

        let lenient = ParcelBook::new(MemoryStore::malformed("bad json")).recover_malformed(true);
        assert!(lenient.records().unwrap().is_empty());
        let result = lenient.add_batch("【中通】取件码 5566 地址:北门").unwrap();
        assert_eq!(result.records.len(), 1);
    }

    #[cfg(feature = "native")]
    #[test]
    fn test_add_keeps_unusual_stored_records() {
        use crate::store::JsonFileStore;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kuaidi.json");
        std::fs::write(
            &path,
            r#"[
                {"type":"中通","code":"1111","address":"北门","time":"2025-08-19T09:00:00","status":"已取件"},
                {"type":"圆通","code":"2222","address":"南门","time":"2025/8/19 上午9:00:00","status":null},
                {"type":"韵达","code":"4444","address":"东门"}
            ]"#,
        )
        .unwrap();

        let book = ParcelBook::new(JsonFileStore::new(&path)).recover_malformed(true);
        book.add_batch("【顺丰】取件码 3333 地址:西门").unwrap();

        let stored = JsonFileStore::new(&path).load().unwrap();
        let codes: Vec<&str> = stored.iter().map(|r| r.pickup_code.as_str()).collect();
        assert_eq!(codes, ["1111", "2222", "4444", "3333"]);
        assert_eq!(stored[0].status, ParcelStatus::Collected);
        assert_eq!(stored[1].status, ParcelStatus::Pending);
    }

    #[test]
    fn test_summary_skips_collected() {
        let book = ParcelBook::new(MemoryStore::new());
        book.add_batch("【中通】取件码 1111 地址:北门;【圆通】取件码 2222 地址:南门")
            .unwrap();
        book.mark("1111", ParcelStatus::Collected).unwrap();

        let summary = book.summary(5).unwrap();
        assert_eq!(summary.pending_count, 1);
        assert_eq!(summary.entries[0].code, "2222");
    }
}
