//! Parcel collection persistence.

#[cfg(feature = "native")]
mod json;
mod memory;

#[cfg(feature = "native")]
pub use json::JsonFileStore;
pub use memory::MemoryStore;

use serde_json::Value;
use tracing::warn;

use crate::error::StoreError;
use crate::models::parcel::ParcelRecord;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Trait for parcel collection stores.
///
/// `save` always overwrites the whole collection.
pub trait ParcelStore {
    /// Load the ordered collection. A store that does not exist yet is empty.
    fn load(&self) -> Result<Vec<ParcelRecord>>;

    /// Replace the stored collection.
    fn save(&self, records: &[ParcelRecord]) -> Result<()>;
}

impl<S: ParcelStore + ?Sized> ParcelStore for &S {
    fn load(&self) -> Result<Vec<ParcelRecord>> {
        (**self).load()
    }

    fn save(&self, records: &[ParcelRecord]) -> Result<()> {
        (**self).save(records)
    }
}

/// Decode a stored document.
///
/// Accepts an array of records, a single record object, or `null`. Array
/// entries are decoded one by one; entries that are not objects are skipped.
pub fn decode_document(content: &str) -> std::result::Result<Vec<ParcelRecord>, String> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    let value: Value = serde_json::from_str(content).map_err(|e| e.to_string())?;
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => Ok(items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| decode_record(index, item))
            .collect()),
        Value::Object(_) => Ok(decode_record(0, value).into_iter().collect()),
        other => Err(format!("expected an array of parcels, found {other}")),
    }
}

fn decode_record(index: usize, item: Value) -> Option<ParcelRecord> {
    if !item.is_object() {
        warn!("Skipping stored entry #{} that is not a parcel: {}", index + 1, item);
        return None;
    }

    match serde_json::from_value(item) {
        Ok(record) => Some(record),
        Err(e) => {
            warn!("Skipping stored entry #{}: {}", index + 1, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parcel::ParcelStatus;
    use chrono::NaiveDateTime;

    #[test]
    fn test_decode_array_and_single_object() {
        let array = r#"[{"type":"中通","code":"1234","address":"A","time":"2025-08-19T09:00:00","status":"已取件"}]"#;
        let records = decode_document(array).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].pickup_code, "1234");

        let single = r#"{"type":"中通","code":"1234","address":"A","time":"2025-08-19T09:00:00"}"#;
        assert_eq!(decode_document(single).unwrap().len(), 1);
    }

    #[test]
    fn test_decode_empty_documents() {
        assert!(decode_document("").unwrap().is_empty());
        assert!(decode_document("  \n").unwrap().is_empty());
        assert!(decode_document("null").unwrap().is_empty());
        assert!(decode_document("[]").unwrap().is_empty());
    }

    #[test]
    fn test_decode_malformed() {
        assert!(decode_document("{not json").is_err());
        assert!(decode_document("42").is_err());
        assert!(decode_document(r#""parcels""#).is_err());
    }

    #[test]
    fn test_decode_null_status_as_pending() {
        let doc = r#"[{"type":"中通","code":"1234","address":"A","time":"2025-08-19T09:00:00","status":null}]"#;
        let records = decode_document(doc).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].status, ParcelStatus::Pending);
    }

    #[test]
    fn test_decode_keeps_unusual_records() {
        let doc = r#"[
            {"type":"中通","code":"1111","address":"A","time":"2025-08-19T09:00:00","status":"已取件"},
            {"type":"顺丰","code":"2222","address":"B","time":"2025/8/19 上午9:00:00"},
            {"type":"圆通","code":"3333","address":"C","time":"soon"},
            {"type":"韵达","code":"4444","address":"D"},
            "garbage",
            7
        ]"#;
        let records = decode_document(doc).unwrap();

        let codes: Vec<&str> = records.iter().map(|r| r.pickup_code.as_str()).collect();
        assert_eq!(codes, ["1111", "2222", "3333", "4444"]);
        assert_eq!(records[0].status, ParcelStatus::Collected);
        assert_eq!(records[2].received_at, NaiveDateTime::default());
        assert_eq!(records[3].received_at, NaiveDateTime::default());
    }
}
