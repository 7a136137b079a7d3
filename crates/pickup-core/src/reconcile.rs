//! Merging freshly parsed notifications into the stored collection.
//!
//! Records are keyed by pickup code. A known code replaces the stored
//! fields in place but keeps the stored status; an unknown code is appended
//! as pending and reported back to the caller.

use chrono::NaiveDateTime;
use tracing::{debug, info};

use crate::message::{now, MessageParser, NotificationParser, ParsedMessage};
use crate::models::parcel::{ParcelRecord, ParcelStatus};

/// Outcome of merging one parsed message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// Appended as a new record; carries its `carrier - code` label.
    Added(String),
    /// Replaced the record at this index.
    Updated(usize),
    /// Incomplete extraction, not stored.
    Skipped,
}

/// Result of reconciling a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// Collection to persist.
    pub records: Vec<ParcelRecord>,
    /// `carrier - code` labels of newly added records, in input order.
    pub added: Vec<String>,
    /// Number of lines that updated an existing record.
    pub updated: usize,
    /// Number of lines dropped for missing fields.
    pub skipped: usize,
}

impl Reconciliation {
    /// Human summary of the import, as shown after a batch add.
    pub fn notice(&self) -> String {
        if self.added.is_empty() {
            format!("无新增快递\n当前总数 {} 条", self.records.len())
        } else {
            format!("有新增快递：\n{}", self.added.join("\n"))
        }
    }
}

/// Applies parsed notifications to a record collection.
#[derive(Debug, Clone, Default)]
pub struct Reconciler<P = NotificationParser> {
    parser: P,
}

impl<P: MessageParser> Reconciler<P> {
    /// Create a reconciler around a parser.
    pub fn new(parser: P) -> Self {
        Self { parser }
    }

    /// Reconcile `lines` against `existing`, stamping each line with the current time.
    pub fn reconcile<S: AsRef<str>>(
        &self,
        existing: Vec<ParcelRecord>,
        lines: &[S],
    ) -> Reconciliation {
        self.reconcile_with(existing, lines, now)
    }

    /// Reconcile with every line stamped at `received_at`.
    pub fn reconcile_at<S: AsRef<str>>(
        &self,
        existing: Vec<ParcelRecord>,
        lines: &[S],
        received_at: NaiveDateTime,
    ) -> Reconciliation {
        self.reconcile_with(existing, lines, || received_at)
    }

    fn reconcile_with<S: AsRef<str>>(
        &self,
        existing: Vec<ParcelRecord>,
        lines: &[S],
        mut clock: impl FnMut() -> NaiveDateTime,
    ) -> Reconciliation {
        let mut result = Reconciliation {
            records: existing,
            ..Default::default()
        };

        for line in lines {
            let parsed = self.parser.parse_at(line.as_ref(), clock());
            match merge(&mut result.records, parsed) {
                MergeOutcome::Added(label) => result.added.push(label),
                MergeOutcome::Updated(_) => result.updated += 1,
                MergeOutcome::Skipped => result.skipped += 1,
            }
        }

        info!(
            "Reconciled {} lines: {} added, {} updated, {} skipped, {} total",
            lines.len(),
            result.added.len(),
            result.updated,
            result.skipped,
            result.records.len()
        );

        result
    }
}

/// Merge one parsed message into `records`.
pub fn merge(records: &mut Vec<ParcelRecord>, parsed: ParsedMessage) -> MergeOutcome {
    if !parsed.is_complete() {
        debug!("Skipping message, missing {:?}", parsed.missing_fields());
        return MergeOutcome::Skipped;
    }

    match records.iter().position(|r| r.pickup_code == parsed.code) {
        Some(index) => {
            let status = records[index].status;
            let record = parsed.into_record(status);
            debug!("Updated parcel: {} [{}]", record.label(), record.status);
            records[index] = record;
            MergeOutcome::Updated(index)
        }
        None => {
            let record = parsed.into_record(ParcelStatus::Pending);
            let label = record.label();
            debug!("Added parcel: {} [{}]", label, record.status);
            records.push(record);
            MergeOutcome::Added(label)
        }
    }
}

/// Reconcile with the built-in parser.
pub fn reconcile<S: AsRef<str>>(existing: Vec<ParcelRecord>, lines: &[S]) -> Reconciliation {
    Reconciler::<NotificationParser>::default().reconcile(existing, lines)
}
