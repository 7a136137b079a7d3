//! Pending-parcel summary shown by the widget view.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::message::rules::{DISPLAY_NOISE, UNKNOWN_CARRIER};
use crate::models::parcel::{timestamp, ParcelRecord, ParcelStatus};

/// Number of parcels shown when not configured.
pub const DEFAULT_MAX_SHOW: usize = 5;

/// Message shown when nothing is pending.
pub const EMPTY_MESSAGE: &str = "暂时还没有快递信息呢";

/// The newest pending parcels, capped to a display count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Pending parcels across the whole collection.
    pub pending_count: usize,
    /// Size of the whole collection.
    pub total: usize,
    /// Displayed parcels, newest first.
    pub entries: Vec<SummaryEntry>,
}

/// One displayed parcel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryEntry {
    /// Simplified carrier name.
    pub carrier: String,
    /// Pickup code.
    pub code: String,
    /// Pickup address.
    pub address: String,
    /// Pickup status.
    pub status: ParcelStatus,
    /// When the notification was captured.
    #[serde(with = "timestamp")]
    pub received_at: NaiveDateTime,
}

impl Summary {
    /// Build the summary for `records`.
    pub fn build(records: &[ParcelRecord], max_show: usize) -> Self {
        let mut pending: Vec<&ParcelRecord> = records.iter().filter(|r| r.is_pending()).collect();
        pending.sort_by(|a, b| b.received_at.cmp(&a.received_at));

        let entries = pending
            .iter()
            .take(max_show)
            .map(|r| SummaryEntry {
                carrier: simplify_carrier_name(&r.carrier),
                code: r.pickup_code.clone(),
                address: r.address.clone(),
                status: r.status,
                received_at: r.received_at,
            })
            .collect();

        Self {
            pending_count: pending.len(),
            total: records.len(),
            entries,
        }
    }

    /// Whether there is nothing to show.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Shorten a carrier name for display: drop 【】 around it, every 快递/物流
/// and all whitespace. Falls back to 未知快递.
pub fn simplify_carrier_name(name: &str) -> String {
    let name = name.strip_prefix('【').unwrap_or(name);
    let name = name.strip_suffix('】').unwrap_or(name);
    let simplified = DISPLAY_NOISE.replace_all(name, "");

    if simplified.is_empty() {
        UNKNOWN_CARRIER.to_string()
    } else {
        simplified.into_owned()
    }
}
