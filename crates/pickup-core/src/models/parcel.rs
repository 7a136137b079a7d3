//! Parcel record model and its JSON wire format.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// A stored parcel awaiting (or past) pickup.
///
/// Decoding a JSON object never fails: unset or unexpected values fall back
/// to empty text, [`ParcelStatus::Pending`] and the Unix epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParcelRecord {
    /// Short carrier display name.
    #[serde(rename = "type", default, deserialize_with = "lenient::text")]
    pub carrier: String,

    /// Code used to claim the parcel. Unique within a collection.
    #[serde(rename = "code", default, deserialize_with = "lenient::text")]
    pub pickup_code: String,

    /// Free-text pickup location.
    #[serde(default, deserialize_with = "lenient::text")]
    pub address: String,

    /// When the notification was captured.
    #[serde(rename = "time", default, with = "timestamp")]
    pub received_at: NaiveDateTime,

    /// Pickup status.
    #[serde(default, deserialize_with = "lenient::status")]
    pub status: ParcelStatus,
}

impl ParcelRecord {
    /// Create a pending record.
    pub fn new(
        carrier: impl Into<String>,
        pickup_code: impl Into<String>,
        address: impl Into<String>,
        received_at: NaiveDateTime,
    ) -> Self {
        Self {
            carrier: carrier.into(),
            pickup_code: pickup_code.into(),
            address: address.into(),
            received_at,
            status: ParcelStatus::Pending,
        }
    }

    /// Label used in import notices, e.g. `顺丰 - 9988`.
    pub fn label(&self) -> String {
        format!("{} - {}", self.carrier, self.pickup_code)
    }

    /// Whether the parcel still needs to be picked up.
    pub fn is_pending(&self) -> bool {
        self.status != ParcelStatus::Collected
    }
}

/// Pickup status of a parcel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ParcelStatus {
    /// Waiting at the locker or counter.
    #[default]
    #[serde(rename = "待取件")]
    Pending,
    /// Already picked up.
    #[serde(rename = "已取件")]
    Collected,
}

impl ParcelStatus {
    /// Stored/display value.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParcelStatus::Pending => "待取件",
            ParcelStatus::Collected => "已取件",
        }
    }
}

/// Error returned when a status string is not recognized.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown parcel status: {0}")]
pub struct ParseStatusError(String);

impl FromStr for ParcelStatus {
    type Err = ParseStatusError;

    /// Parse from a stored value or an English keyword.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "待取件" | "pending" => Ok(ParcelStatus::Pending),
            "已取件" | "collected" | "picked" => Ok(ParcelStatus::Collected),
            _ => Err(ParseStatusError(s.to_string())),
        }
    }
}

impl fmt::Display for ParcelStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field decoders that accept whatever older stores contain.
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    use super::ParcelStatus;

    /// Strings as-is, `null` as empty, other scalars in their JSON form.
    pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Null => String::new(),
            Value::String(s) => s,
            other => other.to_string(),
        })
    }

    /// Unset, empty or unknown statuses are pending.
    pub fn status<'de, D>(deserializer: D) -> Result<ParcelStatus, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        Ok(raw
            .as_str()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default())
    }
}

/// Serde adapter for the `time` field.
///
/// Writes `YYYY-MM-DDTHH:MM:SS`. Reads that, RFC 3339, and the locale
/// strings older stores contain. Anything else decodes as the Unix epoch.
pub mod timestamp {
    use super::*;
    use serde::{Deserializer, Serializer};

    /// Canonical write format.
    pub const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

    const ACCEPTED: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y/%m/%d %H:%M:%S",
        "%Y/%m/%d, %H:%M:%S",
        "%m/%d/%Y, %I:%M:%S %p",
        "%d/%m/%Y, %H:%M:%S",
    ];

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = serde_json::Value::deserialize(deserializer)?;
        match raw.as_str().and_then(parse) {
            Some(dt) => Ok(dt),
            None => {
                let fallback = NaiveDateTime::default();
                warn!("Unrecognized parcel time {}, using {}", raw, fallback);
                Ok(fallback)
            }
        }
    }

    /// Parse any accepted timestamp representation.
    pub fn parse(raw: &str) -> Option<NaiveDateTime> {
        let raw = raw.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.naive_local());
        }
        ACCEPTED
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .or_else(|| parse_meridiem(raw))
    }

    /// `2025/8/19 上午9:00:00`, as older zh-CN locales print it.
    fn parse_meridiem(raw: &str) -> Option<NaiveDateTime> {
        let (marker, suffix) = if raw.contains("上午") {
            ("上午", "AM")
        } else if raw.contains("下午") {
            ("下午", "PM")
        } else {
            return None;
        };

        let normalized = format!("{} {}", raw.replacen(marker, " ", 1), suffix);
        NaiveDateTime::parse_from_str(&normalized, "%Y/%m/%d %I:%M:%S %p").ok()
    }
}
