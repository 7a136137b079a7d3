//! Notification parser combining the carrier, code and address rules.

use chrono::NaiveDateTime;
use tracing::{debug, trace};

use crate::models::config::ExtractionConfig;
use crate::models::parcel::{ParcelRecord, ParcelStatus};

use super::rules::{
    AddressExtractor, CarrierExtractor, ExtractionMatch, FieldExtractor, PickupCodeExtractor,
};
use super::{now, MessageParser};

/// Fields extracted from one notification line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedMessage {
    /// Carrier name, empty when no rule matched.
    pub carrier: String,
    /// Pickup code, empty when no rule matched.
    pub code: String,
    /// Pickup address, empty when no rule matched.
    pub address: String,
    /// Extraction time.
    pub received_at: NaiveDateTime,
}

impl ParsedMessage {
    /// Whether carrier, code and address are all present.
    pub fn is_complete(&self) -> bool {
        !self.carrier.is_empty() && !self.code.is_empty() && !self.address.is_empty()
    }

    /// Names of the fields that could not be extracted.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.carrier.is_empty() {
            missing.push("carrier");
        }
        if self.code.is_empty() {
            missing.push("code");
        }
        if self.address.is_empty() {
            missing.push("address");
        }
        missing
    }

    /// Convert into a stored record with the given status.
    pub fn into_record(self, status: ParcelStatus) -> ParcelRecord {
        ParcelRecord {
            carrier: self.carrier,
            pickup_code: self.code,
            address: self.address,
            received_at: self.received_at,
            status,
        }
    }
}

/// Rule-based notification parser.
#[derive(Debug, Clone, Default)]
pub struct NotificationParser {
    carrier: CarrierExtractor,
    code: PickupCodeExtractor,
    address: AddressExtractor,
}

impl NotificationParser {
    /// Create a parser with the built-in rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser from extraction configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new().with_extra_carriers(config.extra_carriers.iter().cloned())
    }

    /// Append carrier names tried after the built-in list.
    pub fn with_extra_carriers(mut self, carriers: impl IntoIterator<Item = String>) -> Self {
        self.carrier = self.carrier.with_extra_carriers(carriers);
        self
    }
}

impl MessageParser for NotificationParser {
    fn parse_at(&self, text: &str, received_at: NaiveDateTime) -> ParsedMessage {
        let carrier = take_value("carrier", self.carrier.extract(text));
        let code = take_value("code", self.code.extract(text));
        let address = take_value("address", self.address.extract(text));

        debug!(
            "Parsed message: carrier={:?}, code={:?}, address={:?}",
            carrier, code, address
        );

        ParsedMessage {
            carrier,
            code,
            address,
            received_at,
        }
    }
}

fn take_value(field: &str, found: Option<ExtractionMatch<String>>) -> String {
    match found {
        Some(m) => {
            trace!(
                "{} {:?} from rule {} at {:?} in {:?}",
                field, m.value, m.rule, m.position, m.source
            );
            m.value
        }
        None => String::new(),
    }
}

/// Parse a line with the built-in rules, stamped with the current time.
pub fn parse_message(text: &str) -> ParsedMessage {
    NotificationParser::new().parse_at(text, now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn fixed_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 8, 19)
            .unwrap()
            .and_hms_opt(18, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_parse_bracketed_notification() {
        let parsed = NotificationParser::new()
            .parse_at("【菜鸟裹裹】取件码:1234,地址:A小区", fixed_time());

        assert_eq!(parsed.carrier, "菜鸟");
        assert_eq!(parsed.code, "1234");
        assert_eq!(parsed.address, "A小区");
        assert_eq!(parsed.received_at, fixed_time());
        assert!(parsed.is_complete());
    }

    #[test]
    fn test_parse_unbracketed_notification() {
        let parsed = parse_message("顺丰快递 验证码 9988 请到菜鸟驿站领取");

        assert_eq!(parsed.carrier, "顺丰");
        assert_eq!(parsed.code, "9988");
        assert_eq!(parsed.address, "菜鸟驿站");
    }

    #[test]
    fn test_parse_realistic_messages() {
        let parser = NotificationParser::new();

        let parsed = parser.parse_at(
            "【中通快递】您的包裹已到达小区北门丰巢柜，取件码 6-2-3017，请及时取件",
            fixed_time(),
        );
        assert_eq!(parsed.carrier, "中通");
        assert_eq!(parsed.code, "6-2-3017");
        // "已到达" is not an address label
        assert_eq!(parsed.address, "");

        let parsed = parser.parse_at(
            "【京东物流】快件已送至3号楼快递驿站，提取码：JD8831，请凭码领取",
            fixed_time(),
        );
        assert_eq!(parsed.carrier, "京东");
        assert_eq!(parsed.code, "JD8831");
        assert_eq!(parsed.address, "3号楼快递驿站");
    }

    #[test]
    fn test_missing_fields() {
        let parsed = NotificationParser::new().parse_at("取件码 1234", fixed_time());

        assert!(!parsed.is_complete());
        assert_eq!(parsed.missing_fields(), vec!["carrier", "address"]);
    }

    #[test]
    fn test_never_fails_on_noise() {
        let parsed = parse_message("");
        assert_eq!(parsed.missing_fields(), vec!["carrier", "code", "address"]);

        let parsed = parse_message("【】()[]：:,，。");
        assert!(!parsed.is_complete());
    }

    #[test]
    fn test_extra_carriers_from_config() {
        let config = ExtractionConfig {
            extra_carriers: vec!["极兔".to_string()],
        };
        let parsed = NotificationParser::from_config(&config)
            .parse_at("极兔 取件码 5566 地址:东门", fixed_time());

        assert_eq!(parsed.carrier, "极兔");
        assert!(parsed.is_complete());
    }
}
