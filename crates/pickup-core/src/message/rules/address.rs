//! Pickup address extraction.

use regex::Regex;

use super::patterns::{ADDRESS_LABELED, ADDRESS_LOCKER};
use super::{ExtractionMatch, FieldExtractor};

/// Address resolution rules, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressRule {
    /// Destination or location label (至, 地址, 请到, ...).
    Labeled,
    /// Locker label (取件地点, 取件柜).
    Locker,
}

impl AddressRule {
    pub const ORDER: [AddressRule; 2] = [AddressRule::Labeled, AddressRule::Locker];

    pub fn name(&self) -> &'static str {
        match self {
            AddressRule::Labeled => "labeled",
            AddressRule::Locker => "locker",
        }
    }

    fn pattern(&self) -> &'static Regex {
        match self {
            AddressRule::Labeled => &*ADDRESS_LABELED,
            AddressRule::Locker => &*ADDRESS_LOCKER,
        }
    }
}

/// Address field extractor.
///
/// The first rule whose pattern matches decides the result, even when the
/// captured text trims down to an empty string.
#[derive(Debug, Clone, Copy, Default)]
pub struct AddressExtractor;

impl AddressExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Apply a single rule.
    pub fn apply(&self, rule: AddressRule, text: &str) -> Option<ExtractionMatch<String>> {
        let caps = rule.pattern().captures(text)?;
        let whole = caps.get(0)?;
        let address = caps[1].trim().to_string();

        Some(
            ExtractionMatch::new(address, rule.name(), whole.as_str())
                .with_position(whole.start(), whole.end()),
        )
    }
}

impl FieldExtractor for AddressExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        AddressRule::ORDER
            .iter()
            .find_map(|rule| self.apply(*rule, text))
    }
}

/// Extract a pickup address from text.
pub fn extract_address(text: &str) -> Option<String> {
    AddressExtractor::new()
        .extract(text)
        .map(|m| m.value)
        .filter(|a| !a.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_labeled_address_terminators() {
        assert_eq!(extract_address("地址:A小区"), Some("A小区".to_string()));
        assert_eq!(extract_address("请到菜鸟驿站领取"), Some("菜鸟驿站".to_string()));
        assert_eq!(
            extract_address("您好，取件地址：B栋一楼。请凭码取件"),
            Some("B栋一楼".to_string())
        );
        assert_eq!(extract_address("派送至 南门丰巢柜 请凭码"), Some("南门丰巢柜".to_string()));
        assert_eq!(extract_address("快件已到西门快递柜, 取件码 1234"), Some("西门快递柜".to_string()));
    }

    #[test]
    fn test_leftmost_label_wins() {
        // "至" appears before "地址", so its capture is used
        assert_eq!(
            extract_address("已送至东门驿站，地址:西区"),
            Some("东门驿站".to_string())
        );
    }

    #[test]
    fn test_locker_fallback() {
        let found = AddressExtractor::new().extract("取件柜:3号柜").unwrap();
        assert_eq!(found.value, "3号柜");
        assert_eq!(found.rule, "locker");
    }

    #[test]
    fn test_labeled_rule_blocks_fallback() {
        // "地点" is a labeled synonym, so the locker rule never runs here
        let found = AddressExtractor::new().extract("取件地点：北门超市").unwrap();
        assert_eq!(found.value, "北门超市");
        assert_eq!(found.rule, "labeled");
    }

    #[test]
    fn test_blank_capture_is_empty() {
        let found = AddressExtractor::new().extract("地址:  ，取件柜:3号").unwrap();
        assert_eq!(found.value, "");
        assert_eq!(found.rule, "labeled");
        assert_eq!(extract_address("地址:  ，取件柜:3号"), None);
    }

    #[test]
    fn test_no_address() {
        assert_eq!(extract_address("【顺丰】取件码 1234"), None);
    }
}
