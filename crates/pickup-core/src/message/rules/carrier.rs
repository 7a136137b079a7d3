//! Carrier name extraction.

use super::patterns::{BRACKETED_NAME, CARRIER_ALIASES, CARRIER_SUFFIX, KNOWN_CARRIERS};
use super::{ExtractionMatch, FieldExtractor};

/// Carrier resolution rules, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarrierRule {
    /// First bracketed span, alias-mapped or suffix-stripped.
    Bracketed,
    /// First known carrier name found as a substring.
    KnownName,
}

impl CarrierRule {
    pub const ORDER: [CarrierRule; 2] = [CarrierRule::Bracketed, CarrierRule::KnownName];

    pub fn name(&self) -> &'static str {
        match self {
            CarrierRule::Bracketed => "bracketed",
            CarrierRule::KnownName => "known_name",
        }
    }
}

/// Carrier field extractor.
#[derive(Debug, Clone, Default)]
pub struct CarrierExtractor {
    extra_carriers: Vec<String>,
}

impl CarrierExtractor {
    /// Create an extractor using only the built-in carrier list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append carrier names tried after the built-in list.
    pub fn with_extra_carriers(mut self, carriers: impl IntoIterator<Item = String>) -> Self {
        self.extra_carriers.extend(carriers);
        self
    }

    /// Apply a single rule.
    pub fn apply(&self, rule: CarrierRule, text: &str) -> Option<ExtractionMatch<String>> {
        match rule {
            CarrierRule::Bracketed => self.bracketed(text),
            CarrierRule::KnownName => self.known_name(text),
        }
    }

    fn bracketed(&self, text: &str) -> Option<ExtractionMatch<String>> {
        let caps = BRACKETED_NAME.captures(text)?;
        let whole = caps.get(0)?;
        let candidate = caps[1].trim();

        let value = CARRIER_ALIASES
            .iter()
            .find(|(alias, _)| *alias == candidate)
            .map(|(_, label)| label.to_string())
            .unwrap_or_else(|| strip_carrier_suffix(candidate));

        if value.is_empty() {
            return None;
        }

        Some(
            ExtractionMatch::new(value, CarrierRule::Bracketed.name(), whole.as_str())
                .with_position(whole.start(), whole.end()),
        )
    }

    fn known_name(&self, text: &str) -> Option<ExtractionMatch<String>> {
        KNOWN_CARRIERS
            .iter()
            .copied()
            .chain(self.extra_carriers.iter().map(String::as_str))
            .filter(|name| !name.is_empty())
            .find_map(|name| {
                let start = text.find(name)?;
                let value = strip_carrier_suffix(name);
                if value.is_empty() {
                    return None;
                }
                Some(
                    ExtractionMatch::new(value, CarrierRule::KnownName.name(), name)
                        .with_position(start, start + name.len()),
                )
            })
    }
}

impl FieldExtractor for CarrierExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        CarrierRule::ORDER
            .iter()
            .find_map(|rule| self.apply(*rule, text))
    }
}

/// Extract a carrier name using the built-in rules.
pub fn extract_carrier(text: &str) -> Option<String> {
    CarrierExtractor::new().extract(text).map(|m| m.value)
}

/// Remove one trailing company-type suffix (快递, 物流, 速运, ...).
pub fn strip_carrier_suffix(name: &str) -> String {
    CARRIER_SUFFIX.replace(name.trim(), "").trim().to_string()
}
