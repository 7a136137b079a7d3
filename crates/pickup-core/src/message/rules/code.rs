//! Pickup code extraction.

use super::patterns::PICKUP_CODE;
use super::{ExtractionMatch, FieldExtractor};

/// Shortest accepted pickup code.
pub const MIN_CODE_LEN: usize = 4;
/// Longest accepted pickup code.
pub const MAX_CODE_LEN: usize = 20;

/// Pickup code field extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct PickupCodeExtractor;

impl PickupCodeExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for PickupCodeExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let caps = PICKUP_CODE.captures(text)?;
        let whole = caps.get(0)?;
        let code = caps[1].trim().to_string();

        Some(
            ExtractionMatch::new(code, "labeled", whole.as_str())
                .with_position(whole.start(), whole.end()),
        )
    }
}

/// Extract a pickup code from text.
pub fn extract_pickup_code(text: &str) -> Option<String> {
    PickupCodeExtractor::new().extract(text).map(|m| m.value)
}

/// Whether `code` has an acceptable length and only `[A-Za-z0-9-]` characters.
pub fn is_valid_pickup_code(code: &str) -> bool {
    (MIN_CODE_LEN..=MAX_CODE_LEN).contains(&code.len())
        && code.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_label_synonyms() {
        assert_eq!(extract_pickup_code("取件码:1234"), Some("1234".to_string()));
        assert_eq!(extract_pickup_code("验证码 9988 请到"), Some("9988".to_string()));
        assert_eq!(extract_pickup_code("取件密码：A1B2C3"), Some("A1B2C3".to_string()));
        assert_eq!(extract_pickup_code("提取码 5-2-0101"), Some("5-2-0101".to_string()));
        assert_eq!(extract_pickup_code("柜门密码 778899"), Some("778899".to_string()));
    }

    #[test]
    fn test_latin_label_is_case_insensitive() {
        assert_eq!(extract_pickup_code("Your CODE: ab12cd"), Some("ab12cd".to_string()));
        assert_eq!(extract_pickup_code("pickup code 3311"), Some("3311".to_string()));
    }

    #[test]
    fn test_code_stops_at_non_ascii() {
        assert_eq!(extract_pickup_code("取件码1234请尽快取件"), Some("1234".to_string()));
        assert_eq!(extract_pickup_code("取件码 12_34"), None);
    }

    #[test]
    fn test_code_length_bounds() {
        assert_eq!(extract_pickup_code("取件码 123"), None);
        let long = extract_pickup_code("取件码 ABCDEFGHIJKLMNOPQRSTUVWXYZ").unwrap();
        assert_eq!(long, "ABCDEFGHIJKLMNOPQRST");
    }

    #[test]
    fn test_match_records_span() {
        let text = "【中通】取件码:1234,地址:A";
        let found = PickupCodeExtractor::new().extract(text).unwrap();
        let (start, end) = found.position.unwrap();

        assert_eq!(found.rule, "labeled");
        assert_eq!(found.source, "取件码:1234");
        assert_eq!(&text[start..end], found.source);
    }

    #[test]
    fn test_first_label_wins() {
        assert_eq!(
            extract_pickup_code("取件码 1111，验证码 2222"),
            Some("1111".to_string())
        );
    }

    #[test]
    fn test_extracted_codes_are_valid() {
        let samples = [
            "取件码:1234,地址:A小区",
            "验证码 9988",
            "code=----",
            "密码 ab-CD-12-ef-34-gh-56-ij-78",
            "提取码：  X9",
        ];
        for sample in samples {
            if let Some(code) = extract_pickup_code(sample) {
                assert!(is_valid_pickup_code(&code), "invalid code {code:?} from {sample:?}");
            }
        }
    }
}
