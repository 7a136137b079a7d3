//! Rule-based field extractors for parcel notifications.

pub mod address;
pub mod carrier;
pub mod code;
pub mod patterns;

pub use address::{extract_address, AddressExtractor, AddressRule};
pub use carrier::{extract_carrier, strip_carrier_suffix, CarrierExtractor, CarrierRule};
pub use code::{extract_pickup_code, is_valid_pickup_code, PickupCodeExtractor};
pub use patterns::*;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text. The first matching rule wins.
    fn extract(&self, text: &str) -> Option<Self::Output>;
}

/// An extracted value together with the rule that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Name of the rule that fired.
    pub rule: &'static str,
    /// Byte span of the whole match in the source text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, rule: &'static str, source: impl Into<String>) -> Self {
        Self {
            value,
            rule,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}
