//! Rule-based field extractors for settlement statements.

pub mod accounts;
pub mod amounts;
pub mod dates;
pub mod patterns;
pub mod seller;

pub use accounts::{default_rules, AmountRule, RuleOutcome, SignPolicy};
pub use amounts::{extract_amount, format_amount, parse_amount, AmountExtractor};
pub use dates::{parse_date, DateExtractor};
pub use patterns::*;
pub use seller::SellerExtractor;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// A value found in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Position in source text.
    pub position: Option<(usize, usize)>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, source: impl Into<String>) -> Self {
        Self {
            value,
            position: None,
            source: source.into(),
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}
