//! Invoice date extraction.

use chrono::NaiveDate;

use super::patterns::INVOICE_DATE;
use super::{ExtractionMatch, FieldExtractor};

/// Extracts the `Fakturadato: DD.MM.YYYY` value verbatim.
pub struct DateExtractor {
    validate: bool,
}

impl DateExtractor {
    pub fn new() -> Self {
        Self { validate: false }
    }

    /// Skip dates that are not real calendar dates.
    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    fn accepts(&self, date: &str) -> bool {
        !self.validate || parse_date(date).is_some()
    }
}

/// Parse a `DD.MM.YYYY` date, rejecting days that do not exist.
pub fn parse_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date, "%d.%m.%Y").ok()
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        INVOICE_DATE
            .captures_iter(text)
            .filter_map(|caps| {
                let date = caps.get(1)?;
                if !self.accepts(date.as_str()) {
                    return None;
                }
                Some(
                    ExtractionMatch::new(date.as_str().to_string(), date.as_str())
                        .with_position(date.start(), date.end()),
                )
            })
            .collect()
    }
}
