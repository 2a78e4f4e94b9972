//! Settlement statement field extraction.

mod parser;
pub mod rules;

pub use parser::{ExtractionResult, SettlementParser};

use crate::models::ledger::LineItem;

/// Trait for settlement page extractors.
pub trait SettlementExtractor {
    /// Extract line items, warnings and timing from page text.
    fn parse(&self, text: &str) -> ExtractionResult;

    /// Extract line items from page text.
    fn extract(&self, text: &str) -> Vec<LineItem> {
        self.parse(text).items
    }
}
