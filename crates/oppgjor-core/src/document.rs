//! Single-document pipeline: first-page text, extraction, reconciliation.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{ExtractionError, Result};
use crate::ledger::{self, Reconciliation};
use crate::models::config::{OppgjorConfig, PdfConfig};
use crate::models::ledger::LineItem;
use crate::pdf::{PdfExtractor, PdfProcessor};
use crate::settlement::{SettlementExtractor, SettlementParser};

/// A reconciled settlement document.
#[derive(Debug, Clone)]
pub struct ProcessedDocument {
    /// Extracted items followed by the residual item, if any.
    pub items: Vec<LineItem>,
    /// Account totals before the residual item was appended.
    pub reconciliation: Reconciliation,
    /// Extraction warnings.
    pub warnings: Vec<String>,
}

/// Processes settlement documents one at a time.
pub struct DocumentProcessor {
    parser: SettlementParser,
    pdf: PdfConfig,
}

impl DocumentProcessor {
    pub fn new() -> Self {
        Self::from_config(&OppgjorConfig::default())
    }

    pub fn from_config(config: &OppgjorConfig) -> Self {
        Self {
            parser: SettlementParser::from_config(&config.extraction),
            pdf: config.pdf.clone(),
        }
    }

    /// Extract and reconcile already extracted page text.
    pub fn process_text(&self, text: &str) -> ProcessedDocument {
        let extraction = self.parser.parse(text);
        let reconciliation = ledger::summarize(&extraction.items);
        let items = ledger::balance(extraction.items);

        debug!(
            "Extracted {} rows in {}ms, residual {}",
            items.len(),
            extraction.processing_time_ms,
            reconciliation.residual
        );

        ProcessedDocument {
            items,
            reconciliation,
            warnings: extraction.warnings,
        }
    }

    /// Process a `.pdf` statement or a `.txt` file holding page text.
    pub fn process_file(&self, path: &Path) -> Result<ProcessedDocument> {
        info!("Processing file: {}", path.display());
        let text = self.read_page_text(path)?;

        let length = text.trim().chars().count();
        if length < self.pdf.min_text_length {
            return Err(ExtractionError::NoText(length).into());
        }

        Ok(self.process_text(&text))
    }

    /// Read the first page's text.
    pub fn read_page_text(&self, path: &Path) -> Result<String> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "pdf" => {
                let data = fs::read(path)?;
                let mut extractor = PdfExtractor::new();
                extractor.load(&data)?;
                debug!("PDF has {} pages, reading page 1", extractor.page_count());
                Ok(extractor.first_page_text()?)
            }
            "txt" => Ok(fs::read_to_string(path)?),
            _ => Err(ExtractionError::UnsupportedFormat(extension).into()),
        }
    }
}

impl Default for DocumentProcessor {
    fn default() -> Self {
        Self::new()
    }
}
