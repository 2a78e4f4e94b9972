//! Batch coordination across documents.
//!
//! Documents are processed one at a time in the given order. A document that
//! fails is recorded as a failure notice and the batch moves on.

use std::fmt::Display;

use serde::Serialize;
use tracing::{info, warn};

use crate::models::ledger::LineItem;

/// A document that could not be processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentFailure {
    /// Zero-based position in the batch.
    pub position: usize,
    /// Document identifier (usually the file name).
    pub document: String,
    /// Error detail.
    pub error: String,
}

/// A document that was processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentSummary {
    /// Zero-based position in the batch.
    pub position: usize,
    pub document: String,
    /// Number of line items contributed.
    pub rows: usize,
}

/// Combined result of a batch run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    /// All line items, documents in input order.
    pub items: Vec<LineItem>,
    /// Successfully processed documents, in input order.
    pub processed: Vec<DocumentSummary>,
    /// Failure notices, in input order.
    pub failures: Vec<DocumentFailure>,
    /// Set when processing stopped at the first failure.
    pub aborted: bool,
}

impl BatchReport {
    /// True when no document yielded any line item.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn document_count(&self) -> usize {
        self.processed.len() + self.failures.len()
    }
}

/// Maps a fallible per-document operation over a batch.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchProcessor {
    fail_fast: bool,
}

impl BatchProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop at the first failing document instead of continuing.
    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Run `process` on every document and collect items and failures.
    pub fn run<D, I, F, E>(&self, documents: I, mut process: F) -> BatchReport
    where
        I: IntoIterator<Item = D>,
        D: Display,
        F: FnMut(&D) -> Result<Vec<LineItem>, E>,
        E: Display,
    {
        let mut report = BatchReport::default();

        for (position, document) in documents.into_iter().enumerate() {
            match process(&document) {
                Ok(items) => {
                    info!("Processed {}: {} rows", document, items.len());
                    report.processed.push(DocumentSummary {
                        position,
                        document: document.to_string(),
                        rows: items.len(),
                    });
                    report.items.extend(items);
                }
                Err(e) => {
                    warn!("Failed to process {}: {}", document, e);
                    report.failures.push(DocumentFailure {
                        position,
                        document: document.to_string(),
                        error: e.to_string(),
                    });
                    if self.fail_fast {
                        report.aborted = true;
                        break;
                    }
                }
            }
        }

        report
    }
}
