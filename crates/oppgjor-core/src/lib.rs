//! Core library for settlement statement reconciliation.
//!
//! This crate provides:
//! - PDF first-page text extraction
//! - Rule-based extraction of settlement fields (seller, date, payout, sales, fees)
//! - Exact decimal reconciliation with a balancing residual entry
//! - Batch coordination with per-document failure isolation
//! - Ledger export as delimited rows

pub mod batch;
pub mod document;
pub mod error;
pub mod export;
pub mod ledger;
pub mod models;
pub mod pdf;
pub mod settlement;

pub use batch::{BatchProcessor, BatchReport, DocumentFailure, DocumentSummary};
pub use document::{DocumentProcessor, ProcessedDocument};
pub use error::{OppgjorError, Result};
pub use export::LedgerWriter;
pub use ledger::{balance, reconcile, summarize, Reconciliation, RESIDUAL_THRESHOLD};
pub use models::ledger::{Account, LineItem};
pub use pdf::{PdfExtractor, PdfProcessor};
pub use settlement::{ExtractionResult, SettlementExtractor, SettlementParser};
