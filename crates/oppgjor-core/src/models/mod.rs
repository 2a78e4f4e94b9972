//! Data models.

pub mod config;
pub mod ledger;

pub use config::{ExportConfig, ExtractionConfig, OppgjorConfig, PdfConfig};
pub use ledger::{Account, LineItem};
