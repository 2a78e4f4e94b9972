//! Configuration structures for the reconciliation pipeline.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{OppgjorError, Result};

/// Main configuration for the oppgjor pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OppgjorConfig {
    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Settlement field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Ledger export configuration.
    pub export: ExportConfig,
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Minimum trimmed first-page text length to accept a document.
    pub min_text_length: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self { min_text_length: 1 }
    }
}

/// Settlement extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Provider name preceding the seller in the `Selger:` line.
    pub seller_prefix: String,

    /// Drop invoice dates that are not real calendar dates.
    pub validate_dates: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            seller_prefix: "Godt Brød".to_string(),
            validate_dates: false,
        }
    }
}

/// Ledger export configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Field delimiter.
    pub delimiter: char,

    /// Write amounts with a decimal comma (`1234,56`).
    pub decimal_comma: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            decimal_comma: false,
        }
    }
}

impl OppgjorConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| OppgjorError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| OppgjorError::Config(e.to_string()))?;
        fs::write(path, content)?;
        Ok(())
    }
}
