//! Error types for the oppgjor-core library.

use thiserror::Error;

/// Main error type for the oppgjor library.
#[derive(Error, Debug)]
pub enum OppgjorError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Settlement extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Ledger export error.
    #[error("export error: {0}")]
    Export(#[from] ExportError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),
}

/// Errors related to settlement document handling.
///
/// Individual fields that fail to match are never errors; these cover
/// conditions that make a whole document unusable.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The document yielded no usable text.
    #[error("no text layer found (got {0} characters)")]
    NoText(usize),

    /// The file type is not handled.
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),
}

/// Errors related to writing the ledger file.
#[derive(Error, Debug)]
pub enum ExportError {
    /// CSV writer failure.
    #[error("failed to write rows: {0}")]
    Csv(#[from] csv::Error),

    /// The delimiter cannot be represented as a single byte.
    #[error("delimiter must be a single ASCII character, got {0:?}")]
    Delimiter(char),

    /// Failed to flush the underlying writer.
    #[error("failed to flush output: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the oppgjor library.
pub type Result<T> = std::result::Result<T, OppgjorError>;
