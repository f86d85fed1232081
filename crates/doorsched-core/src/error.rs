//! Error types for the doorsched-core library.

use thiserror::Error;

/// Main error type for the doorsched library.
#[derive(Error, Debug)]
pub enum DoorschedError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Schedule extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

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

/// Errors surfaced at the edges of schedule extraction.
///
/// The line scan itself never fails; these are raised by callers that
/// need to turn an empty result or a bad dialect name into an error.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ExtractionError {
    /// The document yielded no rows under the selected dialect.
    #[error("no schedule data extracted")]
    NoData,

    /// The requested dialect name is not known.
    #[error("unknown dialect: {0}")]
    UnknownDialect(String),
}

/// Result type for the doorsched library.
pub type Result<T> = std::result::Result<T, DoorschedError>;
