//! Error types for pdftok.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::ocr::OcrError;

/// Result type alias for pdftok operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while opening or extracting a document.
///
/// Page-level problems never surface as an `Error` from
/// [`Extractor::extract`](crate::Extractor::extract); they are recorded in the
/// per-page report instead.
#[derive(Error, Debug)]
pub enum Error {
    /// The input path does not exist.
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// I/O error when reading files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file format is not recognized as PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF version is not supported.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// Error parsing PDF structure.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The PDF document is encrypted.
    #[error("Document is encrypted")]
    Encrypted,

    /// Page index is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// Invalid page range specification.
    #[error("Invalid page range: {0}")]
    InvalidPageRange(String),

    /// Direct text extraction failed.
    #[error("Text extraction error: {0}")]
    TextExtract(String),

    /// Rasterizing a page failed.
    #[error("Render error: {0}")]
    Render(String),

    /// OCR engine error.
    #[error(transparent)]
    Ocr(#[from] OcrError),
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}
