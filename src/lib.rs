//! # pdftok
//!
//! Extract text from PDF documents and count its tokens.
//!
//! Each page is read for embedded text first. Pages without any (scans,
//! image-only pages) are rendered with `pdftoppm` and run through Tesseract
//! OCR. Page outputs are concatenated in page order and can then be split
//! into word and punctuation tokens.
//!
//! ## Quick Start
//!
//! ```no_run
//! let text = pdftok::extract_text("manual.pdf");
//! let tokens = pdftok::tokenize(&text);
//! println!("{} tokens", tokens.count());
//! ```
//!
//! When page-level detail matters, use [`Extractor`] directly:
//!
//! ```no_run
//! use pdftok::{ExtractOptions, Extractor};
//!
//! fn main() -> pdftok::Result<()> {
//!     let options = ExtractOptions::new().with_language("eng").with_separator("\n");
//!     let report = Extractor::new().with_options(options).extract("scan.pdf")?;
//!     for (page, failure) in report.failures() {
//!         eprintln!("page {}: {}", page.number(), failure);
//!     }
//!     println!("{}", report.text());
//!     Ok(())
//! }
//! ```
//!
//! Requires the `pdftoppm` (Poppler) and `tesseract` binaries for the OCR
//! path; documents with embedded text need neither.

pub mod detect;
pub mod document;
pub mod error;
pub mod extract;
pub mod ocr;
pub mod tokenize;

pub use detect::is_pdf;
pub use document::{PageImage, PageRenderer, PageSource, PdfDocument};
pub use error::{Error, Result};
pub use extract::{
    ExtractOptions, ExtractionReport, Extractor, FailureKind, PageFailure, PageOutcome,
    PageReport, PageSelection,
};
pub use ocr::{OcrConfig, OcrEngine, OcrError, TesseractEngine};
pub use tokenize::{TokenizationResult, Tokenizer};

use std::path::Path;

/// Extract the text of a PDF file with default options.
///
/// Best effort: returns an empty string when the file is missing or cannot
/// be opened, and skips pages that fail. Problems are logged through the
/// `log` facade. Use [`Extractor::extract`] to inspect them instead.
pub fn extract_text<P: AsRef<Path>>(path: P) -> String {
    Extractor::new().extract_text(path)
}

/// Extract a PDF file with custom options and return the per-page report.
pub fn extract_with_options<P: AsRef<Path>>(
    path: P,
    options: ExtractOptions,
) -> Result<ExtractionReport> {
    Extractor::new().with_options(options).extract(path)
}

/// Split text into word and punctuation tokens.
pub fn tokenize(text: &str) -> TokenizationResult {
    Tokenizer::new().tokenize(text)
}

/// Tokenize a JSON value; non-string values yield no tokens.
pub fn tokenize_value(value: &serde_json::Value) -> TokenizationResult {
    Tokenizer::new().tokenize_value(value)
}
