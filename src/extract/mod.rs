//! Document-to-text extraction.

mod extractor;
mod options;
mod report;

pub use extractor::Extractor;
pub use options::{ExtractOptions, PageSelection};
pub use report::{ExtractionReport, FailureKind, PageFailure, PageOutcome, PageReport};
