//! Per-page and per-document extraction results.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Stage of the page pipeline that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Reading embedded text
    DirectExtraction,
    /// Rasterizing the page for OCR
    Render,
    /// Running the OCR engine
    Recognition,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FailureKind::DirectExtraction => "direct text extraction",
            FailureKind::Render => "page rendering",
            FailureKind::Recognition => "OCR",
        };
        f.write_str(s)
    }
}

/// Why a page step failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl PageFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for PageFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed: {}", self.kind, self.message)
    }
}

/// What a page contributed to the document text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", content = "value", rename_all = "snake_case")]
pub enum PageOutcome {
    /// Embedded text read directly from the page.
    Direct(String),
    /// Text recognized from the rendered page (may be empty).
    Ocr(String),
    /// No text could be produced.
    Failed(PageFailure),
}

/// Result of processing a single page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageReport {
    /// 0-based page index within the document
    pub index: u32,

    pub outcome: PageOutcome,

    /// Earlier failures on this page that did not decide its outcome,
    /// e.g. a direct-extraction error before the OCR pass
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prior_failures: Vec<PageFailure>,

    /// Wall-clock time spent on the page
    pub elapsed_ms: u64,
}

impl PageReport {
    /// 1-indexed page number for display.
    pub fn number(&self) -> u32 {
        self.index + 1
    }

    /// Text this page contributes (empty for failed pages).
    pub fn text(&self) -> &str {
        match &self.outcome {
            PageOutcome::Direct(text) | PageOutcome::Ocr(text) => text,
            PageOutcome::Failed(_) => "",
        }
    }

    /// The failure that left this page without text, if any.
    pub fn failure(&self) -> Option<&PageFailure> {
        match &self.outcome {
            PageOutcome::Failed(failure) => Some(failure),
            _ => None,
        }
    }

    pub fn is_direct(&self) -> bool {
        matches!(self.outcome, PageOutcome::Direct(_))
    }

    pub fn is_ocr(&self) -> bool {
        matches!(self.outcome, PageOutcome::Ocr(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, PageOutcome::Failed(_))
    }
}

/// Result of extracting a whole document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionReport {
    /// Source file
    pub path: PathBuf,

    /// PDF version from the file header, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdf_version: Option<String>,

    /// Total pages in the document, selected or not
    pub page_count: u32,

    /// Processed pages in ascending index order
    pub pages: Vec<PageReport>,

    /// Text inserted between page outputs by [`ExtractionReport::text`]
    pub separator: String,
}

impl ExtractionReport {
    /// Concatenate page outputs in page order.
    pub fn text(&self) -> String {
        let mut text = String::new();
        for (i, page) in self.pages.iter().enumerate() {
            if i > 0 {
                text.push_str(&self.separator);
            }
            text.push_str(page.text());
        }
        text
    }

    /// Number of pages whose text came from embedded content.
    pub fn direct_count(&self) -> usize {
        self.pages.iter().filter(|p| p.is_direct()).count()
    }

    /// Number of pages whose text came from OCR.
    pub fn ocr_count(&self) -> usize {
        self.pages.iter().filter(|p| p.is_ocr()).count()
    }

    /// Number of pages that produced no text because of an error.
    pub fn failed_count(&self) -> usize {
        self.pages.iter().filter(|p| p.is_failed()).count()
    }

    /// Pages that failed, with their reasons.
    pub fn failures(&self) -> impl Iterator<Item = (&PageReport, &PageFailure)> {
        self.pages
            .iter()
            .filter_map(|p| p.failure().map(|f| (p, f)))
    }

    /// True if no page produced any non-whitespace text.
    pub fn is_blank(&self) -> bool {
        self.pages.iter().all(|p| p.text().trim().is_empty())
    }
}
