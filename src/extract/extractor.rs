//! The page loop: embedded text first, OCR when a page has none.

use std::path::{Path, PathBuf};
use std::time::Instant;

use super::options::ExtractOptions;
use super::report::{ExtractionReport, FailureKind, PageFailure, PageOutcome, PageReport};
use crate::document::{PageRenderer, PageSource, PdfDocument};
use crate::error::{Error, Result};
use crate::ocr::{OcrEngine, TesseractEngine};

/// Extracts text from documents, falling back to OCR for scanned pages.
///
/// Pages are processed one at a time in index order. A failing page never
/// aborts the document; its failure is recorded in the page report and the
/// page contributes no text.
#[derive(Debug, Clone)]
pub struct Extractor<E = TesseractEngine> {
    engine: E,
    renderer: PageRenderer,
    options: ExtractOptions,
}

impl Extractor<TesseractEngine> {
    /// Create an extractor using Tesseract and `pdftoppm` from `PATH`.
    pub fn new() -> Self {
        Self::with_engine(TesseractEngine::new())
    }
}

impl Default for Extractor<TesseractEngine> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: OcrEngine> Extractor<E> {
    /// Create an extractor with a specific OCR engine.
    pub fn with_engine(engine: E) -> Self {
        Self {
            engine,
            renderer: PageRenderer::default(),
            options: ExtractOptions::default(),
        }
    }

    /// Set extraction options.
    pub fn with_options(mut self, options: ExtractOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the renderer used for PDF files opened by [`Extractor::extract`].
    pub fn with_renderer(mut self, renderer: PageRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn renderer(&self) -> &PageRenderer {
        &self.renderer
    }

    /// Open a PDF file and extract every selected page.
    ///
    /// Fails only when the document itself cannot be opened: missing file,
    /// not a PDF, unparsable or encrypted.
    pub fn extract<P: AsRef<Path>>(&self, path: P) -> Result<ExtractionReport> {
        let path = path.as_ref();
        let doc = PdfDocument::open_with_renderer(path, self.renderer.clone())?;
        log::info!(
            "Processing '{}' with {} pages...",
            path.display(),
            doc.page_count()
        );

        let mut report = self.extract_source(&doc, path);
        report.pdf_version = Some(doc.version().to_string());
        Ok(report)
    }

    /// Best-effort extraction: the concatenated text, or an empty string if
    /// the document could not be opened.
    pub fn extract_text<P: AsRef<Path>>(&self, path: P) -> String {
        let path = path.as_ref();
        match self.extract(path) {
            Ok(report) => report.text(),
            Err(Error::NotFound(missing)) => {
                log::error!("The file '{}' was not found.", missing.display());
                String::new()
            }
            Err(e) => {
                log::error!("Could not open '{}': {}", path.display(), e);
                String::new()
            }
        }
    }

    /// Run the page loop over an already opened document.
    pub fn extract_source<S>(&self, source: &S, path: impl Into<PathBuf>) -> ExtractionReport
    where
        S: PageSource + ?Sized,
    {
        let page_count = source.page_count();
        let pages = (0..page_count)
            .filter(|index| self.options.pages.includes(index + 1))
            .map(|index| self.process_page(source, index))
            .collect();

        ExtractionReport {
            path: path.into(),
            pdf_version: None,
            page_count,
            pages,
            separator: self.options.separator.clone(),
        }
    }

    fn process_page<S>(&self, source: &S, index: u32) -> PageReport
    where
        S: PageSource + ?Sized,
    {
        let start = Instant::now();
        let number = index + 1;

        let direct_failure = match source.page_text(index) {
            Ok(text) if self.options.accepts_direct_text(&text) || !self.options.ocr_fallback => {
                log::info!("Page {} processed using direct text extraction.", number);
                return page_report(index, PageOutcome::Direct(text), Vec::new(), start);
            }
            Ok(_) => None,
            Err(e) => {
                log::warn!("Direct text extraction failed for page {}: {}", number, e);
                Some(PageFailure::new(FailureKind::DirectExtraction, e.to_string()))
            }
        };

        if !self.options.ocr_fallback {
            if let Some(failure) = direct_failure {
                return page_report(index, PageOutcome::Failed(failure), Vec::new(), start);
            }
        }

        let outcome = match self.ocr_page(source, index) {
            Ok(text) => {
                log::info!("Page {} processed using OCR ({}).", number, self.engine.name());
                PageOutcome::Ocr(text)
            }
            Err(failure) => {
                log::warn!("Error on page {}: {}. Skipping this page.", number, failure);
                PageOutcome::Failed(failure)
            }
        };

        page_report(index, outcome, direct_failure.into_iter().collect(), start)
    }

    fn ocr_page<S>(&self, source: &S, index: u32) -> std::result::Result<String, PageFailure>
    where
        S: PageSource + ?Sized,
    {
        let image = source
            .render_page(index, self.options.dpi)
            .map_err(|e| PageFailure::new(FailureKind::Render, e.to_string()))?;

        self.engine
            .recognize(&image, &self.options.language)
            .map_err(|e| PageFailure::new(FailureKind::Recognition, e.to_string()))
    }
}

fn page_report(
    index: u32,
    outcome: PageOutcome,
    prior_failures: Vec<PageFailure>,
    start: Instant,
) -> PageReport {
    PageReport {
        index,
        outcome,
        prior_failures,
        elapsed_ms: start.elapsed().as_millis() as u64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::PageImage;
    use crate::ocr::OcrError;
    use std::cell::Cell;

    /// Two-page document: embedded text on page 1, a scan on page 2.
    struct TwoPages;

    impl PageSource for TwoPages {
        fn page_count(&self) -> u32 {
            2
        }

        fn page_text(&self, index: u32) -> Result<String> {
            Ok(if index == 0 { "typed".into() } else { "\n".into() })
        }

        fn render_page(&self, index: u32, _dpi: u32) -> Result<PageImage> {
            Ok(PageImage::from_file(format!("page-{}.png", index)))
        }
    }

    #[derive(Default)]
    struct CountingOcr {
        calls: Cell<u32>,
    }

    impl OcrEngine for CountingOcr {
        fn name(&self) -> &str {
            "counting"
        }

        fn is_available(&self) -> bool {
            true
        }

        fn recognize(&self, _image: &PageImage, _language: &str) -> std::result::Result<String, OcrError> {
            self.calls.set(self.calls.get() + 1);
            Ok("scanned".to_string())
        }
    }

    #[test]
    fn test_ocr_only_for_pages_without_text() {
        let extractor = Extractor::with_engine(CountingOcr::default());
        let report = extractor.extract_source(&TwoPages, "two.pdf");

        assert_eq!(extractor.engine().calls.get(), 1);
        assert_eq!(report.text(), "typedscanned");
        assert!(report.pages[0].is_direct());
        assert!(report.pages[1].is_ocr());
    }

    #[test]
    fn test_without_ocr_keeps_empty_page() {
        let extractor = Extractor::with_engine(CountingOcr::default())
            .with_options(ExtractOptions::new().without_ocr());
        let report = extractor.extract_source(&TwoPages, "two.pdf");

        assert_eq!(extractor.engine().calls.get(), 0);
        assert_eq!(report.pages[1].outcome, PageOutcome::Direct("\n".to_string()));
    }

    #[test]
    fn test_extract_text_missing_file_is_empty() {
        let extractor = Extractor::with_engine(CountingOcr::default());
        assert_eq!(extractor.extract_text("no/such/file.pdf"), "");
        assert!(matches!(
            extractor.extract("no/such/file.pdf"),
            Err(Error::NotFound(_))
        ));
    }
}
