//! Integration tests for the page loop, driven by in-memory documents.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use pdftok::{
    Error, ExtractOptions, Extractor, FailureKind, OcrEngine, OcrError, PageImage, PageOutcome,
    PageSelection, PageSource, Result,
};

/// How a fake page behaves.
enum FakePage {
    /// Embedded text
    Text(&'static str),
    /// No embedded text; the image name is looked up by the fake OCR engine
    Scan,
    /// Reading embedded text errors out
    BrokenText,
    /// No embedded text and rasterizing errors out
    Unrenderable,
}

struct FakeDocument {
    pages: Vec<FakePage>,
    rendered_dpi: Cell<Option<u32>>,
}

impl FakeDocument {
    fn new(pages: Vec<FakePage>) -> Self {
        Self {
            pages,
            rendered_dpi: Cell::new(None),
        }
    }
}

impl PageSource for FakeDocument {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn page_text(&self, index: u32) -> Result<String> {
        match &self.pages[index as usize] {
            FakePage::Text(text) => Ok(text.to_string()),
            FakePage::Scan | FakePage::Unrenderable => Ok("  \n ".to_string()),
            FakePage::BrokenText => Err(Error::TextExtract("bad font encoding".to_string())),
        }
    }

    fn render_page(&self, index: u32, dpi: u32) -> Result<PageImage> {
        self.rendered_dpi.set(Some(dpi));
        match &self.pages[index as usize] {
            FakePage::Unrenderable => Err(Error::Render("pdftoppm crashed".to_string())),
            _ => Ok(PageImage::from_file(format!("page-{}.png", index + 1))),
        }
    }
}

/// OCR engine answering from a table keyed by image file name.
#[derive(Default)]
struct FakeOcr {
    texts: HashMap<String, String>,
    failing: Vec<String>,
    languages: RefCell<Vec<String>>,
}

impl FakeOcr {
    fn with_text(mut self, image: &str, text: &str) -> Self {
        self.texts.insert(image.to_string(), text.to_string());
        self
    }

    fn failing_on(mut self, image: &str) -> Self {
        self.failing.push(image.to_string());
        self
    }
}

impl OcrEngine for FakeOcr {
    fn name(&self) -> &str {
        "fake"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn recognize(&self, image: &PageImage, language: &str) -> std::result::Result<String, OcrError> {
        self.languages.borrow_mut().push(language.to_string());
        let name = image
            .path()
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        if self.failing.contains(&name) {
            return Err(OcrError::Failed(format!("cannot read {}", name)));
        }
        Ok(self.texts.get(&name).cloned().unwrap_or_default())
    }
}

#[test]
fn test_direct_then_ocr_in_page_order() {
    let doc = FakeDocument::new(vec![FakePage::Text("Typed page. "), FakePage::Scan]);
    let ocr = FakeOcr::default().with_text("page-2.png", "Scanned page.");
    let report = Extractor::with_engine(ocr).extract_source(&doc, "mixed.pdf");

    assert_eq!(report.text(), "Typed page. Scanned page.");
    assert_eq!(report.direct_count(), 1);
    assert_eq!(report.ocr_count(), 1);
    assert_eq!(report.failed_count(), 0);
}

#[test]
fn test_ocr_failure_skips_only_that_page() {
    let doc = FakeDocument::new(vec![
        FakePage::Text("one "),
        FakePage::Scan,
        FakePage::Scan,
        FakePage::Text("four"),
    ]);
    let ocr = FakeOcr::default()
        .failing_on("page-2.png")
        .with_text("page-3.png", "three ");
    let report = Extractor::with_engine(ocr).extract_source(&doc, "flaky.pdf");

    assert_eq!(report.text(), "one three four");
    assert_eq!(report.pages.len(), 4);

    let failures: Vec<_> = report.failures().collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].0.index, 1);
    assert_eq!(failures[0].1.kind, FailureKind::Recognition);
}

#[test]
fn test_direct_error_falls_back_to_ocr() {
    let doc = FakeDocument::new(vec![FakePage::BrokenText]);
    let ocr = FakeOcr::default().with_text("page-1.png", "recovered");
    let report = Extractor::with_engine(ocr).extract_source(&doc, "broken.pdf");

    let page = &report.pages[0];
    assert_eq!(page.outcome, PageOutcome::Ocr("recovered".to_string()));
    assert_eq!(page.prior_failures.len(), 1);
    assert_eq!(page.prior_failures[0].kind, FailureKind::DirectExtraction);
    assert!(page.prior_failures[0].message.contains("bad font encoding"));
}

#[test]
fn test_direct_error_without_ocr_fails_page() {
    let doc = FakeDocument::new(vec![FakePage::BrokenText, FakePage::Text("ok")]);
    let report = Extractor::with_engine(FakeOcr::default())
        .with_options(ExtractOptions::new().without_ocr())
        .extract_source(&doc, "broken.pdf");

    assert_eq!(report.text(), "ok");
    assert_eq!(
        report.pages[0].failure().map(|f| f.kind),
        Some(FailureKind::DirectExtraction)
    );
}

#[test]
fn test_render_failure_is_reported() {
    let doc = FakeDocument::new(vec![FakePage::Unrenderable, FakePage::Text("tail")]);
    let ocr = FakeOcr::default();
    let extractor = Extractor::with_engine(ocr);
    let report = extractor.extract_source(&doc, "render.pdf");

    assert_eq!(report.text(), "tail");
    assert_eq!(report.pages[0].failure().map(|f| f.kind), Some(FailureKind::Render));
    assert!(extractor.engine().languages.borrow().is_empty());
}

#[test]
fn test_empty_ocr_result_is_not_a_failure() {
    let doc = FakeDocument::new(vec![FakePage::Scan]);
    let report = Extractor::with_engine(FakeOcr::default()).extract_source(&doc, "blank.pdf");

    assert_eq!(report.pages[0].outcome, PageOutcome::Ocr(String::new()));
    assert_eq!(report.failed_count(), 0);
    assert!(report.is_blank());
}

#[test]
fn test_separator_between_pages() {
    let doc = FakeDocument::new(vec![
        FakePage::Text("end"),
        FakePage::Text("start"),
        FakePage::Text("more"),
    ]);
    let report = Extractor::with_engine(FakeOcr::default())
        .with_options(ExtractOptions::new().with_separator("\n"))
        .extract_source(&doc, "sep.pdf");

    assert_eq!(report.text(), "end\nstart\nmore");
    assert_eq!(pdftok::tokenize(&report.text()).count(), 3);
}

#[test]
fn test_default_concatenation_can_merge_words() {
    let doc = FakeDocument::new(vec![FakePage::Text("end"), FakePage::Text("start")]);
    let report = Extractor::with_engine(FakeOcr::default()).extract_source(&doc, "merge.pdf");

    assert_eq!(report.text(), "endstart");
    assert_eq!(pdftok::tokenize(&report.text()).tokens(), ["endstart"]);
}

#[test]
fn test_page_selection() {
    let doc = FakeDocument::new(vec![
        FakePage::Text("a"),
        FakePage::Text("b"),
        FakePage::Text("c"),
        FakePage::Text("d"),
    ]);
    let options = ExtractOptions::new().with_pages(PageSelection::parse("2,4").unwrap());
    let report = Extractor::with_engine(FakeOcr::default())
        .with_options(options)
        .extract_source(&doc, "pick.pdf");

    assert_eq!(report.page_count, 4);
    assert_eq!(report.pages.iter().map(|p| p.index).collect::<Vec<_>>(), [1, 3]);
    assert_eq!(report.text(), "bd");
}

#[test]
fn test_language_and_dpi_reach_collaborators() {
    let doc = FakeDocument::new(vec![FakePage::Scan]);
    let extractor = Extractor::with_engine(FakeOcr::default())
        .with_options(ExtractOptions::new().with_language("deu").with_dpi(300));
    extractor.extract_source(&doc, "de.pdf");

    assert_eq!(*extractor.engine().languages.borrow(), ["deu"]);
    assert_eq!(doc.rendered_dpi.get(), Some(300));
}

#[test]
fn test_min_text_chars_sends_sparse_pages_to_ocr() {
    let doc = FakeDocument::new(vec![FakePage::Text("12")]);
    let ocr = FakeOcr::default().with_text("page-1.png", "12 Main Street");
    let report = Extractor::with_engine(ocr)
        .with_options(ExtractOptions::new().with_min_text_chars(5))
        .extract_source(&doc, "sparse.pdf");

    assert_eq!(report.text(), "12 Main Street");
}

#[test]
fn test_empty_document() {
    let doc = FakeDocument::new(Vec::new());
    let report = Extractor::with_engine(FakeOcr::default()).extract_source(&doc, "empty.pdf");

    assert!(report.pages.is_empty());
    assert_eq!(report.text(), "");
}
