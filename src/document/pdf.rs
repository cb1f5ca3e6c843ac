//! PDF documents backed by lopdf.

use std::path::{Path, PathBuf};

use lopdf::Document as LopdfDocument;

use super::render::{PageImage, PageRenderer};
use super::PageSource;
use crate::detect::sniff_path;
use crate::error::{Error, Result};

/// An opened PDF file.
///
/// The whole file is parsed on open; the handle holds no OS resources
/// afterwards and is released when dropped.
pub struct PdfDocument {
    path: PathBuf,
    version: String,
    doc: LopdfDocument,
    /// 1-indexed page numbers in document order.
    page_numbers: Vec<u32>,
    renderer: PageRenderer,
}

impl PdfDocument {
    /// Open a PDF file, rendering scanned pages with `pdftoppm` from `PATH`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_renderer(path, PageRenderer::default())
    }

    /// Open a PDF file with a specific page renderer.
    pub fn open_with_renderer<P: AsRef<Path>>(path: P, renderer: PageRenderer) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::NotFound(path.to_path_buf()));
        }

        let version = sniff_path(path)?;

        let doc = LopdfDocument::load(path).map_err(|e| match e {
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::from(e),
        })?;

        let page_numbers = doc.get_pages().keys().copied().collect();

        Ok(Self {
            path: path.to_path_buf(),
            version,
            doc,
            page_numbers,
            renderer,
        })
    }

    /// Path the document was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// PDF version from the file header (e.g., "1.7").
    pub fn version(&self) -> &str {
        &self.version
    }

    fn page_number(&self, index: u32) -> Result<u32> {
        self.page_numbers
            .get(index as usize)
            .copied()
            .ok_or(Error::PageOutOfRange(index + 1, self.page_count()))
    }
}

impl PageSource for PdfDocument {
    fn page_count(&self) -> u32 {
        self.page_numbers.len() as u32
    }

    fn page_text(&self, index: u32) -> Result<String> {
        let number = self.page_number(index)?;
        self.doc
            .extract_text(&[number])
            .map_err(|e| Error::TextExtract(e.to_string()))
    }

    fn render_page(&self, index: u32, dpi: u32) -> Result<PageImage> {
        let number = self.page_number(index)?;
        self.renderer.render(&self.path, number, dpi)
    }
}

impl std::fmt::Debug for PdfDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PdfDocument")
            .field("path", &self.path)
            .field("version", &self.version)
            .field("pages", &self.page_numbers.len())
            .finish()
    }
}
