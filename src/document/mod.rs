//! Document access.
//!
//! The extractor talks to documents only through [`PageSource`], which keeps
//! the concrete PDF library (lopdf) and the rasterizer (pdftoppm) out of the
//! page loop and lets tests drive it with in-memory documents.

mod pdf;
mod render;

pub use pdf::PdfDocument;
pub use render::{PageImage, PageRenderer};

use crate::error::Result;

/// An opened, read-only document made of ordered pages.
///
/// Page indices are 0-based.
pub trait PageSource {
    /// Number of pages in the document.
    fn page_count(&self) -> u32;

    /// Embedded text of a page, without rendering it.
    fn page_text(&self, index: u32) -> Result<String>;

    /// Rasterize a page at the given resolution.
    fn render_page(&self, index: u32, dpi: u32) -> Result<PageImage>;
}

impl<T: PageSource + ?Sized> PageSource for &T {
    fn page_count(&self) -> u32 {
        (**self).page_count()
    }

    fn page_text(&self, index: u32) -> Result<String> {
        (**self).page_text(index)
    }

    fn render_page(&self, index: u32, dpi: u32) -> Result<PageImage> {
        (**self).render_page(index, dpi)
    }
}
