//! OCR engine abstraction.

use std::path::PathBuf;
use thiserror::Error;

use crate::document::PageImage;

/// Errors from OCR engines.
#[derive(Debug, Error)]
pub enum OcrError {
    #[error("OCR engine not available: {0}")]
    EngineUnavailable(String),

    #[error("OCR failed: {0}")]
    Failed(String),

    #[error("OCR I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Trait for OCR engines.
pub trait OcrEngine {
    /// Short engine name used in log lines and reports.
    fn name(&self) -> &str;

    /// Check whether the engine can run (binaries installed, models present).
    fn is_available(&self) -> bool;

    /// Recognize the text in a rendered page.
    ///
    /// `language` is an engine-specific language code such as `"eng"`.
    /// An image without recognizable text yields `Ok` with an empty string.
    fn recognize(&self, image: &PageImage, language: &str) -> Result<String, OcrError>;
}

impl<T: OcrEngine + ?Sized> OcrEngine for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn is_available(&self) -> bool {
        (**self).is_available()
    }

    fn recognize(&self, image: &PageImage, language: &str) -> Result<String, OcrError> {
        (**self).recognize(image, language)
    }
}

/// Locations of the external OCR toolchain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OcrConfig {
    /// Tesseract executable (name on `PATH` or absolute path).
    pub tesseract_cmd: PathBuf,

    /// Poppler `pdftoppm` executable used to rasterize pages.
    pub pdftoppm_cmd: PathBuf,
}

impl OcrConfig {
    /// Create a configuration with the default binary names.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific Tesseract executable, e.g. on Windows where it is
    /// rarely on `PATH`.
    pub fn with_tesseract_cmd(mut self, cmd: impl Into<PathBuf>) -> Self {
        self.tesseract_cmd = cmd.into();
        self
    }

    /// Use a specific `pdftoppm` executable.
    pub fn with_pdftoppm_cmd(mut self, cmd: impl Into<PathBuf>) -> Self {
        self.pdftoppm_cmd = cmd.into();
        self
    }
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            tesseract_cmd: PathBuf::from("tesseract"),
            pdftoppm_cmd: PathBuf::from("pdftoppm"),
        }
    }
}
