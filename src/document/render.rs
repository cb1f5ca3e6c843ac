//! Page rasterization through Poppler's `pdftoppm`.

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

use crate::error::{Error, Result};
use crate::ocr::OcrConfig;

/// A rendered page image on disk.
///
/// Images produced by [`PageRenderer`] live in a private temporary
/// directory that is removed when the value is dropped.
#[derive(Debug)]
pub struct PageImage {
    path: PathBuf,
    _scratch: Option<TempDir>,
}

impl PageImage {
    /// Wrap an existing image file. The file is left in place on drop.
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _scratch: None,
        }
    }

    /// Path to the image file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Renders single PDF pages to PNG.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRenderer {
    pdftoppm_cmd: PathBuf,
}

impl PageRenderer {
    /// Create a renderer that runs `pdftoppm` from `PATH`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific `pdftoppm` executable.
    pub fn with_command(cmd: impl Into<PathBuf>) -> Self {
        Self {
            pdftoppm_cmd: cmd.into(),
        }
    }

    /// Use the `pdftoppm` executable named in an OCR configuration.
    pub fn from_config(config: &OcrConfig) -> Self {
        Self::with_command(config.pdftoppm_cmd.clone())
    }

    /// The executable this renderer runs.
    pub fn command(&self) -> &Path {
        &self.pdftoppm_cmd
    }

    /// Check whether the renderer binary can be executed.
    pub fn is_available(&self) -> bool {
        Command::new(&self.pdftoppm_cmd)
            .arg("-v")
            .output()
            .is_ok()
    }

    /// Render one page (1-indexed `page_number`) of `pdf_path`.
    pub fn render(&self, pdf_path: &Path, page_number: u32, dpi: u32) -> Result<PageImage> {
        let scratch = TempDir::new()?;
        let prefix = scratch.path().join("page");
        let page = page_number.to_string();
        let dpi = dpi.to_string();

        let status = Command::new(&self.pdftoppm_cmd)
            .args(["-png", "-r", &dpi, "-f", &page, "-l", &page, "-singlefile"])
            .arg(pdf_path)
            .arg(&prefix)
            .output();

        match status {
            Ok(output) if output.status.success() => {}
            Ok(output) => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                return Err(Error::Render(format!(
                    "pdftoppm failed on page {}: {}",
                    page_number,
                    stderr.trim()
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::Render(format!(
                    "{} not found (install poppler-utils)",
                    self.pdftoppm_cmd.display()
                )));
            }
            Err(e) => return Err(Error::Io(e)),
        }

        let path = prefix.with_extension("png");
        if !path.exists() {
            return Err(Error::Render(format!(
                "No image generated for page {}",
                page_number
            )));
        }

        Ok(PageImage {
            path,
            _scratch: Some(scratch),
        })
    }
}

impl Default for PageRenderer {
    fn default() -> Self {
        Self::with_command("pdftoppm")
    }
}
