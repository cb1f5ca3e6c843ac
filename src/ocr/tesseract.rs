//! Tesseract OCR via its command-line binary.

use std::process::{Command, Output};

use super::engine::{OcrConfig, OcrEngine, OcrError};
use crate::document::PageImage;

/// Tesseract OCR engine.
#[derive(Debug, Clone, Default)]
pub struct TesseractEngine {
    config: OcrConfig,
}

impl TesseractEngine {
    /// Create an engine that runs `tesseract` from `PATH`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with a custom configuration.
    pub fn with_config(config: OcrConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &OcrConfig {
        &self.config
    }
}

impl OcrEngine for TesseractEngine {
    fn name(&self) -> &str {
        "tesseract"
    }

    fn is_available(&self) -> bool {
        Command::new(&self.config.tesseract_cmd)
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    fn recognize(&self, image: &PageImage, language: &str) -> Result<String, OcrError> {
        let output = Command::new(&self.config.tesseract_cmd)
            .arg(image.path())
            .arg("stdout")
            .args(["-l", language])
            .output();

        stdout_or_error(output, &self.config.tesseract_cmd.display().to_string())
    }
}

fn stdout_or_error(result: std::io::Result<Output>, tool: &str) -> Result<String, OcrError> {
    match result {
        Ok(output) if output.status.success() => {
            Ok(String::from_utf8_lossy(&output.stdout).to_string())
        }
        Ok(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(OcrError::Failed(format!("{} failed: {}", tool, stderr.trim())))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(OcrError::EngineUnavailable(
            format!("{} not found (install tesseract-ocr)", tool),
        )),
        Err(e) => Err(OcrError::Io(e)),
    }
}
