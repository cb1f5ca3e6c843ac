//! OCR engines.
//!
//! Scanned pages carry no embedded text, so the extractor rasterizes them
//! and hands the image to an [`OcrEngine`]. Tesseract, driven through its
//! command-line binary, is the engine shipped with the crate.

mod engine;
mod tesseract;

pub use engine::{OcrConfig, OcrEngine, OcrError};
pub use tesseract::TesseractEngine;
