//! Tesseract engine backed by `leptess`.

use crate::engine::{OcrConfig, OcrEngine};
use leptess::{LepTess, Variable};
use notebook_core::{Error, Result};

/// OCR engine using the system Tesseract installation.
///
/// A fresh Tesseract handle is created per image, so one engine can serve
/// several extractions at once.
pub struct TesseractEngine {
    page_segmentation_mode: u32,
}

impl TesseractEngine {
    /// Create an engine, checking that Tesseract loads with the configured
    /// language.
    pub fn new(config: &OcrConfig) -> Result<Self> {
        LepTess::new(None, &config.language).map_err(|e| {
            Error::OcrUnavailable(format!(
                "Failed to initialize Tesseract with language '{}': {}. \
                 Make sure the language data is installed",
                config.language, e
            ))
        })?;

        Ok(Self {
            page_segmentation_mode: config.page_segmentation_mode,
        })
    }
}

impl OcrEngine for TesseractEngine {
    fn recognize(&self, png: &[u8], language: &str) -> Result<String> {
        let mut lt = LepTess::new(None, language)
            .map_err(|e| Error::OcrError(format!("Failed to initialize Tesseract: {}", e)))?;

        lt.set_variable(
            Variable::TesseditPagesegMode,
            &self.page_segmentation_mode.to_string(),
        )
        .map_err(|e| Error::OcrError(format!("Failed to set PSM: {}", e)))?;

        lt.set_image_from_mem(png)
            .map_err(|e| Error::OcrError(format!("Failed to set image from memory: {}", e)))?;

        lt.get_utf8_text()
            .map_err(|e| Error::OcrError(format!("Recognized text is not UTF-8: {}", e)))
    }
}
