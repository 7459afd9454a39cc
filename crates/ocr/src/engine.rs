//! OCR engine abstraction and the service that drives it.

use crate::image_prep::prepare_image;
use notebook_core::Result;
use serde::{Deserialize, Serialize};

/// Something that turns a prepared image into text.
pub trait OcrEngine: Send + Sync {
    /// Recognize text in a PNG image using the given Tesseract-style
    /// language code ("eng", "eng+fra").
    fn recognize(&self, png: &[u8], language: &str) -> Result<String>;
}

/// Configuration for OCR processing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrConfig {
    /// Tesseract language codes (e.g., "eng", "eng+fra")
    pub language: String,
    /// Page segmentation mode (see Tesseract PSM)
    pub page_segmentation_mode: u32,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            language: "eng".to_string(),
            page_segmentation_mode: 3, // PSM_AUTO (fully automatic)
        }
    }
}

impl OcrConfig {
    /// Set the recognition language.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}

/// Reads text out of uploaded images.
pub struct OcrService {
    engine: Box<dyn OcrEngine>,
    config: OcrConfig,
}

impl OcrService {
    /// Create a service around an engine.
    pub fn new(engine: Box<dyn OcrEngine>, config: OcrConfig) -> Self {
        Self { engine, config }
    }

    /// Extract raw text from image bytes in any supported format.
    pub fn extract_text(&self, image_bytes: &[u8]) -> Result<String> {
        let png = prepare_image(image_bytes)?;

        log::info!(
            "Running OCR on {} byte image (language '{}')",
            image_bytes.len(),
            self.config.language
        );

        let text = self.engine.recognize(&png, &self.config.language)?;
        log::debug!("OCR produced {} characters", text.chars().count());

        Ok(text)
    }
}

/// The engine compiled into this build, if any.
#[cfg(feature = "tesseract")]
pub fn default_engine(config: &OcrConfig) -> Result<Box<dyn OcrEngine>> {
    Ok(Box::new(crate::tesseract::TesseractEngine::new(config)?))
}

/// The engine compiled into this build, if any.
#[cfg(not(feature = "tesseract"))]
pub fn default_engine(_config: &OcrConfig) -> Result<Box<dyn OcrEngine>> {
    Err(notebook_core::Error::OcrUnavailable(
        "built without the `tesseract` feature".to_string(),
    ))
}
