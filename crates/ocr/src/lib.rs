//! OCR backend for reading poems from images.
//!
//! Images are decoded and flattened to grayscale PNG before being handed to
//! an [`OcrEngine`]. The Tesseract engine is available with the `tesseract`
//! feature and needs the Tesseract/Leptonica system libraries.

pub mod engine;
pub mod image_prep;
#[cfg(feature = "tesseract")]
pub mod tesseract;

pub use engine::{default_engine, OcrConfig, OcrEngine, OcrService};
pub use image_prep::prepare_image;
#[cfg(feature = "tesseract")]
pub use tesseract::TesseractEngine;
