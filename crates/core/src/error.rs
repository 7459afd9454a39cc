//! Error types for poem extraction and notebook configuration.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while extracting poems or configuring the notebook.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to open or read the input file.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// The file type is not supported or could not be detected.
    #[error("unsupported file type '{0}'")]
    UnsupportedFormat(String),

    /// Failed to parse the DOCX document structure.
    #[error("DOCX parsing error: {0}")]
    DocxParseError(String),

    /// Extraction ran but produced nothing usable.
    #[error("Text extraction error: {0}")]
    ExtractionError(String),

    /// ZIP archive error (for DOCX).
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// XML parsing error (for DOCX).
    #[error("XML parsing error: {0}")]
    XmlError(String),

    /// The image could not be decoded or re-encoded.
    #[error("Image error: {0}")]
    ImageError(String),

    /// The OCR engine failed to recognize text.
    #[error("OCR error: {0}")]
    OcrError(String),

    /// No OCR engine is available for image files.
    #[error("OCR is not available: {0}")]
    OcrUnavailable(String),

    /// More files were submitted at once than the notebook accepts.
    #[error("You can only upload up to {max} files at once ({count} selected).")]
    BatchTooLarge { count: usize, max: usize },

    /// A custom theme value is malformed.
    #[error("Invalid theme: {0}")]
    InvalidTheme(String),

    /// No preset theme with the given name exists.
    #[error("Unknown theme: {0}")]
    UnknownTheme(String),

    /// A themes file could not be decoded.
    #[error("Invalid themes file: {0}")]
    ThemesFile(#[from] serde_json::Error),
}
