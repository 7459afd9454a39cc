//! Turning one upload into one notebook event.

use crate::upload::Upload;
use notebook_core::types::title_from_filename;
use notebook_core::{Error, Event, Poem, Result, SourceKind, TextNormalizer, DEFAULT_SIGNATURE};
use notebook_docx::DocxParser;
use notebook_ocr::OcrService;

/// How extracted text becomes a poem.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Normalizer applied to all extracted text.
    pub normalizer: TextNormalizer,

    /// Title poems after their file instead of their source kind.
    pub title_from_filename: bool,

    /// Signature given to extracted poems.
    pub signature: String,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            normalizer: TextNormalizer::new(),
            title_from_filename: false,
            signature: DEFAULT_SIGNATURE.to_string(),
        }
    }
}

/// Extract one upload and describe the outcome as a notebook event.
///
/// Never fails: every failure becomes [`Event::ExtractionFailed`] and
/// unsupported types become [`Event::FileSkipped`].
pub fn extract_poem(upload: &Upload, ocr: Option<&OcrService>, options: &ExtractOptions) -> Event {
    let Some(kind) = upload.kind() else {
        return Event::FileSkipped {
            file: upload.name.clone(),
            mime: upload.mime.clone(),
        };
    };

    match build_poem(upload, kind, ocr, options) {
        Ok(poem) => Event::PoemExtracted(poem),
        Err(e) => Event::ExtractionFailed {
            file: upload.name.clone(),
            reason: e.to_string(),
        },
    }
}

fn build_poem(
    upload: &Upload,
    kind: SourceKind,
    ocr: Option<&OcrService>,
    options: &ExtractOptions,
) -> Result<Poem> {
    let raw = match kind {
        SourceKind::PlainText => decode_text(&upload.bytes),
        SourceKind::Docx => DocxParser::new()
            .parse_bytes(&upload.bytes, &upload.name)?
            .raw_text(),
        SourceKind::Image => ocr
            .ok_or_else(|| Error::OcrUnavailable("no OCR engine is configured".to_string()))?
            .extract_text(&upload.bytes)?,
    };

    let lines = options.normalizer.normalize_to_lines(&raw);
    if lines.is_empty() {
        return Err(Error::ExtractionError("no text found".to_string()));
    }

    let title = if options.title_from_filename {
        title_from_filename(&upload.name).unwrap_or_else(|| kind.default_title().to_string())
    } else {
        kind.default_title().to_string()
    };

    log::debug!("{} -> '{}' ({} lines)", upload.name, title, lines.len());

    Ok(Poem::new(title, lines).with_signature(options.signature.clone()))
}

/// Decode plain text as UTF-8, replacing invalid sequences and dropping a
/// leading byte order mark.
fn decode_text(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    text.strip_prefix('\u{feff}').unwrap_or(&*text).to_string()
}
