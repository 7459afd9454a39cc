//! WASM wrapper for the poetic notebook.
//!
//! Exposes punctuation normalization, DOCX extraction and the theme presets
//! to a browser page. Image OCR stays on the JavaScript side; its output is
//! passed back in through [`poem_from_text`].

use notebook_core::{
    Error, ExtractedDocument, Poem, SourceKind, TextNormalizer, Theme, ThemeStore,
    MAX_BATCH_FILES,
};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    // Set up better panic messages in the console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// A named theme preset.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemePreset {
    /// Preset name, also its label.
    pub label: String,
    /// The theme values.
    pub theme: Theme,
}

/// Normalize punctuation and whitespace of a piece of text.
#[wasm_bindgen]
pub fn correct_punctuation(text: &str) -> String {
    notebook_core::normalize(text)
}

/// Check that a batch of `count` files may be uploaded at once.
///
/// Throws the message to show the user when the batch is too large.
#[wasm_bindgen]
pub fn accepts_batch(count: usize) -> Result<(), JsValue> {
    accepts_batch_impl(count).map_err(|e| JsValue::from_str(&e))
}

fn accepts_batch_impl(count: usize) -> Result<(), String> {
    if count > MAX_BATCH_FILES {
        return Err(Error::BatchTooLarge {
            count,
            max: MAX_BATCH_FILES,
        }
        .to_string());
    }
    Ok(())
}

/// Build a poem from text read out of a plain text file or an image.
///
/// # Arguments
/// * `text` - The raw text (file contents or OCR output)
/// * `mime` - The declared MIME type of the source file
/// * `keep_line_breaks` - Keep the poem's line structure
///
/// # Returns
/// A JavaScript `{ title, lines, signature }` object, or throws when the
/// text is empty or the type isn't supported.
#[wasm_bindgen]
pub fn poem_from_text(text: &str, mime: &str, keep_line_breaks: bool) -> Result<JsValue, JsValue> {
    let poem = poem_from_text_impl(text, mime, keep_line_breaks).map_err(|e| JsValue::from_str(&e))?;
    to_js(&poem)
}

fn poem_from_text_impl(text: &str, mime: &str, keep_line_breaks: bool) -> Result<Poem, String> {
    let kind = SourceKind::from_mime(mime)
        .ok_or_else(|| Error::UnsupportedFormat(mime.to_string()).to_string())?;
    build_poem(text, kind, keep_line_breaks)
}

/// Extract a poem from a DOCX file.
///
/// # Arguments
/// * `data` - The raw bytes of the DOCX file
/// * `filename` - The original filename
/// * `keep_line_breaks` - Keep one line per paragraph
#[wasm_bindgen]
pub fn extract_docx(data: &[u8], filename: &str, keep_line_breaks: bool) -> Result<JsValue, JsValue> {
    let poem = extract_docx_impl(data, filename, keep_line_breaks).map_err(|e| JsValue::from_str(&e))?;
    to_js(&poem)
}

fn extract_docx_impl(data: &[u8], filename: &str, keep_line_breaks: bool) -> Result<Poem, String> {
    let document: ExtractedDocument = notebook_docx::DocxParser::new()
        .parse_bytes(data, filename)
        .map_err(|e| format!("Error parsing DOCX: {}", e))?;

    build_poem(&document.raw_text(), SourceKind::Docx, keep_line_breaks)
}

/// All theme presets, sorted by name.
#[wasm_bindgen]
pub fn theme_presets() -> Result<JsValue, JsValue> {
    to_js(&theme_presets_impl())
}

fn theme_presets_impl() -> Vec<ThemePreset> {
    ThemeStore::new()
        .iter()
        .map(|(name, theme)| ThemePreset {
            label: name.to_string(),
            theme: theme.clone(),
        })
        .collect()
}

/// Build a custom theme from colour-picker values and a font choice.
#[wasm_bindgen]
pub fn custom_theme(background: &str, text_color: &str, font: &str) -> Result<JsValue, JsValue> {
    let theme = Theme::custom(background, text_color, font).map_err(|e| JsValue::from_str(&e.to_string()))?;
    to_js(&theme)
}

fn build_poem(raw: &str, kind: SourceKind, keep_line_breaks: bool) -> Result<Poem, String> {
    let lines = TextNormalizer::new()
        .with_preserve_line_breaks(keep_line_breaks)
        .normalize_to_lines(raw);

    if lines.is_empty() {
        return Err("No text found".to_string());
    }

    Ok(Poem::new(kind.default_title(), lines))
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    #[test]
    fn test_correct_punctuation() {
        assert_eq!(correct_punctuation("Hello ,world"), "Hello, world.");
        assert_eq!(correct_punctuation(""), "");
    }

    #[test]
    fn test_accepts_batch() {
        assert!(accepts_batch_impl(0).is_ok());
        assert!(accepts_batch_impl(15).is_ok());
        assert_eq!(
            accepts_batch_impl(16),
            Err("You can only upload up to 15 files at once (16 selected).".to_string())
        );
    }

    #[test]
    fn test_poem_from_plain_text() {
        let poem = poem_from_text_impl("O moon ,\nO tide", "text/plain", true).unwrap();
        assert_eq!(poem.title, "Uploaded Poem");
        assert_eq!(poem.lines, vec!["O moon,", "O tide."]);
        assert_eq!(poem.signature, "Erring Soul");
    }

    #[test]
    fn test_poem_from_ocr_text() {
        let poem = poem_from_text_impl("Line one.Line two", "image/jpeg", false).unwrap();
        assert_eq!(poem.title, "Extracted Poem");
        assert_eq!(poem.lines, vec!["Line one. Line two."]);
    }

    #[test]
    fn test_poem_from_text_errors() {
        assert_eq!(
            poem_from_text_impl("words", "application/pdf", false),
            Err("unsupported file type 'application/pdf'".to_string())
        );
        assert_eq!(
            poem_from_text_impl("   ", "text/plain", false),
            Err("No text found".to_string())
        );
    }

    #[test]
    fn test_extract_docx() {
        let xml = r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body><w:p><w:r><w:t>no terminator here</w:t></w:r></w:p></w:body></w:document>"#;
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("word/document.xml", zip::write::FileOptions::default())
            .unwrap();
        writer.write_all(xml.as_bytes()).unwrap();
        let data = writer.finish().unwrap().into_inner();

        let poem = extract_docx_impl(&data, "ode.docx", false).unwrap();
        assert_eq!(poem.title, "Uploaded DOCX Poem");
        assert_eq!(poem.lines, vec!["no terminator here."]);
    }

    #[test]
    fn test_extract_docx_error() {
        let err = extract_docx_impl(b"garbage", "ode.docx", false).unwrap_err();
        assert!(err.starts_with("Error parsing DOCX"));
    }

    #[test]
    fn test_theme_presets() {
        let presets = theme_presets_impl();
        let labels: Vec<&str> = presets.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Deep Ocean Ink", "Iridescent Dawn", "Terracotta Soul"]
        );
    }
}
