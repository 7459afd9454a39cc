//! Domain types for representing poems and their source files.

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

/// Most files accepted in a single upload batch.
pub const MAX_BATCH_FILES: usize = 15;

/// Signature printed under every poem.
pub const DEFAULT_SIGNATURE: &str = "Erring Soul";

/// MIME type of plain text uploads.
pub const MIME_PLAIN_TEXT: &str = "text/plain";

/// MIME type of Word (OOXML) documents.
pub const MIME_DOCX: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// A poem as it appears in the notebook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poem {
    /// Heading shown above the poem.
    pub title: String,

    /// Poem lines in reading order.
    pub lines: Vec<String>,

    /// Name printed under the poem.
    pub signature: String,
}

impl Poem {
    /// Create a new poem with the default signature.
    pub fn new(title: impl Into<String>, lines: Vec<String>) -> Self {
        Self {
            title: title.into(),
            lines,
            signature: DEFAULT_SIGNATURE.to_string(),
        }
    }

    /// Build a poem from text, one line per `\n`.
    pub fn from_text(title: impl Into<String>, text: &str) -> Self {
        Self::new(title, text.split('\n').map(str::to_string).collect())
    }

    /// Replace the signature.
    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = signature.into();
        self
    }
}

/// The kind of file a poem was extracted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceKind {
    /// Plain UTF-8 text.
    PlainText,
    /// Word document (Office Open XML).
    Docx,
    /// Raster image read through OCR.
    Image,
}

impl SourceKind {
    /// Detect kind from a declared MIME type.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let mime = mime.trim().to_ascii_lowercase();
        // Parameters such as "; charset=utf-8" don't change the kind
        let essence = mime.split(';').next().unwrap_or_default().trim();

        match essence {
            MIME_PLAIN_TEXT => Some(Self::PlainText),
            MIME_DOCX => Some(Self::Docx),
            m if m.starts_with("image/") => Some(Self::Image),
            _ => None,
        }
    }

    /// Detect kind from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "txt" | "text" => Some(Self::PlainText),
            "docx" => Some(Self::Docx),
            "png" | "jpg" | "jpeg" | "gif" | "bmp" | "tif" | "tiff" | "webp" => Some(Self::Image),
            _ => None,
        }
    }

    /// Detect kind from file magic bytes.
    ///
    /// Plain text has no signature, so it is never detected here.
    pub fn from_magic(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < 4 {
            return None;
        }

        // DOCX is a ZIP file (PK\x03\x04)
        if bytes.starts_with(&[0x50, 0x4B, 0x03, 0x04]) {
            return Some(Self::Docx);
        }

        let is_image = bytes.starts_with(&[0x89, b'P', b'N', b'G'])
            || bytes.starts_with(&[0xFF, 0xD8, 0xFF])
            || bytes.starts_with(b"GIF8")
            || bytes.starts_with(b"BM")
            || bytes.starts_with(&[0x49, 0x49, 0x2A, 0x00])
            || bytes.starts_with(&[0x4D, 0x4D, 0x00, 0x2A])
            || (bytes.len() >= 12 && bytes.starts_with(b"RIFF") && &bytes[8..12] == b"WEBP");

        is_image.then_some(Self::Image)
    }

    /// Best-effort MIME type for a file name, as a browser would declare it.
    pub fn guess_mime(filename: &str) -> Option<&'static str> {
        let ext = filename.rsplit_once('.').map(|(_, ext)| ext.to_lowercase())?;

        let mime = match Self::from_extension(&ext)? {
            Self::PlainText => MIME_PLAIN_TEXT,
            Self::Docx => MIME_DOCX,
            Self::Image => match ext.as_str() {
                "jpg" | "jpeg" => "image/jpeg",
                "gif" => "image/gif",
                "bmp" => "image/bmp",
                "tif" | "tiff" => "image/tiff",
                "webp" => "image/webp",
                _ => "image/png",
            },
        };

        Some(mime)
    }

    /// Title given to poems of this kind when none is derived from the file.
    pub fn default_title(&self) -> &'static str {
        match self {
            Self::PlainText => "Uploaded Poem",
            Self::Docx => "Uploaded DOCX Poem",
            Self::Image => "Extracted Poem",
        }
    }
}

/// Derive a poem title from a file name.
///
/// Drops the extension, turns `_`/`-` separators into spaces and composes
/// Unicode (file systems may hand back decomposed names).
pub fn title_from_filename(filename: &str) -> Option<String> {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    let stem = base.rsplit_once('.').map(|(stem, _)| stem).unwrap_or(base);

    let title = stem
        .nfc()
        .map(|c| if c == '_' || c == '-' { ' ' } else { c })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    (!title.is_empty()).then_some(title)
}

/// Raw text extracted from a structured document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedDocument {
    /// Original filename (without path).
    pub filename: String,

    /// Kind of the source file.
    pub kind: SourceKind,

    /// Paragraph texts in document order.
    pub paragraphs: Vec<String>,
}

impl ExtractedDocument {
    /// Create an empty document with the given filename and kind.
    pub fn new(filename: impl Into<String>, kind: SourceKind) -> Self {
        Self {
            filename: filename.into(),
            kind,
            paragraphs: Vec::new(),
        }
    }

    /// Add a paragraph.
    pub fn add_paragraph(&mut self, text: impl Into<String>) {
        self.paragraphs.push(text.into());
    }

    /// Render the document as raw text, each paragraph followed by a blank line.
    pub fn raw_text(&self) -> String {
        self.paragraphs.iter().map(|p| format!("{}\n\n", p)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_mime() {
        assert_eq!(SourceKind::from_mime("text/plain"), Some(SourceKind::PlainText));
        assert_eq!(
            SourceKind::from_mime("text/plain; charset=utf-8"),
            Some(SourceKind::PlainText)
        );
        assert_eq!(SourceKind::from_mime(MIME_DOCX), Some(SourceKind::Docx));
        assert_eq!(SourceKind::from_mime("image/png"), Some(SourceKind::Image));
        assert_eq!(SourceKind::from_mime("IMAGE/JPEG"), Some(SourceKind::Image));
        assert_eq!(SourceKind::from_mime("application/pdf"), None);
        assert_eq!(SourceKind::from_mime(""), None);
    }

    #[test]
    fn test_kind_from_extension() {
        assert_eq!(SourceKind::from_extension("TXT"), Some(SourceKind::PlainText));
        assert_eq!(SourceKind::from_extension("docx"), Some(SourceKind::Docx));
        assert_eq!(SourceKind::from_extension("jpeg"), Some(SourceKind::Image));
        assert_eq!(SourceKind::from_extension("pdf"), None);
    }

    #[test]
    fn test_kind_from_magic() {
        assert_eq!(
            SourceKind::from_magic(&[0x50, 0x4B, 0x03, 0x04, 0x14]),
            Some(SourceKind::Docx)
        );
        assert_eq!(
            SourceKind::from_magic(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A]),
            Some(SourceKind::Image)
        );
        assert_eq!(
            SourceKind::from_magic(b"RIFF\x10\x00\x00\x00WEBPVP8 "),
            Some(SourceKind::Image)
        );
        assert_eq!(SourceKind::from_magic(b"Roses are red"), None);
        assert_eq!(SourceKind::from_magic(b"PK"), None);
    }

    #[test]
    fn test_guess_mime() {
        assert_eq!(SourceKind::guess_mime("ode.txt"), Some("text/plain"));
        assert_eq!(SourceKind::guess_mime("ode.DOCX"), Some(MIME_DOCX));
        assert_eq!(SourceKind::guess_mime("scan.jpg"), Some("image/jpeg"));
        assert_eq!(SourceKind::guess_mime("scan.PNG"), Some("image/png"));
        assert_eq!(SourceKind::guess_mime("scan.tif"), Some("image/tiff"));
        assert_eq!(SourceKind::guess_mime("notes.pdf"), None);
        assert_eq!(SourceKind::guess_mime("README"), None);
    }

    #[test]
    fn test_title_from_filename() {
        assert_eq!(
            title_from_filename("autumn_leaves.txt"),
            Some("autumn leaves".to_string())
        );
        assert_eq!(
            title_from_filename("drafts/Night-Song.docx"),
            Some("Night Song".to_string())
        );
        assert_eq!(
            title_from_filename("Cafe\u{301}.png"),
            Some("Caf\u{e9}".to_string())
        );
        assert_eq!(title_from_filename(".txt"), None);
    }

    #[test]
    fn test_poem_from_text() {
        let poem = Poem::from_text("Custom Poem Title", "first\nsecond");
        assert_eq!(poem.lines, vec!["first", "second"]);
        assert_eq!(poem.signature, DEFAULT_SIGNATURE);
    }

    #[test]
    fn test_raw_text() {
        let mut doc = ExtractedDocument::new("ode.docx", SourceKind::Docx);
        doc.add_paragraph("Stanza one");
        doc.add_paragraph("Stanza two");
        assert_eq!(doc.raw_text(), "Stanza one\n\nStanza two\n\n");
    }
}
