//! Files handed to the notebook.

use notebook_core::{Result, SourceKind};
use std::path::Path;

/// MIME type declared for files whose type can't be told.
const UNKNOWN_MIME: &str = "application/octet-stream";

/// One uploaded file: its name, declared MIME type and contents.
#[derive(Debug, Clone)]
pub struct Upload {
    /// File name without directories.
    pub name: String,

    /// MIME type the file was declared with.
    pub mime: String,

    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl Upload {
    /// Create an upload from its parts.
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            bytes,
        }
    }

    /// Read a file from disk, declaring its MIME type the way a browser
    /// would: from the extension, then from the leading bytes.
    pub async fn from_path(path: &Path) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();

        let mime = declared_mime(&name, &bytes);
        log::debug!("Read {} ({} bytes, {})", name, bytes.len(), mime);

        Ok(Self::new(name, mime, bytes))
    }

    /// Kind of file, from the declared MIME type.
    pub fn kind(&self) -> Option<SourceKind> {
        SourceKind::from_mime(&self.mime)
    }
}

/// Work out the MIME type to declare for a file.
fn declared_mime(name: &str, bytes: &[u8]) -> String {
    if let Some(mime) = SourceKind::guess_mime(name) {
        return mime.to_string();
    }

    let sniffed = match SourceKind::from_magic(bytes) {
        Some(SourceKind::Docx) => notebook_core::types::MIME_DOCX,
        Some(SourceKind::Image) => "image/*",
        _ => UNKNOWN_MIME,
    };
    sniffed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_declared_mime_from_extension() {
        assert_eq!(declared_mime("ode.txt", b"anything"), "text/plain");
        assert_eq!(declared_mime("scan.PNG", b""), "image/png");
    }

    #[test]
    fn test_declared_mime_from_magic() {
        assert_eq!(
            declared_mime("ode", &[0x50, 0x4B, 0x03, 0x04, 0x00]),
            notebook_core::types::MIME_DOCX
        );
        assert_eq!(declared_mime("scan", &[0xFF, 0xD8, 0xFF, 0xE0]), "image/*");
        assert_eq!(declared_mime("notes.pdf", b"%PDF-1.7"), UNKNOWN_MIME);
    }

    #[tokio::test]
    async fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("evening.txt");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"Evening falls ,softly").unwrap();

        let upload = Upload::from_path(&path).await.unwrap();
        assert_eq!(upload.name, "evening.txt");
        assert_eq!(upload.mime, "text/plain");
        assert_eq!(upload.kind(), Some(SourceKind::PlainText));
        assert_eq!(upload.bytes, b"Evening falls ,softly");
    }

    #[tokio::test]
    async fn test_from_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let result = Upload::from_path(&dir.path().join("missing.txt")).await;
        assert!(matches!(result, Err(notebook_core::Error::IoError(_))));
    }
}
