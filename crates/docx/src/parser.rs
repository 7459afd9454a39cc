//! DOCX file parser implementation.

use notebook_core::{Error, ExtractedDocument, Result, SourceKind};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read, Seek};
use zip::result::ZipError;
use zip::ZipArchive;

/// Main document part of a word-processing package.
const DOCUMENT_PART: &str = "word/document.xml";

/// Parser for DOCX (Office Open XML) files.
pub struct DocxParser;

impl DocxParser {
    /// Create a new DOCX parser.
    pub fn new() -> Self {
        Self
    }

    /// Parse a DOCX file from a reader.
    pub fn parse<R: Read + Seek>(&self, reader: R, filename: &str) -> Result<ExtractedDocument> {
        let mut archive = ZipArchive::new(reader)
            .map_err(|e| Error::ZipError(format!("Failed to open ZIP: {}", e)))?;

        let content = self.read_file_from_archive(&mut archive, DOCUMENT_PART)?;

        let mut document = ExtractedDocument::new(filename, SourceKind::Docx);
        for paragraph in self.extract_paragraphs_from_xml(&content)? {
            document.add_paragraph(paragraph);
        }

        log::debug!(
            "Extracted {} paragraphs from {}",
            document.paragraphs.len(),
            filename
        );

        Ok(document)
    }

    /// Parse a DOCX file held in memory.
    pub fn parse_bytes(&self, data: &[u8], filename: &str) -> Result<ExtractedDocument> {
        self.parse(Cursor::new(data), filename)
    }

    /// Collect paragraph texts from the main document XML.
    ///
    /// Paragraphs nested in text boxes are emitted when they close, before
    /// the paragraph that contains them.
    fn extract_paragraphs_from_xml(&self, xml_content: &str) -> Result<Vec<String>> {
        let mut paragraphs = Vec::new();
        let mut reader = Reader::from_str(xml_content);

        // Open paragraphs, innermost last
        let mut open: Vec<String> = Vec::new();
        let mut run_depth = 0usize;
        let mut in_text = false;

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => match local_name(e.name().as_ref()) {
                    b"p" => open.push(String::new()),
                    b"r" => run_depth += 1,
                    b"t" => in_text = true,
                    _ => {}
                },
                Ok(Event::Empty(ref e)) => match local_name(e.name().as_ref()) {
                    b"p" => paragraphs.push(String::new()),
                    name if run_depth > 0 => {
                        if let (Some(text), Some(current)) = (run_control_text(name), open.last_mut()) {
                            current.push_str(text);
                        }
                    }
                    _ => {}
                },
                Ok(Event::Text(ref e)) => {
                    if in_text {
                        if let Some(current) = open.last_mut() {
                            let text = e.unescape().map_err(|err| {
                                Error::XmlError(format!("Invalid text in document: {}", err))
                            })?;
                            current.push_str(&text);
                        }
                    }
                }
                Ok(Event::End(ref e)) => match local_name(e.name().as_ref()) {
                    b"p" => {
                        if let Some(paragraph) = open.pop() {
                            paragraphs.push(paragraph);
                        }
                    }
                    b"r" => run_depth = run_depth.saturating_sub(1),
                    b"t" => in_text = false,
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::XmlError(format!(
                        "Error parsing {} at position {}: {}",
                        DOCUMENT_PART,
                        reader.buffer_position(),
                        e
                    )));
                }
                _ => {}
            }
        }

        Ok(paragraphs)
    }

    /// Read a file from the ZIP archive.
    fn read_file_from_archive<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        path: &str,
    ) -> Result<String> {
        let mut file = archive.by_name(path).map_err(|e| match e {
            ZipError::FileNotFound => {
                Error::DocxParseError(format!("Not a Word document: '{}' is missing", path))
            }
            e => Error::ZipError(format!("Failed to open '{}': {}", path, e)),
        })?;

        let mut content = String::new();
        file.read_to_string(&mut content)
            .map_err(|e| Error::ZipError(format!("Failed to read '{}': {}", path, e)))?;

        Ok(content)
    }
}

impl Default for DocxParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Text produced by a self-closing run element such as `<w:tab/>`.
fn run_control_text(name: &[u8]) -> Option<&'static str> {
    match name {
        b"tab" | b"ptab" => Some("\t"),
        b"br" | b"cr" => Some("\n"),
        b"noBreakHyphen" => Some("-"),
        _ => None,
    }
}

/// Extract the local name from a potentially namespaced XML element name.
fn local_name(name: &[u8]) -> &[u8] {
    if let Some(pos) = name.iter().position(|&b| b == b':') {
        &name[pos + 1..]
    } else {
        name
    }
}
