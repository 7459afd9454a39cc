//! DOCX (Office Open XML) text extractor for the poetic notebook.
//!
//! Parses .docx files, which are ZIP archives containing XML documents,
//! down to their raw paragraph text.

pub mod parser;

pub use parser::DocxParser;
