//! Plain text output for notebook poems.
//!
//! Each poem is printed as its title, a blank line, its lines, and a
//! `- signature` line. Poems are separated by a blank line.

use crate::types::Poem;

/// Formatter for plain text poem output.
#[derive(Debug, Clone)]
pub struct PoemFormatter {
    /// Whether to print the signature line.
    show_signature: bool,
}

impl Default for PoemFormatter {
    fn default() -> Self {
        Self {
            show_signature: true,
        }
    }
}

impl PoemFormatter {
    /// Create a new formatter that prints signatures.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether the signature line is printed.
    pub fn with_signature(mut self, show: bool) -> Self {
        self.show_signature = show;
        self
    }

    /// Format a single poem.
    ///
    /// # Example output
    /// ```text
    /// Uploaded Poem
    ///
    /// The rose is red, the night is long.
    ///
    /// - Erring Soul
    /// ```
    pub fn format(&self, poem: &Poem) -> String {
        let mut sections = vec![poem.title.clone()];

        if !poem.lines.is_empty() {
            sections.push(poem.lines.join("\n"));
        }

        if self.show_signature && !poem.signature.is_empty() {
            sections.push(format!("- {}", poem.signature));
        }

        sections.join("\n\n")
    }

    /// Format several poems, separated by blank lines.
    pub fn format_all(&self, poems: &[Poem]) -> String {
        poems
            .iter()
            .map(|poem| self.format(poem))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Format several poems, adding a trailing newline.
    pub fn format_with_newline(&self, poems: &[Poem]) -> String {
        let formatted = self.format_all(poems);
        if formatted.is_empty() {
            formatted
        } else {
            format!("{}\n", formatted)
        }
    }
}
