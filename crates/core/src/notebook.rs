//! Notebook state and its update function.
//!
//! All state lives in a [`Notebook`] value. Every change arrives as an
//! [`Event`] and is applied by [`Notebook::update`], which consumes the old
//! state and returns the new one.

use crate::error::Error;
use crate::theme::{Theme, ThemeStore, DEFAULT_PRESET};
use crate::types::{Poem, DEFAULT_SIGNATURE, MAX_BATCH_FILES};
use serde::{Deserialize, Serialize};

/// Title of poems typed directly into the notebook.
pub const DRAFT_TITLE: &str = "Custom Poem Title";

/// Which theme the user picked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ThemeSelection {
    /// A named preset.
    Preset(String),
    /// Custom colours and font.
    Custom,
}

/// Something that happened to the notebook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Pick a preset theme by name.
    SelectTheme(String),
    /// Apply a custom theme.
    ApplyCustomTheme(Theme),
    /// Replace the text of the poem being typed.
    EditDraft(String),
    /// Turn the draft into a poem.
    SubmitDraft,
    /// A file was extracted into a poem.
    PoemExtracted(Poem),
    /// A file could not be turned into a poem.
    ExtractionFailed { file: String, reason: String },
    /// A file of an unsupported type was left out.
    FileSkipped { file: String, mime: String },
    /// An upload batch exceeded the file limit and was ignored.
    BatchRejected { count: usize },
}

/// Application state of the notebook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notebook {
    /// Theme the poems are presented with.
    pub theme: Theme,

    /// Which preset (or custom) produced the theme.
    pub theme_selection: ThemeSelection,

    /// Poems in display order.
    pub poems: Vec<Poem>,

    /// Text of the poem being typed.
    pub draft: String,

    /// Signature given to typed poems.
    pub signature: String,

    /// User-visible warnings, oldest first.
    pub warnings: Vec<String>,

    #[serde(skip)]
    themes: ThemeStore,
}

impl Notebook {
    /// Create an empty notebook with the built-in presets.
    pub fn new() -> Self {
        Self::with_themes(ThemeStore::new())
    }

    /// Create an empty notebook over a theme store.
    pub fn with_themes(themes: ThemeStore) -> Self {
        let theme = themes.get(DEFAULT_PRESET).cloned().unwrap_or_default();

        Self {
            theme,
            theme_selection: ThemeSelection::Preset(DEFAULT_PRESET.to_string()),
            poems: Vec::new(),
            draft: String::new(),
            signature: DEFAULT_SIGNATURE.to_string(),
            warnings: Vec::new(),
            themes,
        }
    }

    /// Set the signature used for typed poems.
    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = signature.into();
        self
    }

    /// Theme presets known to this notebook.
    pub fn themes(&self) -> &ThemeStore {
        &self.themes
    }

    /// Poem shown in the featured layout, if any.
    pub fn featured(&self) -> Option<&Poem> {
        self.poems.first()
    }

    /// Apply an event and return the resulting state.
    pub fn update(mut self, event: Event) -> Self {
        match event {
            Event::SelectTheme(name) => match self.themes.get(&name) {
                Some(theme) => {
                    self.theme = theme.clone();
                    self.theme_selection = ThemeSelection::Preset(name);
                }
                None => {
                    log::debug!("No preset named '{}', using the fallback theme", name);
                    self.theme = Theme::fallback();
                    self.theme_selection = ThemeSelection::Custom;
                }
            },
            Event::ApplyCustomTheme(theme) => {
                self.theme = theme;
                self.theme_selection = ThemeSelection::Custom;
            }
            Event::EditDraft(text) => {
                self.draft = text;
            }
            Event::SubmitDraft => {
                let poem = Poem::from_text(DRAFT_TITLE, &self.draft)
                    .with_signature(self.signature.clone());
                self.poems.insert(0, poem);
            }
            Event::PoemExtracted(poem) => {
                self.poems.push(poem);
            }
            Event::ExtractionFailed { file, reason } => {
                log::warn!("Could not extract {}: {}", file, reason);
                self.warnings
                    .push(format!("Could not read a poem from {}: {}", file, reason));
            }
            Event::FileSkipped { file, mime } => {
                log::warn!("Skipping {} ({})", file, mime);
                self.warnings
                    .push(format!("Skipped {}: {}", file, Error::UnsupportedFormat(mime)));
            }
            Event::BatchRejected { count } => {
                log::warn!("Rejected batch of {} files", count);
                let error = Error::BatchTooLarge {
                    count,
                    max: MAX_BATCH_FILES,
                };
                self.warnings.push(error.to_string());
            }
        }
        self
    }

    /// Take the warnings collected so far, leaving none behind.
    pub fn drain_warnings(&mut self) -> Vec<String> {
        std::mem::take(&mut self.warnings)
    }
}

impl Default for Notebook {
    fn default() -> Self {
        Self::new()
    }
}
