//! Core domain types, punctuation normalization, themes and notebook state
//! for the poetic notebook.

pub mod error;
pub mod format;
pub mod normalize;
pub mod notebook;
pub mod theme;
pub mod types;

pub use error::{Error, Result};
pub use format::PoemFormatter;
pub use normalize::{normalize, TextNormalizer};
pub use notebook::{Event, Notebook, ThemeSelection};
pub use theme::{Theme, ThemeStore};
pub use types::{ExtractedDocument, Poem, SourceKind, DEFAULT_SIGNATURE, MAX_BATCH_FILES};
