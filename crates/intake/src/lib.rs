//! Batch intake of uploaded files into the poetic notebook.
//!
//! Every file in a batch is extracted on its own task. Each finished
//! extraction sends exactly one [`Event`](notebook_core::Event) over a
//! channel, and a single receiver folds those events into the notebook.

pub mod extract;
pub mod intake;
pub mod upload;

pub use extract::{extract_poem, ExtractOptions};
pub use intake::Intake;
pub use upload::Upload;
