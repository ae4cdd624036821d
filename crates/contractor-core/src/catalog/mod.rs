//! Question catalog.
//!
//! Static, per-contract-type ordered list of questions. The only skip rule is
//! for localized-language fields: they are asked only when the selected
//! template carries localized placeholders.
//!
//! # Module Structure
//!
//! - `model`: `Question`
//! - `questions`: The static catalogs and lookup helpers

mod model;
mod questions;

pub use model::{LOCALIZED_SUFFIX, Question};
pub use questions::{
    LOCALIZED_MARKERS, has_localized_placeholders, localized_tokens, next_index, question,
    questions,
};
