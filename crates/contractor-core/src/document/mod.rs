//! Document generation module.
//!
//! # Module Structure
//!
//! - `model`: Rendered and stored documents
//! - `output`: Output area trait (`OutputArea`)
//! - `assembler`: Primary + satellite rendering (`DocumentAssembler`)

mod assembler;
mod model;
mod output;

pub use assembler::{DocumentAssembler, document_file_name, sanitize_file_component};
pub use model::{RenderedDocument, StoredDocument};
pub use output::OutputArea;
