//! Template domain module.
//!
//! Templates are treated as opaque text carrying placeholder tokens. Tabular
//! regions (lines starting with `|`) are rendered cell by cell.
//!
//! # Module Structure
//!
//! - `placeholder`: Placeholder spelling conventions (`PlaceholderStyle`)
//! - `renderer`: Region parsing and substitution (`Template`)
//! - `store`: Template store trait (`TemplateStore`)

mod placeholder;
mod renderer;
mod store;

pub use placeholder::PlaceholderStyle;
pub use renderer::{Region, Template, render_text};
pub use store::TemplateStore;
