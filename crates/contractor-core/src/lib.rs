//! Domain core for Contractor: form sessions, question catalogs, validation,
//! template rendering and document assembly.

pub mod answers;
pub mod catalog;
pub mod config;
pub mod contract;
pub mod document;
pub mod error;
pub mod record;
pub mod session;
pub mod template;
pub mod validator;

// Re-export common types
pub use answers::Answers;
pub use contract::{ContractType, DocumentRole};
pub use error::ContractorError;
