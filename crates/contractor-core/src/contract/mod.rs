//! Contract type domain module.
//!
//! - `model`: `ContractType` and `DocumentRole`

mod model;

pub use model::{ContractType, DocumentRole};
