//! Contract record domain module.
//!
//! Completed answer sets are persisted as contract records, one per
//! completed session.
//!
//! # Module Structure
//!
//! - `model`: `ContractRecord`, `ContractSummary`, `RecordWritePolicy`
//! - `repository`: Repository trait for record persistence

mod model;
mod repository;

pub use model::{ContractRecord, ContractSummary, RecordWritePolicy};
pub use repository::ContractRecordRepository;
