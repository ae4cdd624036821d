//! Data Transfer Objects (DTOs) for persistence.
//!
//! DTOs are the on-disk schema. They are private to the infrastructure layer
//! and convert to and from domain models through version-migrate.
//!
//! ### Records File Version History
//! - **1.0.0**: Initial schema (`next_id` counter, answers as ordered key/value list)

mod record;

pub use record::{
    AnswerEntryV1, ContractRecordDTO, ContractRecordV1_0_0, RecordsFile, RecordsFileV1_0_0,
    create_records_migrator,
};
