//! Contract record DTOs and migrations
//!
//! - Records file V1.0.0: `next_id` counter plus a list of flat-versioned records
//! - Contract record V1.0.0: answers as an ordered key/value list

use chrono::{DateTime, Utc};
use contractor_core::answers::Answers;
use contractor_core::contract::ContractType;
use contractor_core::record::ContractRecord;
use serde::{Deserialize, Serialize};
use version_migrate::{FromDomain, IntoDomain, Versioned};

/// Root of the records file V1.0.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
pub struct RecordsFileV1_0_0 {
    /// Id handed to the next inserted record; ids are never reused.
    pub next_id: u64,

    /// Contract records (each has its own version field).
    /// Stored as serde_json::Value so version-migrate can migrate them one by one.
    #[serde(default)]
    pub records: Vec<serde_json::Value>,
}

impl Default for RecordsFileV1_0_0 {
    fn default() -> Self {
        Self {
            next_id: 1,
            records: Vec::new(),
        }
    }
}

/// Type alias for the latest records file version.
pub type RecordsFile = RecordsFileV1_0_0;

/// One answer, kept as a list entry so the order survives TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerEntryV1 {
    pub key: String,
    pub value: String,
}

/// Contract record V1.0.0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
pub struct ContractRecordV1_0_0 {
    pub id: u64,
    pub user_id: i64,
    /// Contract type tag (`agent`, `subagent`, `delivery`).
    pub contract_type: ContractType,
    pub contract_name: String,
    /// RFC 3339 timestamp.
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub answers: Vec<AnswerEntryV1>,
}

/// Type alias for the latest contract record version.
pub type ContractRecordDTO = ContractRecordV1_0_0;

impl IntoDomain<ContractRecord> for ContractRecordV1_0_0 {
    fn into_domain(self) -> ContractRecord {
        ContractRecord {
            id: self.id,
            user_id: self.user_id,
            contract_type: self.contract_type,
            contract_name: self.contract_name,
            answers: self
                .answers
                .into_iter()
                .map(|entry| (entry.key, entry.value))
                .collect::<Answers>(),
            created_at: self.created_at,
        }
    }
}

impl FromDomain<ContractRecord> for ContractRecordV1_0_0 {
    fn from_domain(record: ContractRecord) -> Self {
        Self {
            id: record.id,
            user_id: record.user_id,
            contract_type: record.contract_type,
            contract_name: record.contract_name,
            created_at: record.created_at,
            answers: record
                .answers
                .iter()
                .map(|(key, value)| AnswerEntryV1 {
                    key: key.to_string(),
                    value: value.to_string(),
                })
                .collect(),
        }
    }
}

// ============================================================================
// Migrator factory
// ============================================================================

/// Creates and configures a Migrator instance for contract records.
///
/// Register new `step::<..>()` entries here when the record layout changes.
pub fn create_records_migrator() -> version_migrate::Migrator {
    let mut migrator = version_migrate::Migrator::builder().build();

    let record_path = version_migrate::Migrator::define("contract_record")
        .from::<ContractRecordV1_0_0>()
        .into_with_save::<ContractRecord>();

    migrator
        .register(record_path)
        .expect("Failed to register contract_record migration path");

    migrator
}
