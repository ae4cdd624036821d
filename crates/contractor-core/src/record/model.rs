//! Contract record models.

use crate::answers::Answers;
use crate::contract::ContractType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted answer set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractRecord {
    pub id: u64,
    pub user_id: i64,
    pub contract_type: ContractType,
    pub contract_name: String,
    pub answers: Answers,
    pub created_at: DateTime<Utc>,
}

impl ContractRecord {
    pub fn summary(&self) -> ContractSummary {
        ContractSummary {
            id: self.id,
            contract_type: self.contract_type,
            contract_name: self.contract_name.clone(),
            created_at: self.created_at,
        }
    }
}

/// Listing entry for a user's records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractSummary {
    pub id: u64,
    pub contract_type: ContractType,
    pub contract_name: String,
    pub created_at: DateTime<Utc>,
}

/// What saving a record under an existing name does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordWritePolicy {
    /// Every save creates a new record.
    #[default]
    Append,
    /// A save replaces the user's record with the same contract name,
    /// keeping its id.
    OverwriteByName,
}
