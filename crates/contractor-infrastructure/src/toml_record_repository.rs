//! TOML-based contract record repository.
//!
//! All records live in one file; each record carries its own version field:
//!
//! ```toml
//! next_id = 3
//!
//! [[records]]
//! version = "1.0.0"
//! id = 1
//! user_id = 42
//! contract_type = "delivery"
//! contract_name = "ДП-2025-001"
//! created_at = "2025-06-22T10:30:00Z"
//!
//! [[records.answers]]
//! key = "contract_name"
//! value = "ДП-2025-001"
//! ```

use crate::dto::{ContractRecordDTO, RecordsFile, create_records_migrator};
use crate::storage::{AtomicTomlError, AtomicTomlFile};
use async_trait::async_trait;
use chrono::Utc;
use contractor_core::answers::Answers;
use contractor_core::contract::ContractType;
use contractor_core::error::{ContractorError, Result};
use contractor_core::record::{
    ContractRecord, ContractRecordRepository, ContractSummary, RecordWritePolicy,
};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task;
use version_migrate::{FromDomain, Migrator};

/// Contract records stored in a single TOML file.
///
/// # Features
///
/// - **Atomic writes**: each save is one locked read-modify-write cycle
/// - **Stable ids**: ids come from a persisted counter and are never reused
/// - **Versioned records**: entries are loaded and saved through version-migrate
/// - **Async-safe**: file access runs in `tokio::task::spawn_blocking`
pub struct TomlContractRecordRepository {
    file: Arc<AtomicTomlFile<RecordsFile>>,
    policy: RecordWritePolicy,
}

impl TomlContractRecordRepository {
    /// Creates a repository backed by `path`.
    ///
    /// The file is created on the first save.
    pub fn new(path: PathBuf, policy: RecordWritePolicy) -> Self {
        Self {
            file: Arc::new(AtomicTomlFile::new(path)),
            policy,
        }
    }

    pub fn policy(&self) -> RecordWritePolicy {
        self.policy
    }

    /// Loads and migrates every record in file order.
    async fn load_records(&self) -> Result<Vec<ContractRecord>> {
        let file = Arc::clone(&self.file);
        let root = task::spawn_blocking(move || file.load())
            .await
            .map_err(|e| ContractorError::io(format!("Failed to spawn blocking task: {}", e)))??
            .unwrap_or_default();

        decode_records(&create_records_migrator(), root.records)
    }
}

fn decode_records(
    migrator: &Migrator,
    entries: Vec<serde_json::Value>,
) -> Result<Vec<ContractRecord>> {
    if entries.is_empty() {
        return Ok(Vec::new());
    }
    migrator
        .load_vec_flat_from("contract_record", entries)
        .map_err(|e| {
            ContractorError::data_access(format!("Failed to migrate contract records: {}", e))
        })
}

fn encode_records(
    migrator: &Migrator,
    records: Vec<ContractRecord>,
) -> Result<Vec<serde_json::Value>> {
    let dtos: Vec<ContractRecordDTO> = records
        .into_iter()
        .map(ContractRecordDTO::from_domain)
        .collect();

    let json_str = migrator
        .save_vec_flat(dtos)
        .map_err(|e| ContractorError::serialization("JSON", e.to_string()))?;
    serde_json::from_str(&json_str)
        .map_err(|e| ContractorError::serialization("JSON", e.to_string()))
}

/// Newest first; ids break ties between records created in the same instant.
fn sort_newest_first(records: &mut [ContractRecord]) {
    records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
}

#[async_trait]
impl ContractRecordRepository for TomlContractRecordRepository {
    async fn save(
        &self,
        user_id: i64,
        contract_type: ContractType,
        contract_name: &str,
        answers: &Answers,
    ) -> Result<u64> {
        let file = Arc::clone(&self.file);
        let policy = self.policy;
        let mut record = ContractRecord {
            id: 0,
            user_id,
            contract_type,
            contract_name: contract_name.to_string(),
            answers: answers.clone(),
            created_at: Utc::now(),
        };

        let id = task::spawn_blocking(move || {
            file.update(RecordsFile::default(), |root| {
                let migrator = create_records_migrator();
                let mut records = decode_records(&migrator, std::mem::take(&mut root.records))
                    .map_err(AtomicTomlError::Rejected)?;

                let existing = match policy {
                    RecordWritePolicy::Append => None,
                    RecordWritePolicy::OverwriteByName => records.iter().position(|r| {
                        r.user_id == record.user_id && r.contract_name == record.contract_name
                    }),
                };

                let id = match existing {
                    Some(index) => {
                        record.id = records[index].id;
                        records[index] = record;
                        records[index].id
                    }
                    None => {
                        record.id = root.next_id;
                        root.next_id += 1;
                        let id = record.id;
                        records.push(record);
                        id
                    }
                };

                root.records =
                    encode_records(&migrator, records).map_err(AtomicTomlError::Rejected)?;
                Ok(id)
            })
        })
        .await
        .map_err(|e| ContractorError::io(format!("Failed to spawn blocking task: {}", e)))??;

        tracing::debug!(record_id = id, user_id, "Contract record saved");
        Ok(id)
    }

    async fn list_for_user(&self, user_id: i64) -> Result<Vec<ContractSummary>> {
        let mut records: Vec<ContractRecord> = self
            .load_records()
            .await?
            .into_iter()
            .filter(|r| r.user_id == user_id)
            .collect();
        sort_newest_first(&mut records);
        Ok(records.iter().map(ContractRecord::summary).collect())
    }

    async fn get(&self, record_id: u64, user_id: i64) -> Result<Option<Answers>> {
        Ok(self
            .load_records()
            .await?
            .into_iter()
            .find(|r| r.id == record_id && r.user_id == user_id)
            .map(|r| r.answers))
    }

    async fn list_all(&self) -> Result<Vec<ContractRecord>> {
        let mut records = self.load_records().await?;
        sort_newest_first(&mut records);
        Ok(records)
    }
}
