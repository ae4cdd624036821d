//! Contract record repository trait.

use super::model::{ContractRecord, ContractSummary};
use crate::answers::Answers;
use crate::contract::ContractType;
use crate::error::Result;
use async_trait::async_trait;

/// An abstract repository for completed answer sets.
///
/// Queries are always scoped to one user, except `list_all` which backs the
/// admin statistics.
#[async_trait]
pub trait ContractRecordRepository: Send + Sync {
    /// Persists a complete answer set in one write.
    ///
    /// # Returns
    ///
    /// - `Ok(id)`: Id of the created (or overwritten) record
    /// - `Err(_)`: Nothing was written
    async fn save(
        &self,
        user_id: i64,
        contract_type: ContractType,
        contract_name: &str,
        answers: &Answers,
    ) -> Result<u64>;

    /// Lists a user's records, newest first.
    async fn list_for_user(&self, user_id: i64) -> Result<Vec<ContractSummary>>;

    /// Loads the answers of a record owned by `user_id`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(answers))`: Record found and owned by the user
    /// - `Ok(None)`: No such record for this user
    async fn get(&self, record_id: u64, user_id: i64) -> Result<Option<Answers>>;

    /// Lists every record of every user.
    async fn list_all(&self) -> Result<Vec<ContractRecord>>;
}
