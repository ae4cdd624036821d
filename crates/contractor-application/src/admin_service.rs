//! Admin operations, gated by the single configured admin user.

use contractor_core::config::ContractorConfig;
use contractor_core::contract::ContractType;
use contractor_core::document::OutputArea;
use contractor_core::error::{ContractorError, Result};
use contractor_core::record::ContractRecordRepository;
use contractor_core::template::TemplateStore;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Usage statistics over every stored record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractStats {
    pub total_contracts: usize,
    pub unique_users: usize,
    /// Count per contract type, in `ContractType::ALL` order; types without
    /// records are left out.
    pub per_type: Vec<(ContractType, usize)>,
}

impl fmt::Display for ContractStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "📊 Статистика:")?;
        writeln!(f)?;
        writeln!(f, "👥 Уникальных пользователей: {}", self.unique_users)?;
        writeln!(f, "📄 Всего договоров: {}", self.total_contracts)?;
        writeln!(f)?;
        write!(f, "По типам:")?;
        for (contract_type, count) in &self.per_type {
            write!(f, "\n• {}: {}", contract_type.display_name(), count)?;
        }
        Ok(())
    }
}

pub struct AdminService {
    config: ContractorConfig,
    records: Arc<dyn ContractRecordRepository>,
    templates: Arc<dyn TemplateStore>,
    output: Arc<dyn OutputArea>,
}

impl AdminService {
    /// Admin rights follow `config.admin_user_id`; 0 disables every admin
    /// operation.
    pub fn new(
        config: ContractorConfig,
        records: Arc<dyn ContractRecordRepository>,
        templates: Arc<dyn TemplateStore>,
        output: Arc<dyn OutputArea>,
    ) -> Self {
        Self {
            config,
            records,
            templates,
            output,
        }
    }

    pub async fn stats(&self, caller: i64) -> Result<ContractStats> {
        self.ensure_admin(caller)?;

        let records = self.records.list_all().await?;
        let unique_users = records
            .iter()
            .map(|r| r.user_id)
            .collect::<HashSet<_>>()
            .len();
        let per_type = ContractType::ALL
            .iter()
            .map(|ct| (*ct, records.iter().filter(|r| r.contract_type == *ct).count()))
            .filter(|(_, count)| *count > 0)
            .collect();

        Ok(ContractStats {
            total_contracts: records.len(),
            unique_users,
            per_type,
        })
    }

    /// Names of the stored template files.
    pub async fn templates(&self, caller: i64) -> Result<Vec<String>> {
        self.ensure_admin(caller)?;
        self.templates.list().await
    }

    /// Empties the output area and returns how many documents were removed.
    pub async fn cleanup_output(&self, caller: i64) -> Result<usize> {
        self.ensure_admin(caller)?;
        let removed = self.output.clear().await?;
        tracing::info!(caller, removed, "Output area cleaned up");
        Ok(removed)
    }

    fn ensure_admin(&self, caller: i64) -> Result<()> {
        if self.config.is_admin(caller) {
            Ok(())
        } else {
            tracing::warn!(caller, "Admin command refused");
            Err(ContractorError::PermissionDenied(
                "❌ Нет прав доступа".to_string(),
            ))
        }
    }
}
