//! Contract type and document role value objects.

use crate::error::ContractorError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind of contract a form session produces.
///
/// Selects the question catalog and the template set. Chosen once per
/// session and never changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractType {
    /// Агентское соглашение
    Agent,
    /// Субагентское соглашение
    Subagent,
    /// Договор поставки
    Delivery,
}

impl ContractType {
    /// All contract types in menu order.
    pub const ALL: [ContractType; 3] = [Self::Agent, Self::Subagent, Self::Delivery];

    /// Stable tag used in callbacks, file names and storage.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Agent => "agent",
            Self::Subagent => "subagent",
            Self::Delivery => "delivery",
        }
    }

    /// Human-readable name shown to the user.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Agent => "Агентское соглашение",
            Self::Subagent => "Субагентское соглашение",
            Self::Delivery => "Договор поставки",
        }
    }

    /// Satellite documents generated alongside the primary contract,
    /// in declaration order.
    pub fn satellites(self) -> &'static [DocumentRole] {
        match self {
            Self::Agent | Self::Subagent => &[DocumentRole::Assignment, DocumentRole::Report],
            Self::Delivery => &[],
        }
    }

    /// Template identifier for the given document role.
    ///
    /// `{type}_template` for the primary document and
    /// `{type}_{role}_template` for satellites.
    pub fn template_id(self, role: DocumentRole) -> String {
        match role.suffix() {
            None => format!("{}_template", self.tag()),
            Some(suffix) => format!("{}_{}_template", self.tag(), suffix),
        }
    }
}

impl fmt::Display for ContractType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ContractType {
    type Err = ContractorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "agent" => Ok(Self::Agent),
            "subagent" => Ok(Self::Subagent),
            "delivery" => Ok(Self::Delivery),
            other => Err(ContractorError::UnknownContractType(other.to_string())),
        }
    }
}

/// Role a rendered document plays in the generated set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentRole {
    /// The contract itself.
    Primary,
    /// Поручение
    Assignment,
    /// Акт-отчёт
    Report,
}

impl DocumentRole {
    /// Suffix used in template ids and file names; `None` for the primary document.
    pub fn suffix(self) -> Option<&'static str> {
        match self {
            Self::Primary => None,
            Self::Assignment => Some("assignment"),
            Self::Report => Some("report"),
        }
    }
}
