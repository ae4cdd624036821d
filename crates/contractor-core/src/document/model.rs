use crate::contract::DocumentRole;
use serde::{Deserialize, Serialize};

/// A template rendered in memory, not yet written anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub role: DocumentRole,
    pub template_id: String,
    pub file_name: String,
    pub content: String,
}

/// A document written to the output area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredDocument {
    pub role: DocumentRole,
    /// Location string the caller uses to fetch the file.
    pub location: String,
}
