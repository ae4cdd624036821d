//! Template store trait.

use crate::error::Result;
use async_trait::async_trait;

/// Read access to named templates.
///
/// Templates are addressed by id (`agent_template`,
/// `agent_assignment_template`, ...). How ids map onto storage is up to the
/// implementation.
#[async_trait]
pub trait TemplateStore: Send + Sync {
    /// Loads a template's text.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(text))`: Template found
    /// - `Ok(None)`: No template with this id
    /// - `Err(_)`: Error occurred during retrieval
    async fn load(&self, template_id: &str) -> Result<Option<String>>;

    /// Checks whether a template exists without keeping its content.
    async fn exists(&self, template_id: &str) -> Result<bool> {
        Ok(self.load(template_id).await?.is_some())
    }

    /// Lists the names of all stored templates, sorted.
    async fn list(&self) -> Result<Vec<String>>;
}
