//! Output area trait.

use crate::error::Result;
use async_trait::async_trait;

/// Addressable area where rendered documents are written for the caller to
/// pick up.
#[async_trait]
pub trait OutputArea: Send + Sync {
    /// Writes a document and returns its location.
    ///
    /// Implementations must not overwrite an existing document; on a name
    /// collision they pick a fresh location.
    async fn write(&self, file_name: &str, content: &str) -> Result<String>;

    /// Removes a previously written document. Missing documents are ignored.
    async fn discard(&self, location: &str) -> Result<()>;

    /// Removes every document and returns how many were removed.
    async fn clear(&self) -> Result<usize>;
}
