/// Core traits for ShelfMark
use crate::error::Result;
use crate::types::{CatalogEntry, CatalogId};
use async_trait::async_trait;

/// The two operations ShelfMark needs from the target server
///
/// Implemented by the Audiobookshelf client; tests substitute in-memory fakes.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// List every book in the target library, with the current user's
    /// finished flag resolved
    ///
    /// # Errors
    /// `Connection` on network failure, `Auth` when the credential is
    /// rejected, `Service` on an unexpected response
    async fn list_catalog(&self) -> Result<Vec<CatalogEntry>>;

    /// Mark a single library item finished for the current user
    ///
    /// # Errors
    /// `Service` when the server rejects the update
    async fn mark_finished(&self, id: &CatalogId) -> Result<()>;
}
