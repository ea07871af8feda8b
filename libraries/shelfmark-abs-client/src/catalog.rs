//! `CatalogService` implementation backed by the Audiobookshelf API.

use crate::client::AbsClient;
use crate::error::{AbsClientError, Result};
use crate::types::{AbsLibrary, AbsLibraryItem};
use async_trait::async_trait;
use shelfmark_core::types::{CatalogEntry, CatalogId};
use shelfmark_core::CatalogService;
use std::collections::HashSet;
use tracing::{debug, info};

impl AbsClient {
    /// Libraries the catalog is built from.
    ///
    /// With a configured library id, exactly that library (which must be a
    /// book library); otherwise every book library.
    pub async fn target_libraries(&self) -> Result<Vec<AbsLibrary>> {
        let libraries = self.library().list_libraries().await?;

        match self.config().library_id.as_deref() {
            Some(wanted) => libraries
                .into_iter()
                .find(|library| library.id == wanted && library.is_book_library())
                .map(|library| vec![library])
                .ok_or_else(|| AbsClientError::LibraryNotFound(wanted.to_string())),
            None => Ok(libraries
                .into_iter()
                .filter(AbsLibrary::is_book_library)
                .collect()),
        }
    }

    /// Fetch all book items joined with the current user's finished flags.
    pub async fn fetch_catalog(&self) -> Result<Vec<CatalogEntry>> {
        let libraries = self.target_libraries().await?;
        let user = self.progress().get_me().await?;
        let finished: HashSet<&str> = user.finished_item_ids().collect();

        let mut catalog = Vec::new();
        for library in &libraries {
            let items = self
                .library()
                .get_all_items(&library.id, self.config().page_size)
                .await?;
            debug!(library = %library.name, items = items.len(), "Listed library");

            catalog.extend(
                items
                    .into_iter()
                    .map(|item| to_catalog_entry(item, &finished)),
            );
        }

        info!(
            libraries = libraries.len(),
            books = catalog.len(),
            finished = catalog.iter().filter(|entry| entry.finished).count(),
            "Fetched Audiobookshelf catalog"
        );

        Ok(catalog)
    }
}

fn to_catalog_entry(item: AbsLibraryItem, finished: &HashSet<&str>) -> CatalogEntry {
    let is_finished = finished.contains(item.id.as_str());
    let metadata = item.media.metadata;

    CatalogEntry {
        id: CatalogId::new(item.id),
        title: metadata.title.unwrap_or_default(),
        author: metadata.author_name.unwrap_or_default(),
        isbn: metadata.isbn.filter(|isbn| !isbn.trim().is_empty()),
        finished: is_finished,
    }
}

#[async_trait]
impl CatalogService for AbsClient {
    async fn list_catalog(&self) -> shelfmark_core::Result<Vec<CatalogEntry>> {
        Ok(self.fetch_catalog().await?)
    }

    async fn mark_finished(&self, id: &CatalogId) -> shelfmark_core::Result<()> {
        Ok(self.progress().mark_finished(id.as_str()).await?)
    }
}
