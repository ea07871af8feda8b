//! Library listing operations for Audiobookshelf.

use crate::client::{endpoint, read_json};
use crate::error::{AbsClientError, Result};
use crate::types::{AbsLibrary, AbsLibraryItem, LibrariesResponse, LibraryItemsPage};
use reqwest::Client;
use tracing::debug;

/// Library client for Audiobookshelf.
pub struct LibraryClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    api_key: &'a str,
}

impl<'a> LibraryClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str, api_key: &'a str) -> Self {
        Self {
            http,
            base_url,
            api_key,
        }
    }

    /// List all libraries visible to the API key's user.
    pub async fn list_libraries(&self) -> Result<Vec<AbsLibrary>> {
        let url = endpoint(self.base_url, &["api", "libraries"])?;
        debug!(url = %url, "Fetching libraries");

        let response = self
            .http
            .get(url)
            .bearer_auth(self.api_key)
            .send()
            .await
            .map_err(AbsClientError::from_send)?;

        let libraries: LibrariesResponse = read_json(response, "libraries").await?;
        debug!(libraries = libraries.libraries.len(), "Fetched libraries");

        Ok(libraries.libraries)
    }

    /// Get one page of a library's items.
    ///
    /// # Arguments
    /// * `library_id` - Library to list
    /// * `page` - Zero-based page index
    /// * `limit` - Items per page
    pub async fn get_items_page(
        &self,
        library_id: &str,
        page: u32,
        limit: u32,
    ) -> Result<LibraryItemsPage> {
        let url = endpoint(self.base_url, &["api", "libraries", library_id, "items"])?;
        debug!(url = %url, page, limit, "Fetching library items");

        let response = self
            .http
            .get(url)
            .query(&[
                ("limit", limit.to_string()),
                ("page", page.to_string()),
                ("minified", "1".to_string()),
            ])
            .bearer_auth(self.api_key)
            .send()
            .await
            .map_err(AbsClientError::from_send)?;

        read_json(response, "library items").await
    }

    /// Get every item of a library, following pages until `total` is reached.
    pub async fn get_all_items(&self, library_id: &str, page_size: u32) -> Result<Vec<AbsLibraryItem>> {
        let mut items = Vec::new();
        let mut page = 0;

        loop {
            let batch = self.get_items_page(library_id, page, page_size).await?;
            let received = batch.results.len();
            let total = batch.total;
            items.extend(batch.results);

            if received == 0 || items.len() >= total {
                break;
            }
            page += 1;
        }

        debug!(library_id = %library_id, items = items.len(), "Fetched all library items");
        Ok(items)
    }
}
