//! Media progress operations for the current Audiobookshelf user.

use crate::client::{check_status, endpoint, read_json};
use crate::error::{AbsClientError, Result};
use crate::types::{AbsUser, ProgressUpdate};
use reqwest::Client;
use tracing::debug;

/// Progress client for Audiobookshelf.
pub struct ProgressClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    api_key: &'a str,
}

impl<'a> ProgressClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str, api_key: &'a str) -> Self {
        Self {
            http,
            base_url,
            api_key,
        }
    }

    /// Get the API key's user, including their media progress.
    pub async fn get_me(&self) -> Result<AbsUser> {
        let url = endpoint(self.base_url, &["api", "me"])?;
        debug!(url = %url, "Fetching current user");

        let response = self
            .http
            .get(url)
            .bearer_auth(self.api_key)
            .send()
            .await
            .map_err(AbsClientError::from_send)?;

        let user: AbsUser = read_json(response, "user").await?;
        debug!(
            username = %user.username,
            progress_entries = user.media_progress.len(),
            "Fetched current user"
        );

        Ok(user)
    }

    /// Mark a library item finished for the current user.
    pub async fn mark_finished(&self, library_item_id: &str) -> Result<()> {
        let url = endpoint(self.base_url, &["api", "me", "progress", library_item_id])?;
        debug!(url = %url, library_item_id = %library_item_id, "Marking item finished");

        let response = self
            .http
            .patch(url)
            .bearer_auth(self.api_key)
            .json(&ProgressUpdate::finished())
            .send()
            .await
            .map_err(AbsClientError::from_send)?;

        check_status(response).await?;
        debug!(library_item_id = %library_item_id, "Item marked finished");

        Ok(())
    }
}
