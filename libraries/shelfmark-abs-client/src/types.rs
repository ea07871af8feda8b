//! Types for Audiobookshelf API requests and responses.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default number of library items requested per page
pub const DEFAULT_PAGE_SIZE: u32 = 500;

/// Configuration for connecting to an Audiobookshelf server.
#[derive(Debug, Clone)]
pub struct AbsConfig {
    /// Base URL of the server (e.g., "http://localhost:13378")
    pub url: String,
    /// Static API key, sent as a bearer token
    pub api_key: String,
    /// Restrict the catalog to one library; all book libraries otherwise
    pub library_id: Option<String>,
    /// Timeout applied to every request
    pub timeout: Duration,
    /// Items per page when listing a library
    pub page_size: u32,
}

impl AbsConfig {
    /// Create a new config with the URL and API key.
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            api_key: api_key.into(),
            library_id: None,
            timeout: DEFAULT_TIMEOUT,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_library(mut self, library_id: impl Into<String>) -> Self {
        self.library_id = Some(library_id.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }
}

// =============================================================================
// Library Types
// =============================================================================

/// Response of `GET /api/libraries`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LibrariesResponse {
    pub libraries: Vec<AbsLibrary>,
}

/// A library as returned by the server.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AbsLibrary {
    pub id: String,
    pub name: String,
    /// "book" or "podcast"
    pub media_type: String,
}

impl AbsLibrary {
    pub fn is_book_library(&self) -> bool {
        self.media_type == "book"
    }
}

/// One page of `GET /api/libraries/{id}/items`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LibraryItemsPage {
    pub results: Vec<AbsLibraryItem>,
    pub total: usize,
}

/// A (minified) library item.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AbsLibraryItem {
    pub id: String,
    pub media: AbsMedia,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AbsMedia {
    pub metadata: AbsBookMetadata,
}

/// Book metadata used for matching; every field may be missing on poorly
/// tagged items. Other metadata (subtitle, ASIN, narrators) is ignored.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AbsBookMetadata {
    #[serde(default)]
    pub title: Option<String>,
    /// Comma-separated author names
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub isbn: Option<String>,
}

// =============================================================================
// User / Progress Types
// =============================================================================

/// Response of `GET /api/me`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AbsUser {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub media_progress: Vec<AbsMediaProgress>,
}

impl AbsUser {
    /// Library item ids the user has finished (podcast episode progress excluded)
    pub fn finished_item_ids(&self) -> impl Iterator<Item = &str> {
        self.media_progress
            .iter()
            .filter(|p| p.is_finished && p.episode_id.is_none())
            .map(|p| p.library_item_id.as_str())
    }
}

/// Progress of one media item for the current user.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AbsMediaProgress {
    pub library_item_id: String,
    #[serde(default)]
    pub episode_id: Option<String>,
    #[serde(default)]
    pub is_finished: bool,
}

/// Request body for `PATCH /api/me/progress/{id}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdate {
    pub is_finished: bool,
}

impl ProgressUpdate {
    pub fn finished() -> Self {
        Self { is_finished: true }
    }
}
