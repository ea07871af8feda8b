use super::CatalogId;
use serde::{Deserialize, Serialize};

/// A book on the target server, as seen at fetch time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: CatalogId,
    pub title: String,
    /// Display author string; may list several authors separated by commas
    pub author: String,
    pub isbn: Option<String>,
    /// The current user has this item marked finished
    pub finished: bool,
}

impl CatalogEntry {
    /// Create an unfinished entry without ISBN
    pub fn new(id: CatalogId, title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            isbn: None,
            finished: false,
        }
    }

    pub fn with_isbn(mut self, isbn: impl Into<String>) -> Self {
        self.isbn = Some(isbn.into());
        self
    }

    pub fn with_finished(mut self, finished: bool) -> Self {
        self.finished = finished;
        self
    }
}
