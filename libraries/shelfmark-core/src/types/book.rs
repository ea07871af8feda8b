use serde::{Deserialize, Serialize};

/// Whether a book sits on the Goodreads "read" shelf
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadStatus {
    Read,
    NotRead,
}

/// A book record parsed from a Goodreads export
///
/// Whitespace is already normalized; case is preserved as exported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRecord {
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
    pub status: ReadStatus,
}

impl SourceRecord {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        isbn: Option<String>,
        status: ReadStatus,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            isbn,
            status,
        }
    }

    pub fn is_read(&self) -> bool {
        self.status == ReadStatus::Read
    }
}
