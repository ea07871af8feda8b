//! ShelfMark Core
//!
//! Shared domain types, the catalog service seam, and error handling for
//! ShelfMark, a one-shot importer of Goodreads "read" history into
//! Audiobookshelf "finished" status.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `SourceRecord`, `CatalogEntry`, `MatchResult`
//! - **Core Traits**: `CatalogService` (list library items, mark finished)
//! - **Error Handling**: Unified `ShelfmarkError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use shelfmark_core::types::{CatalogEntry, CatalogId, ReadStatus, SourceRecord};
//!
//! let record = SourceRecord::new("Unseen Academy", "J. Author", None, ReadStatus::Read);
//! assert!(record.is_read());
//!
//! let entry = CatalogEntry::new(CatalogId::new("li_1"), "The Unseen Academy", "J. Author");
//! assert!(!entry.finished);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{Result, ShelfmarkError};
pub use traits::CatalogService;

pub use types::{
    CatalogEntry, CatalogId, Decision, MatchMethod, MatchResult, ReadStatus, ScoredCandidate,
    SourceRecord,
};
