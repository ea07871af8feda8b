//! ShelfMark Importer
//!
//! Reads Goodreads exports and matches them against an Audiobookshelf catalog.
//!
//! # Features
//!
//! - Goodreads CSV parsing with column detection across export versions
//! - Title/author normalization (punctuation, articles, series suffixes)
//! - ISBN-10/ISBN-13 normalization for authoritative matches
//! - Fuzzy matching with calibrated confidence and ambiguity thresholds
//!
//! # Architecture
//!
//! - `schema`: Maps export headers to the fields a `SourceRecord` needs
//! - `goodreads`: Loads export rows into `SourceRecord`s
//! - `normalize`: String and ISBN normalization used for comparison
//! - `fuzzy`: Scores and ranks catalog candidates per source record

mod error;
mod types;

pub mod fuzzy;
pub mod goodreads;
pub mod normalize;
pub mod schema;

pub use error::ImportError;
pub use fuzzy::BookMatcher;
pub use types::*;

/// Re-export commonly used types
pub type Result<T> = std::result::Result<T, ImportError>;
