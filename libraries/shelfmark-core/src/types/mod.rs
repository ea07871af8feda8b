mod book;
mod catalog;
mod ids;
mod matching;

pub use book::{ReadStatus, SourceRecord};
pub use catalog::CatalogEntry;
pub use ids::CatalogId;
pub use matching::{Decision, MatchMethod, MatchResult, ScoredCandidate};
