//! ShelfMark Sync
//!
//! Drives one migration run: fetch the catalog, match, update, report.
//!
//! - `fetcher`: Catalog fetch with a single retry on transient failures
//! - `updater`: Marks confirmed matches finished, or previews in dry-run mode
//! - `report`: Summary of matched, ambiguous, unmatched and failed records
//! - `manager`: Runs the stages in order

mod fetcher;
mod manager;
mod report;
mod types;
mod updater;

// Public exports
pub use fetcher::{fetch_catalog, RetryPolicy};
pub use manager::{MigrationManager, RunOptions, RunSummary};
pub use report::{CandidateSummary, ReviewItem, RunReport, UnmatchedItem};
pub use types::{UpdateFailure, UpdateMode, UpdateOutcome};
pub use updater::apply_updates;
