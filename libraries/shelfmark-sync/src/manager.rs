use crate::{apply_updates, fetch_catalog, RetryPolicy, RunReport, UpdateMode, UpdateOutcome};
use shelfmark_core::types::{MatchResult, SourceRecord};
use shelfmark_core::{CatalogService, Result};
use shelfmark_importer::{BookMatcher, MatchConfig};
use tracing::info;

/// Everything one run needs besides the records and the server
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunOptions {
    pub match_config: MatchConfig,
    pub mode: UpdateMode,
    pub retry: RetryPolicy,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            match_config: MatchConfig::default(),
            mode: UpdateMode::DryRun,
            retry: RetryPolicy::default(),
        }
    }
}

/// Output of a completed run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub results: Vec<MatchResult>,
    pub outcome: UpdateOutcome,
    pub report: RunReport,
}

/// Runs fetch, match, update and report in order against one server
pub struct MigrationManager<'a, S: CatalogService + ?Sized> {
    service: &'a S,
    options: RunOptions,
}

impl<'a, S: CatalogService + ?Sized> MigrationManager<'a, S> {
    pub fn new(service: &'a S, options: RunOptions) -> Self {
        Self { service, options }
    }

    /// Run the migration for already-loaded export records
    ///
    /// Fails only when the catalog cannot be fetched; individual update
    /// failures end up in the report.
    pub async fn run(&self, records: &[SourceRecord]) -> Result<RunSummary> {
        info!(
            mode = ?self.options.mode,
            records = records.len(),
            high_threshold = self.options.match_config.high_threshold,
            low_threshold = self.options.match_config.low_threshold,
            "Starting migration"
        );

        let catalog = fetch_catalog(self.service, self.options.retry).await?;

        let matcher = BookMatcher::with_config(self.options.match_config);
        let results = matcher.match_records(records, &catalog);

        let outcome = apply_updates(self.service, &results, self.options.mode).await;
        let report = RunReport::build(&results, &outcome);

        Ok(RunSummary {
            results,
            outcome,
            report,
        })
    }
}
