use crate::types::{UpdateFailure, UpdateMode, UpdateOutcome};
use shelfmark_core::types::{CatalogEntry, CatalogId, MatchResult};
use shelfmark_core::CatalogService;
use std::collections::BTreeMap;
use tracing::{debug, error, info};

/// Mark every confirmed match finished
///
/// Only `Confirmed` results are considered. Several results pointing at the
/// same catalog entry produce a single call; entries already finished produce
/// none. A failed call is recorded and the batch continues.
pub async fn apply_updates<S>(
    service: &S,
    results: &[MatchResult],
    mode: UpdateMode,
) -> UpdateOutcome
where
    S: CatalogService + ?Sized,
{
    let targets: BTreeMap<&CatalogId, &CatalogEntry> = results
        .iter()
        .filter(|result| result.is_confirmed())
        .filter_map(|result| result.candidate.as_ref())
        .map(|entry| (&entry.id, entry))
        .collect();

    let mut outcome = UpdateOutcome::new(mode);

    for (id, entry) in targets {
        if entry.finished {
            debug!(id = %id, title = %entry.title, "Already finished, skipping");
            outcome.already_finished.push(id.clone());
            continue;
        }

        if mode.is_dry_run() {
            info!(id = %id, title = %entry.title, "[dry run] Would mark finished");
            outcome.planned.push(id.clone());
            continue;
        }

        match service.mark_finished(id).await {
            Ok(()) => {
                info!(id = %id, title = %entry.title, "Marked finished");
                outcome.applied.push(id.clone());
            }
            Err(e) => {
                error!(id = %id, title = %entry.title, error = %e, "Failed to mark finished");
                outcome.failures.push(UpdateFailure {
                    id: id.clone(),
                    title: entry.title.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    info!(
        applied = outcome.applied.len(),
        planned = outcome.planned.len(),
        already_finished = outcome.already_finished.len(),
        failed = outcome.failures.len(),
        "Updates complete"
    );

    outcome
}
