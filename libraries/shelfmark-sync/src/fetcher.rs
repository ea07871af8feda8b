use shelfmark_core::types::{CatalogEntry, CatalogId};
use shelfmark_core::{CatalogService, Result};
use std::collections::HashSet;
use std::time::Duration;
use tracing::{info, warn};

/// Retry behaviour for the catalog fetch: at most one retry, after a fixed delay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            delay: Duration::from_secs(2),
        }
    }
}

/// Fetch the full catalog, retrying once on a transient failure
///
/// Entries with an id seen earlier in the response are dropped so every id is
/// unique for the rest of the run.
pub async fn fetch_catalog<S>(service: &S, retry: RetryPolicy) -> Result<Vec<CatalogEntry>>
where
    S: CatalogService + ?Sized,
{
    let catalog = match service.list_catalog().await {
        Ok(catalog) => catalog,
        Err(e) if e.is_transient() => {
            warn!(
                error = %e,
                delay_ms = retry.delay.as_millis() as u64,
                "Catalog fetch failed, retrying once"
            );
            tokio::time::sleep(retry.delay).await;
            service.list_catalog().await?
        }
        Err(e) => return Err(e),
    };

    let catalog = dedupe_by_id(catalog);
    info!(entries = catalog.len(), "Catalog ready");
    Ok(catalog)
}

fn dedupe_by_id(catalog: Vec<CatalogEntry>) -> Vec<CatalogEntry> {
    let mut seen: HashSet<CatalogId> = HashSet::with_capacity(catalog.len());

    catalog
        .into_iter()
        .filter(|entry| {
            let first = seen.insert(entry.id.clone());
            if !first {
                warn!(id = %entry.id, title = %entry.title, "Dropping duplicate catalog id");
            }
            first
        })
        .collect()
}
