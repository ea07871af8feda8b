//! Run-level tests against an in-memory catalog service

use async_trait::async_trait;
use shelfmark_core::types::{CatalogEntry, CatalogId, Decision, ReadStatus, SourceRecord};
use shelfmark_core::{CatalogService, Result, ShelfmarkError};
use shelfmark_sync::{
    fetch_catalog, MigrationManager, RetryPolicy, RunOptions, UpdateMode,
};
use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

/// Catalog service backed by memory, recording every call
#[derive(Default)]
struct FakeCatalog {
    entries: Mutex<Vec<CatalogEntry>>,
    list_errors: Mutex<VecDeque<ShelfmarkError>>,
    failing_ids: HashSet<CatalogId>,
    list_calls: Mutex<usize>,
    mark_calls: Mutex<Vec<CatalogId>>,
}

impl FakeCatalog {
    fn with_entries(entries: Vec<CatalogEntry>) -> Self {
        Self {
            entries: Mutex::new(entries),
            ..Self::default()
        }
    }

    fn fail_list_with(self, error: ShelfmarkError) -> Self {
        self.list_errors.lock().unwrap().push_back(error);
        self
    }

    fn fail_mark_for(mut self, id: &str) -> Self {
        self.failing_ids.insert(CatalogId::new(id));
        self
    }

    fn list_calls(&self) -> usize {
        *self.list_calls.lock().unwrap()
    }

    fn mark_calls(&self) -> Vec<CatalogId> {
        self.mark_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CatalogService for FakeCatalog {
    async fn list_catalog(&self) -> Result<Vec<CatalogEntry>> {
        *self.list_calls.lock().unwrap() += 1;
        if let Some(err) = self.list_errors.lock().unwrap().pop_front() {
            return Err(err);
        }
        Ok(self.entries.lock().unwrap().clone())
    }

    async fn mark_finished(&self, id: &CatalogId) -> Result<()> {
        self.mark_calls.lock().unwrap().push(id.clone());
        if self.failing_ids.contains(id) {
            return Err(ShelfmarkError::service_status(500, "update rejected"));
        }
        let mut entries = self.entries.lock().unwrap();
        for entry in entries.iter_mut().filter(|e| &e.id == id) {
            entry.finished = true;
        }
        Ok(())
    }
}

fn read(title: &str, author: &str) -> SourceRecord {
    SourceRecord::new(title, author, None, ReadStatus::Read)
}

fn entry(id: &str, title: &str, author: &str) -> CatalogEntry {
    CatalogEntry::new(CatalogId::new(id), title, author)
}

fn options(mode: UpdateMode) -> RunOptions {
    RunOptions {
        mode,
        retry: RetryPolicy {
            delay: Duration::from_secs(2),
        },
        ..RunOptions::default()
    }
}

mod fetch {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_retries_once_on_transient_error() {
        let service = FakeCatalog::with_entries(vec![entry("1", "Dune", "Frank Herbert")])
            .fail_list_with(ShelfmarkError::connection("connection reset"));

        let catalog = fetch_catalog(&service, RetryPolicy::default())
            .await
            .unwrap();

        assert_eq!(catalog.len(), 1);
        assert_eq!(service.list_calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_gives_up_after_second_failure() {
        let service = FakeCatalog::default()
            .fail_list_with(ShelfmarkError::service_status(503, "unavailable"))
            .fail_list_with(ShelfmarkError::service_status(503, "unavailable"));

        let result = fetch_catalog(&service, RetryPolicy::default()).await;

        assert!(matches!(
            result,
            Err(ShelfmarkError::Service { status: Some(503), .. })
        ));
        assert_eq!(service.list_calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_does_not_retry_auth_errors() {
        let service =
            FakeCatalog::default().fail_list_with(ShelfmarkError::auth("invalid API key"));

        let result = fetch_catalog(&service, RetryPolicy::default()).await;

        assert!(matches!(result, Err(ShelfmarkError::Auth(_))));
        assert_eq!(service.list_calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_does_not_retry_client_errors() {
        let service = FakeCatalog::default()
            .fail_list_with(ShelfmarkError::service_status(404, "not found"));

        let result = fetch_catalog(&service, RetryPolicy::default()).await;

        assert!(result.is_err());
        assert_eq!(service.list_calls(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_ids_are_dropped() {
        let service = FakeCatalog::with_entries(vec![
            entry("1", "Dune", "Frank Herbert"),
            entry("1", "Dune (copy)", "Frank Herbert"),
        ]);

        let catalog = fetch_catalog(&service, RetryPolicy::default())
            .await
            .unwrap();

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog[0].title, "Dune");
    }
}

mod run {
    use super::*;

    #[tokio::test]
    async fn test_article_stripped_title_is_marked_finished() {
        let service = FakeCatalog::with_entries(vec![entry("1", "The Unseen Academy", "J. Author")]);
        let records = vec![read("Unseen Academy", "J. Author")];

        let summary = MigrationManager::new(&service, options(UpdateMode::Live))
            .run(&records)
            .await
            .unwrap();

        assert_eq!(summary.results.len(), 1);
        assert_eq!(summary.results[0].decision, Decision::Confirmed);
        assert_eq!(service.mark_calls(), vec![CatalogId::new("1")]);
        assert_eq!(summary.report.applied, 1);
        assert!(summary.report.is_success());
    }

    #[tokio::test]
    async fn test_empty_catalog_reports_no_match() {
        let service = FakeCatalog::default();
        let records = vec![read("Dune", "Frank Herbert")];

        let summary = MigrationManager::new(&service, options(UpdateMode::Live))
            .run(&records)
            .await
            .unwrap();

        assert_eq!(summary.results.len(), 1);
        assert_eq!(summary.results[0].decision, Decision::NoMatch);
        assert_eq!(summary.report.applied, 0);
        assert_eq!(summary.report.no_match.len(), 1);
        assert!(service.mark_calls().is_empty());
    }

    #[tokio::test]
    async fn test_second_run_makes_no_calls() {
        let service = FakeCatalog::with_entries(vec![
            entry("1", "Dune", "Frank Herbert"),
            entry("2", "Neuromancer", "William Gibson"),
        ]);
        let records = vec![read("Dune", "Frank Herbert"), read("Neuromancer", "William Gibson")];
        let manager = MigrationManager::new(&service, options(UpdateMode::Live));

        let first = manager.run(&records).await.unwrap();
        assert_eq!(first.report.applied, 2);
        assert_eq!(service.mark_calls().len(), 2);

        let second = manager.run(&records).await.unwrap();
        assert_eq!(second.report.applied, 0);
        assert_eq!(second.report.already_finished, 2);
        assert_eq!(service.mark_calls().len(), 2);
    }

    #[tokio::test]
    async fn test_dry_run_matches_live_without_calls() {
        let catalog = vec![
            entry("1", "Dune", "Frank Herbert"),
            entry("2", "The Hobbit", "J.R.R. Tolkien"),
            entry("3", "Mort", "Terry Pratchett").with_finished(true),
        ];
        let records = vec![
            read("Dune", "Frank Herbert"),
            read("Rabbit", "J.R.R. Tolkien"),
            read("Mort", "Terry Pratchett"),
            read("Snow Crash", "Neal Stephenson"),
        ];

        let dry_service = FakeCatalog::with_entries(catalog.clone());
        let dry = MigrationManager::new(&dry_service, options(UpdateMode::DryRun))
            .run(&records)
            .await
            .unwrap();

        let live_service = FakeCatalog::with_entries(catalog);
        let live = MigrationManager::new(&live_service, options(UpdateMode::Live))
            .run(&records)
            .await
            .unwrap();

        assert!(dry_service.mark_calls().is_empty());
        assert_eq!(dry.results, live.results);
        assert_eq!(dry.outcome.planned, live.outcome.applied);
        assert_eq!(dry.outcome.already_finished, live.outcome.already_finished);
        assert_eq!(dry.report.ambiguous, live.report.ambiguous);
        assert_eq!(dry.report.no_match, live.report.no_match);
        assert_eq!(dry.report.confirmed, live.report.confirmed);
        assert_eq!(dry.report.planned, 1);
        assert_eq!(dry.report.applied, 0);
    }

    #[tokio::test]
    async fn test_failed_update_does_not_stop_batch() {
        let service = FakeCatalog::with_entries(vec![
            entry("1", "Dune", "Frank Herbert"),
            entry("2", "Neuromancer", "William Gibson"),
            entry("3", "Snow Crash", "Neal Stephenson"),
        ])
        .fail_mark_for("2");
        let records = vec![
            read("Dune", "Frank Herbert"),
            read("Neuromancer", "William Gibson"),
            read("Snow Crash", "Neal Stephenson"),
        ];

        let summary = MigrationManager::new(&service, options(UpdateMode::Live))
            .run(&records)
            .await
            .unwrap();

        assert_eq!(service.mark_calls().len(), 3);
        assert_eq!(
            summary.outcome.applied,
            vec![CatalogId::new("1"), CatalogId::new("3")]
        );
        assert_eq!(summary.outcome.failures.len(), 1);
        assert_eq!(summary.outcome.failures[0].id, CatalogId::new("2"));
        assert!(!summary.report.is_success());
    }

    #[tokio::test]
    async fn test_same_entry_matched_twice_is_updated_once() {
        let service = FakeCatalog::with_entries(vec![entry("1", "Dune", "Frank Herbert")]);
        let records = vec![read("Dune", "Frank Herbert"), read("Dune", "Frank Herbert")];

        let summary = MigrationManager::new(&service, options(UpdateMode::Live))
            .run(&records)
            .await
            .unwrap();

        assert_eq!(summary.report.confirmed, 2);
        assert_eq!(summary.report.applied, 1);
        assert_eq!(service.mark_calls(), vec![CatalogId::new("1")]);
    }

    #[tokio::test]
    async fn test_ambiguous_match_is_never_applied() {
        let service = FakeCatalog::with_entries(vec![entry("1", "Rabbit", "J.R.R. Tolkien")]);
        let records = vec![read("Hobbit", "J.R.R. Tolkien")];

        let summary = MigrationManager::new(&service, options(UpdateMode::Live))
            .run(&records)
            .await
            .unwrap();

        assert_eq!(summary.results[0].decision, Decision::Ambiguous);
        assert_eq!(summary.report.ambiguous.len(), 1);
        assert!(service.mark_calls().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_failure_aborts_before_updates() {
        let service = FakeCatalog::with_entries(vec![entry("1", "Dune", "Frank Herbert")])
            .fail_list_with(ShelfmarkError::auth("invalid API key"));

        let result = MigrationManager::new(&service, options(UpdateMode::Live))
            .run(&[read("Dune", "Frank Herbert")])
            .await;

        assert!(matches!(result, Err(ShelfmarkError::Auth(_))));
        assert!(service.mark_calls().is_empty());
    }
}
