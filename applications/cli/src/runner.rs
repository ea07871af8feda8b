/// One migration run from a resolved configuration
use crate::config::RunConfig;
use anyhow::Context;
use shelfmark_abs_client::AbsClient;
use shelfmark_importer::goodreads;
use shelfmark_sync::{MigrationManager, RunReport, UpdateMode};
use std::process::ExitCode;

/// Run completed and every intended update succeeded
pub const EXIT_SUCCESS: u8 = 0;

/// Fatal error: bad input, configuration, connection or authentication
pub const EXIT_FATAL: u8 = 1;

/// Run completed but at least one update failed
pub const EXIT_UPDATE_FAILURES: u8 = 2;

/// Load the export, match against the server and apply (or preview) updates
pub async fn run(config: &RunConfig) -> anyhow::Result<RunReport> {
    let records = goodreads::read_export(&config.goodreads_csv).with_context(|| {
        format!(
            "Failed to read Goodreads export {}",
            config.goodreads_csv.display()
        )
    })?;

    let client = AbsClient::new(config.abs.clone()).context("Invalid Audiobookshelf settings")?;
    tracing::info!(url = %client.url(), "Connecting to Audiobookshelf");

    let summary = MigrationManager::new(&client, config.options)
        .run(&records)
        .await
        .context("Migration aborted")?;

    if let Some(path) = &config.report_json {
        let json = summary.report.to_json()?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        tracing::info!(path = %path.display(), "Report written");
    }

    Ok(summary.report)
}

/// Process exit code for a completed run
pub fn exit_code(report: &RunReport) -> ExitCode {
    if report.is_success() {
        ExitCode::from(EXIT_SUCCESS)
    } else {
        ExitCode::from(EXIT_UPDATE_FAILURES)
    }
}

/// Header printed before a run
pub fn banner(mode: UpdateMode) -> String {
    let mode = match mode {
        UpdateMode::DryRun => "DRY RUN (use --apply to write changes)",
        UpdateMode::Live => "APPLY",
    };
    format!("ShelfMark v{}\nMode: {}", env!("CARGO_PKG_VERSION"), mode)
}
