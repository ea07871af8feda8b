//! End-of-run summary

use crate::types::{UpdateFailure, UpdateMode, UpdateOutcome};
use serde::Serialize;
use shelfmark_core::types::{CatalogEntry, CatalogId, Decision, MatchResult};
use std::fmt;

/// A catalog entry as shown to the user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateSummary {
    pub id: CatalogId,
    pub title: String,
    pub author: String,
    pub score: f64,
}

impl CandidateSummary {
    fn new(entry: &CatalogEntry, score: f64) -> Self {
        Self {
            id: entry.id.clone(),
            title: entry.title.clone(),
            author: entry.author.clone(),
            score,
        }
    }
}

/// An ambiguous match awaiting manual review
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewItem {
    pub title: String,
    pub author: String,
    pub best: CandidateSummary,
    pub runner_up: Option<CandidateSummary>,
}

/// A read record with no usable match
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnmatchedItem {
    pub title: String,
    pub author: String,
    /// Score of the closest catalog entry (0 when the catalog is empty)
    pub best_score: f64,
}

/// Summary of one run
///
/// Record counts (`read_records`, `confirmed`, review and unmatched lists) are
/// per Goodreads record; `applied`, `planned` and `already_finished` are per
/// distinct catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub mode: UpdateMode,
    pub read_records: usize,
    pub confirmed: usize,
    pub applied: usize,
    pub planned: usize,
    pub already_finished: usize,
    pub ambiguous: Vec<ReviewItem>,
    pub no_match: Vec<UnmatchedItem>,
    pub failures: Vec<UpdateFailure>,
}

impl RunReport {
    pub fn build(results: &[MatchResult], outcome: &UpdateOutcome) -> Self {
        let mut ambiguous = Vec::new();
        let mut no_match = Vec::new();
        let mut confirmed = 0;

        for result in results {
            match (result.decision, result.candidate.as_ref()) {
                (Decision::Confirmed, _) => confirmed += 1,
                (Decision::Ambiguous, Some(best)) => ambiguous.push(ReviewItem {
                    title: result.source.title.clone(),
                    author: result.source.author.clone(),
                    best: CandidateSummary::new(best, result.confidence),
                    runner_up: result
                        .runner_up
                        .as_ref()
                        .map(|r| CandidateSummary::new(&r.entry, r.score)),
                }),
                (Decision::Ambiguous, None) | (Decision::NoMatch, _) => {
                    no_match.push(UnmatchedItem {
                        title: result.source.title.clone(),
                        author: result.source.author.clone(),
                        best_score: result.confidence,
                    });
                }
            }
        }

        Self {
            mode: outcome.mode,
            read_records: results.len(),
            confirmed,
            applied: outcome.applied.len(),
            planned: outcome.planned.len(),
            already_finished: outcome.already_finished.len(),
            ambiguous,
            no_match,
            failures: outcome.failures.clone(),
        }
    }

    /// True when every intended update went through
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn to_json(&self) -> shelfmark_core::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = match self.mode {
            UpdateMode::DryRun => "DRY RUN",
            UpdateMode::Live => "APPLY",
        };

        writeln!(f, "ShelfMark summary ({})", mode)?;
        writeln!(f, "  Read books in export:      {}", self.read_records)?;
        writeln!(f, "  Confirmed matches:         {}", self.confirmed)?;
        match self.mode {
            UpdateMode::DryRun => {
                writeln!(f, "    would mark finished:     {}", self.planned)?;
            }
            UpdateMode::Live => {
                writeln!(f, "    marked finished:         {}", self.applied)?;
            }
        }
        writeln!(f, "    already finished:        {}", self.already_finished)?;
        writeln!(f, "  Ambiguous (needs review):  {}", self.ambiguous.len())?;
        writeln!(f, "  No match:                  {}", self.no_match.len())?;
        writeln!(f, "  Update failures:           {}", self.failures.len())?;

        if !self.ambiguous.is_empty() {
            writeln!(f)?;
            writeln!(f, "Ambiguous matches:")?;
            for item in &self.ambiguous {
                writeln!(f, "  \"{}\" by {}", item.title, item.author)?;
                write_candidate(f, "best", &item.best)?;
                if let Some(runner_up) = &item.runner_up {
                    write_candidate(f, "next", runner_up)?;
                }
            }
        }

        if !self.no_match.is_empty() {
            writeln!(f)?;
            writeln!(f, "No match found:")?;
            for item in &self.no_match {
                writeln!(
                    f,
                    "  \"{}\" by {} (closest score {:.2})",
                    item.title, item.author, item.best_score
                )?;
            }
        }

        if !self.failures.is_empty() {
            writeln!(f)?;
            writeln!(f, "Failed updates:")?;
            for failure in &self.failures {
                writeln!(f, "  [{}] \"{}\": {}", failure.id, failure.title, failure.error)?;
            }
        }

        Ok(())
    }
}

fn write_candidate(f: &mut fmt::Formatter<'_>, label: &str, c: &CandidateSummary) -> fmt::Result {
    writeln!(
        f,
        "    {}: [{}] \"{}\" by {} (score {:.2})",
        label, c.id, c.title, c.author, c.score
    )
}
