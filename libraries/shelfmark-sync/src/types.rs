use serde::{Deserialize, Serialize};
use shelfmark_core::types::CatalogId;

/// Whether updates are sent to the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateMode {
    /// Log intended updates only; no network calls
    DryRun,
    /// Send "mark finished" requests
    Live,
}

impl UpdateMode {
    pub fn from_apply_flag(apply: bool) -> Self {
        if apply {
            Self::Live
        } else {
            Self::DryRun
        }
    }

    pub fn is_dry_run(self) -> bool {
        self == Self::DryRun
    }
}

/// A single failed "mark finished" call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateFailure {
    pub id: CatalogId,
    pub title: String,
    pub error: String,
}

/// What the updater did, per distinct catalog entry, in id order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateOutcome {
    pub mode: UpdateMode,
    /// Marked finished on the server (live mode)
    pub applied: Vec<CatalogId>,
    /// Would be marked finished (dry-run mode)
    pub planned: Vec<CatalogId>,
    /// Already finished; skipped without a call
    pub already_finished: Vec<CatalogId>,
    pub failures: Vec<UpdateFailure>,
}

impl UpdateOutcome {
    pub fn new(mode: UpdateMode) -> Self {
        Self {
            mode,
            applied: Vec::new(),
            planned: Vec::new(),
            already_finished: Vec::new(),
            failures: Vec::new(),
        }
    }
}
