use super::{CatalogEntry, SourceRecord};
use serde::{Deserialize, Serialize};

/// Outcome of matching one source record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// Confident enough to mark finished automatically
    Confirmed,
    /// Plausible but needs manual review; never applied
    Ambiguous,
    /// Nothing in the catalog scored above the low threshold
    NoMatch,
}

/// How the best candidate was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMethod {
    /// Exact ISBN equality
    Isbn,
    /// Weighted title/author similarity
    Text,
}

/// A catalog entry together with its similarity score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    pub entry: CatalogEntry,
    /// Combined score in [0, 1]
    pub score: f64,
}

/// Result of matching a single "read" source record against the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub source: SourceRecord,

    /// Best-ranked catalog entry; withheld (`None`) when the decision is `NoMatch`
    pub candidate: Option<CatalogEntry>,

    /// Score of the best-ranked entry in [0, 1], also reported for `NoMatch`
    pub confidence: f64,

    pub decision: Decision,

    pub method: MatchMethod,

    /// Second-ranked candidate, shown next to ambiguous results
    pub runner_up: Option<ScoredCandidate>,
}

impl MatchResult {
    /// A result with no usable candidate
    pub fn no_match(source: SourceRecord) -> Self {
        Self {
            source,
            candidate: None,
            confidence: 0.0,
            decision: Decision::NoMatch,
            method: MatchMethod::Text,
            runner_up: None,
        }
    }

    pub fn is_confirmed(&self) -> bool {
        self.decision == Decision::Confirmed
    }
}
