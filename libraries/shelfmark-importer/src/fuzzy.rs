//! Fuzzy matching with confidence scoring for Goodreads books against the catalog

use crate::normalize::{isbn_key, main_title, normalize_name, normalize_title, split_authors};
use crate::MatchConfig;
use shelfmark_core::types::{
    CatalogEntry, Decision, MatchMethod, MatchResult, ScoredCandidate, SourceRecord,
};
use std::cmp::Ordering;
use strsim::normalized_levenshtein;
use tracing::{debug, trace};

/// Fuzzy matcher for book matching with confidence scoring
///
/// Matching is a pure function of the records, the catalog and the config:
/// the same inputs always produce the same results in the same order.
#[derive(Debug, Clone, Default)]
pub struct BookMatcher {
    config: MatchConfig,
}

/// A catalog entry with its comparison keys computed once per run
struct PreparedEntry<'a> {
    entry: &'a CatalogEntry,
    titles: Vec<String>,
    authors: Vec<String>,
    isbn: Option<String>,
}

impl<'a> PreparedEntry<'a> {
    fn new(entry: &'a CatalogEntry) -> Self {
        Self {
            entry,
            titles: title_variants(&entry.title),
            authors: split_authors(&entry.author)
                .into_iter()
                .map(normalize_name)
                .filter(|name| !name.is_empty())
                .collect(),
            isbn: entry.isbn.as_deref().and_then(isbn_key),
        }
    }
}

impl BookMatcher {
    /// Create a new matcher with default thresholds
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: MatchConfig) -> Self {
        Self { config }
    }

    /// Match every "read" record against the catalog
    ///
    /// Returns one result per read record, in input order. Records on other
    /// shelves are ignored. Duplicate records are matched independently.
    pub fn match_records(
        &self,
        records: &[SourceRecord],
        catalog: &[CatalogEntry],
    ) -> Vec<MatchResult> {
        let prepared: Vec<PreparedEntry<'_>> = catalog.iter().map(PreparedEntry::new).collect();

        let results: Vec<MatchResult> = records
            .iter()
            .filter(|record| record.is_read())
            .map(|record| self.match_prepared(record, &prepared))
            .collect();

        debug!(
            matched = results.len(),
            catalog = catalog.len(),
            "Matched read records against catalog"
        );

        results
    }

    /// Match a single record against the catalog
    pub fn match_record(&self, record: &SourceRecord, catalog: &[CatalogEntry]) -> MatchResult {
        let prepared: Vec<PreparedEntry<'_>> = catalog.iter().map(PreparedEntry::new).collect();
        self.match_prepared(record, &prepared)
    }

    fn match_prepared(&self, record: &SourceRecord, catalog: &[PreparedEntry<'_>]) -> MatchResult {
        // ISBN equality is authoritative and skips text scoring entirely
        if let Some(isbn) = record.isbn.as_deref().and_then(isbn_key) {
            let by_isbn = catalog
                .iter()
                .filter(|candidate| candidate.isbn.as_deref() == Some(isbn.as_str()))
                .map(|candidate| candidate.entry)
                .min_by(|a, b| a.finished.cmp(&b.finished).then_with(|| a.id.cmp(&b.id)));

            if let Some(entry) = by_isbn {
                trace!(title = %record.title, id = %entry.id, "ISBN match");
                return MatchResult {
                    source: record.clone(),
                    candidate: Some(entry.clone()),
                    confidence: 1.0,
                    decision: Decision::Confirmed,
                    method: MatchMethod::Isbn,
                    runner_up: None,
                };
            }
        }

        let source_titles = title_variants(&record.title);
        let source_author = normalize_name(&record.author);

        let mut ranked: Vec<ScoredCandidate> = catalog
            .iter()
            .map(|candidate| ScoredCandidate {
                entry: candidate.entry.clone(),
                score: self.score(&source_titles, &source_author, candidate),
            })
            .collect();
        ranked.sort_by(rank_order);

        let mut ranked = ranked.into_iter();
        let Some(best) = ranked.next() else {
            return MatchResult::no_match(record.clone());
        };

        let decision = self.decide(best.score);
        trace!(
            title = %record.title,
            id = %best.entry.id,
            score = best.score,
            ?decision,
            "Best text candidate"
        );

        if decision == Decision::NoMatch {
            return MatchResult {
                confidence: best.score,
                ..MatchResult::no_match(record.clone())
            };
        }

        MatchResult {
            source: record.clone(),
            candidate: Some(best.entry),
            confidence: best.score,
            decision,
            method: MatchMethod::Text,
            runner_up: ranked.next(),
        }
    }

    /// Weighted title/author similarity in [0, 1]
    ///
    /// When either side has no author the title similarity stands alone.
    fn score(
        &self,
        source_titles: &[String],
        source_author: &str,
        candidate: &PreparedEntry<'_>,
    ) -> f64 {
        let title = best_similarity(source_titles, &candidate.titles);

        if source_author.is_empty() || candidate.authors.is_empty() {
            return title;
        }

        let author = candidate
            .authors
            .iter()
            .map(|name| similarity(source_author, name))
            .fold(0.0, f64::max);

        let weight = self.config.title_weight;
        weight * title + (1.0 - weight) * author
    }

    fn decide(&self, score: f64) -> Decision {
        if score >= self.config.high_threshold {
            Decision::Confirmed
        } else if score >= self.config.low_threshold {
            Decision::Ambiguous
        } else {
            Decision::NoMatch
        }
    }
}

/// Score descending, then entries still needing an update, then smallest id
fn rank_order(a: &ScoredCandidate, b: &ScoredCandidate) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.entry.finished.cmp(&b.entry.finished))
        .then_with(|| a.entry.id.cmp(&b.entry.id))
}

/// The normalized full title plus, when present, the normalized main title
/// before a subtitle separator
fn title_variants(title: &str) -> Vec<String> {
    let mut variants = vec![normalize_title(title)];

    if let Some(main) = main_title(title) {
        let main = normalize_title(main);
        if !main.is_empty() && !variants.contains(&main) {
            variants.push(main);
        }
    }

    variants
}

fn best_similarity(left: &[String], right: &[String]) -> f64 {
    left.iter()
        .flat_map(|a| right.iter().map(move |b| similarity(a, b)))
        .fold(0.0, f64::max)
}

/// Normalized Levenshtein similarity, tolerant of word order
///
/// Takes the better of the direct comparison and the comparison of the
/// alphabetically sorted words.
fn similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    if a == b {
        return 1.0;
    }

    let direct = normalized_levenshtein(a, b);
    let sorted = normalized_levenshtein(&sort_tokens(a), &sort_tokens(b));
    direct.max(sorted)
}

fn sort_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}
