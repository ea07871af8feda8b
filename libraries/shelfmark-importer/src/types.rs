//! Common types for the importer

use crate::{ImportError, Result};

/// Smallest title weight accepted; title similarity must dominate author similarity
pub const MIN_TITLE_WEIGHT: f64 = 0.7;

/// Thresholds and weights for the matcher
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchConfig {
    /// Scores at or above this are confirmed and applied (default: 0.85)
    pub high_threshold: f64,

    /// Scores at or above this (but below `high_threshold`) need manual review
    /// (default: 0.60)
    pub low_threshold: f64,

    /// Share of the combined score taken by title similarity; the remainder
    /// goes to author similarity (default: 0.75)
    pub title_weight: f64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            high_threshold: 0.85,
            low_threshold: 0.60,
            title_weight: 0.75,
        }
    }
}

impl MatchConfig {
    pub fn with_thresholds(high_threshold: f64, low_threshold: f64) -> Self {
        Self {
            high_threshold,
            low_threshold,
            ..Self::default()
        }
    }

    /// Reject thresholds outside [0, 1], inverted thresholds, and title weights
    /// below [`MIN_TITLE_WEIGHT`]
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("high_threshold", self.high_threshold),
            ("low_threshold", self.low_threshold),
            ("title_weight", self.title_weight),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ImportError::InvalidConfig(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }

        if self.low_threshold > self.high_threshold {
            return Err(ImportError::InvalidConfig(format!(
                "low_threshold ({}) must not exceed high_threshold ({})",
                self.low_threshold, self.high_threshold
            )));
        }

        if self.title_weight < MIN_TITLE_WEIGHT {
            return Err(ImportError::InvalidConfig(format!(
                "title_weight must be at least {}, got {}",
                MIN_TITLE_WEIGHT, self.title_weight
            )));
        }

        Ok(())
    }
}
