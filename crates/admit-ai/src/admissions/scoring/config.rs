use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::super::domain::{Category, Country};

/// Knobs that differ between deployments of the scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringPolicy {
    pub apply_low_score_penalty: bool,
    /// Exam position (0.0 to 1.0 within its range) below which the penalty applies.
    pub low_score_threshold: f64,
    /// Percentage points deducted per point of exam position below the threshold.
    pub penalty_multiplier: f64,
    pub supported_countries: BTreeSet<Country>,
}

impl ScoringPolicy {
    pub fn supports(&self, country: Country) -> bool {
        self.supported_countries.contains(&country)
    }

    pub fn without_penalty(mut self) -> Self {
        self.apply_low_score_penalty = false;
        self
    }

    pub fn with_countries(mut self, countries: impl IntoIterator<Item = Country>) -> Self {
        self.supported_countries = countries.into_iter().collect();
        self
    }
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            apply_low_score_penalty: true,
            low_score_threshold: 0.35,
            penalty_multiplier: 1.5,
            supported_countries: Country::ALL.iter().copied().collect(),
        }
    }
}
