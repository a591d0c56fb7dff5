mod config;
mod policy;
mod rules;

pub use config::ScoringPolicy;
pub use policy::{FitWarning, Verdict};
pub use rules::{DimensionValue, Rating, ScorecardDimension, ScorecardEntry, Tip};

use super::domain::ApplicantProfile;
use serde::Serialize;

/// Turns a raw model output into the explained prediction for a profile.
#[derive(Debug, Clone)]
pub struct AdmissionScorer {
    policy: ScoringPolicy,
}

impl AdmissionScorer {
    pub fn new(policy: ScoringPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    pub fn score(&self, profile: &ApplicantProfile, raw_probability: f64) -> PredictionResult {
        let model_probability = if raw_probability.is_nan() {
            0.0
        } else {
            raw_probability.clamp(0.0, 1.0)
        };

        let penalty = policy::low_score_penalty(profile, &self.policy);
        let prediction = policy::round_to_cents((model_probability * 100.0 - penalty).max(0.0));

        PredictionResult {
            model_probability,
            penalty,
            probability: prediction / 100.0,
            prediction,
            verdict: Verdict::from_percentage(prediction),
            scorecard: rules::build_scorecard(profile),
            tips: rules::collect_tips(profile),
            fit_warning: policy::check_fit(profile.exam_type, profile.country),
        }
    }
}

/// Explained outcome of a single prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    /// Model output clamped to [0, 1], before any penalty.
    pub model_probability: f64,
    /// Percentage points deducted for a low exam score.
    pub penalty: f64,
    /// Final admit probability in [0, 1].
    pub probability: f64,
    /// Final admit percentage in [0, 100], rounded to two decimals.
    pub prediction: f64,
    pub verdict: Verdict,
    pub scorecard: Vec<ScorecardEntry>,
    pub tips: Vec<Tip>,
    pub fit_warning: Option<FitWarning>,
}
