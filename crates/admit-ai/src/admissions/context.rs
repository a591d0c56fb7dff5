use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use super::artifact::ModelArtifact;
use super::categories::CategoryMaps;
use super::domain::{ApplicantProfile, Category, CategoryField, Country, ProfileSubmission};
use super::encoder::{self, EncodingError, FeatureVector};
use super::predictor::Predictor;
use super::scoring::{AdmissionScorer, PredictionResult, ScoringPolicy};

/// Everything a prediction needs, built once per process and shared read-only.
///
/// Construct it from a loaded [`ModelArtifact`] in production, or from
/// hand-built maps and a fake [`Predictor`] in tests.
#[derive(Clone)]
pub struct ScoringContext {
    categories: CategoryMaps,
    predictor: Arc<dyn Predictor>,
    scorer: AdmissionScorer,
}

impl ScoringContext {
    pub fn new(
        categories: CategoryMaps,
        predictor: Arc<dyn Predictor>,
        policy: ScoringPolicy,
    ) -> Self {
        for country in policy.supported_countries.iter() {
            if !categories.contains(*country) {
                warn!(
                    country = country.label(),
                    "supported country is absent from the trained country map"
                );
            }
        }

        Self {
            categories,
            predictor,
            scorer: AdmissionScorer::new(policy),
        }
    }

    pub fn from_artifact(artifact: ModelArtifact, policy: ScoringPolicy) -> Self {
        let ModelArtifact {
            categories, forest, ..
        } = artifact;
        Self::new(categories, Arc::new(forest), policy)
    }

    pub fn categories(&self) -> &CategoryMaps {
        &self.categories
    }

    pub fn policy(&self) -> &ScoringPolicy {
        self.scorer.policy()
    }

    pub fn predictor_name(&self) -> &str {
        self.predictor.name()
    }

    /// Countries that are both allowed by policy and encodable by the model.
    pub fn available_countries(&self) -> Vec<Country> {
        Country::ALL
            .iter()
            .copied()
            .filter(|country| self.policy().supports(*country) && self.categories.contains(*country))
            .collect()
    }

    pub fn encode(&self, profile: &ApplicantProfile) -> Result<FeatureVector, EncodingError> {
        let features = encoder::encode(profile, &self.categories)?;
        if !self.policy().supports(profile.country) {
            return Err(EncodingError::UnknownCategory {
                field: CategoryField::Country,
                value: profile.country.label().to_string(),
            });
        }
        Ok(features)
    }

    pub fn evaluate(&self, profile: &ApplicantProfile) -> Result<PredictionResult, EncodingError> {
        let features = self.encode(profile)?;
        let raw_probability = self.predictor.predict(&features);
        let result = self.scorer.score(profile, raw_probability);

        debug!(
            exam = %profile.exam_type,
            country = %profile.country,
            raw_probability,
            penalty = result.penalty,
            prediction = result.prediction,
            verdict = result.verdict.label(),
            "admission chance scored"
        );
        Ok(result)
    }

    pub fn evaluate_submission(
        &self,
        submission: ProfileSubmission,
    ) -> Result<PredictionResult, EncodingError> {
        let profile = ApplicantProfile::try_from(submission)?;
        self.evaluate(&profile)
    }
}

impl fmt::Debug for ScoringContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScoringContext")
            .field("categories", &self.categories)
            .field("predictor", &self.predictor.name())
            .field("policy", self.policy())
            .finish()
    }
}
