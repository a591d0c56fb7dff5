use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::body::to_bytes;
use axum::response::Response;
use serde_json::Value;

use crate::admissions::categories::CategoryMaps;
use crate::admissions::domain::{ApplicantProfile, Country, Degree, ExamType, ProfileSubmission};
use crate::admissions::encoder::FeatureVector;
use crate::admissions::predictor::Predictor;
use crate::admissions::scoring::{AdmissionScorer, ScoringPolicy};
use crate::admissions::ScoringContext;

/// Returns a fixed raw output and counts how often it was asked.
pub(super) struct FixedPredictor {
    pub(super) output: f64,
    calls: AtomicUsize,
}

impl FixedPredictor {
    pub(super) fn new(output: f64) -> Self {
        Self {
            output,
            calls: AtomicUsize::new(0),
        }
    }

    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Predictor for FixedPredictor {
    fn predict(&self, _features: &FeatureVector) -> f64 {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.output
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

/// Echoes the CGPA feature scaled to a probability so tests can see which
/// features reached the model.
pub(super) struct CgpaEchoPredictor;

impl Predictor for CgpaEchoPredictor {
    fn predict(&self, features: &FeatureVector) -> f64 {
        features.get(2).unwrap_or_default() / 10.0
    }
}

pub(super) fn masters_profile() -> ApplicantProfile {
    ApplicantProfile {
        degree: Degree::Masters,
        exam_type: ExamType::Ielts,
        exam_score: 7.0,
        work_experience_years: 2,
        cgpa: 8.5,
        sop: 4.0,
        lor: 4.0,
        research: true,
        internship: false,
        country: Country::Germany,
    }
}

pub(super) fn masters_submission() -> ProfileSubmission {
    ProfileSubmission {
        degree: "Masters".to_string(),
        exam_type: "IELTS".to_string(),
        exam_score: 7.0,
        work_exp: 2,
        cgpa: 8.5,
        sop: 4.0,
        lor: 4.0,
        research: true,
        internship: false,
        country: "Germany".to_string(),
    }
}

pub(super) fn scorer() -> AdmissionScorer {
    AdmissionScorer::new(ScoringPolicy::default())
}

pub(super) fn scorer_without_penalty() -> AdmissionScorer {
    AdmissionScorer::new(ScoringPolicy::default().without_penalty())
}

pub(super) fn context_with(predictor: Arc<dyn Predictor>) -> ScoringContext {
    ScoringContext::new(CategoryMaps::standard(), predictor, ScoringPolicy::default())
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("json body")
}
