//! Admission chance prediction: applicant intake, feature encoding, forest
//! inference, and the explained result returned to applicants.

pub mod artifact;
pub mod batch;
pub mod categories;
mod context;
pub mod domain;
pub mod encoder;
pub mod predictor;
pub mod router;
pub mod scoring;
pub mod view;

#[cfg(test)]
mod tests;

pub use artifact::{ArtifactError, ArtifactMetadata, ModelArtifact, ARTIFACT_FORMAT_VERSION};
pub use batch::{score_csv, BatchOutcome, BatchRowError};
pub use categories::CategoryMaps;
pub use context::ScoringContext;
pub use domain::{
    ApplicantProfile, Category, CategoryField, Country, Degree, ExamType, ProfileSubmission,
    ScoreRange,
};
pub use encoder::{encode, EncodingError, FeatureVector, FEATURE_COUNT, FEATURE_ORDER};
pub use predictor::{ForestError, Predictor, RandomForest, RegressionTree, TreeNode};
pub use router::prediction_router;
pub use scoring::{
    AdmissionScorer, DimensionValue, FitWarning, PredictionResult, Rating, ScorecardDimension,
    ScorecardEntry, ScoringPolicy, Tip, Verdict,
};
pub use view::{PredictionView, ScorecardSummary, ScorecardView};
