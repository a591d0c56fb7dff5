use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::categories::CategoryMaps;
use super::domain::CategoryField;
use super::encoder::FEATURE_ORDER;
use super::predictor::{ForestError, RandomForest};

pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

/// Trained forest bundled with the category maps and feature order it was
/// fitted against. The three are loaded and validated as one unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,
    pub feature_order: Vec<String>,
    pub categories: CategoryMaps,
    #[serde(default)]
    pub metadata: ArtifactMetadata,
    pub forest: RandomForest,
}

/// Provenance recorded by the training job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub trained_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub training_rows: Option<u32>,
    #[serde(default)]
    pub cross_val_r2: Option<f64>,
}

impl ModelArtifact {
    pub fn new(categories: CategoryMaps, forest: RandomForest) -> Self {
        Self {
            format_version: ARTIFACT_FORMAT_VERSION,
            feature_order: FEATURE_ORDER.iter().map(|name| name.to_string()).collect(),
            categories,
            metadata: ArtifactMetadata::default(),
            forest,
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let artifact = Self::from_reader(BufReader::new(file))?;

        info!(
            path = %path.display(),
            trees = artifact.forest.tree_count(),
            countries = artifact.categories.country.len(),
            "model artifact loaded"
        );
        Ok(artifact)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ArtifactError> {
        let artifact: Self = serde_json::from_reader(reader)?;
        artifact.validate()?;
        Ok(artifact)
    }

    pub fn validate(&self) -> Result<(), ArtifactError> {
        if self.format_version != ARTIFACT_FORMAT_VERSION {
            return Err(ArtifactError::UnsupportedVersion {
                found: self.format_version,
                expected: ARTIFACT_FORMAT_VERSION,
            });
        }

        if !self.feature_order.iter().map(String::as_str).eq(FEATURE_ORDER) {
            return Err(ArtifactError::FeatureOrderMismatch {
                found: self.feature_order.join(","),
            });
        }

        for field in [
            CategoryField::Degree,
            CategoryField::ExamType,
            CategoryField::Country,
        ] {
            if self.categories.table(field).is_empty() {
                return Err(ArtifactError::EmptyCategoryMap { field });
            }
        }

        if let Some((field, code)) = self.categories.duplicate_code() {
            return Err(ArtifactError::DuplicateCode { field, code });
        }

        self.forest.validate()?;
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("failed to read model artifact '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid model artifact JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported artifact format version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
    #[error("artifact feature order [{found}] does not match the encoder")]
    FeatureOrderMismatch { found: String },
    #[error("artifact {field} map is empty")]
    EmptyCategoryMap { field: CategoryField },
    #[error("artifact {field} map assigns code {code} to more than one label")]
    DuplicateCode { field: CategoryField, code: u32 },
    #[error("invalid forest: {0}")]
    Forest(#[from] ForestError),
}
