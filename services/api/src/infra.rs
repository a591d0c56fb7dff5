use admit_ai::admissions::{Category, ModelArtifact, ScoringContext, ScoringPolicy};
use admit_ai::config::AppConfig;
use admit_ai::error::AppError;
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Configuration with an optional CLI override for the artifact location.
pub(crate) fn load_config(model: Option<PathBuf>) -> Result<AppConfig, AppError> {
    let mut config = AppConfig::load()?;
    if let Some(path) = model {
        config.model.artifact_path = path;
    }
    Ok(config)
}

pub(crate) fn load_scoring_context(
    artifact_path: &Path,
    policy: ScoringPolicy,
) -> Result<ScoringContext, AppError> {
    let artifact = ModelArtifact::from_path(artifact_path)?;
    Ok(ScoringContext::from_artifact(artifact, policy))
}

/// Clap value parser for degree, exam and country labels.
pub(crate) fn parse_category<C: Category>(raw: &str) -> Result<C, String> {
    C::parse_label(raw).ok_or_else(|| {
        let known: Vec<_> = C::ALL.iter().map(|value| value.label()).collect();
        format!(
            "unknown {} '{}' (expected one of: {})",
            C::FIELD,
            raw.trim(),
            known.join(", ")
        )
    })
}
