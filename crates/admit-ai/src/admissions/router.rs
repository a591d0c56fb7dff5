use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;
use tracing::{info, warn};

use super::context::ScoringContext;
use super::domain::ProfileSubmission;

/// Router exposing the prediction endpoint over a shared context.
pub fn prediction_router(context: Arc<ScoringContext>) -> Router {
    Router::new()
        .route("/api/v1/predict", post(predict_handler))
        .with_state(context)
}

pub(crate) async fn predict_handler(
    State(context): State<Arc<ScoringContext>>,
    payload: Result<axum::Json<ProfileSubmission>, JsonRejection>,
) -> Response {
    let axum::Json(submission) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "malformed prediction request");
            let payload = json!({
                "error": rejection.body_text(),
            });
            return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
        }
    };

    match context.evaluate_submission(submission) {
        Ok(result) => {
            info!(
                prediction = result.prediction,
                verdict = result.verdict.label(),
                "prediction served"
            );
            (StatusCode::OK, axum::Json(result.view())).into_response()
        }
        Err(error) => {
            warn!(%error, "prediction rejected");
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
    }
}
