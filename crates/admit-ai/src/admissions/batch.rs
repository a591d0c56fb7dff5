use std::io::Read;

use super::context::ScoringContext;
use super::domain::ProfileSubmission;
use super::encoder::EncodingError;
use super::scoring::PredictionResult;

/// Outcome for one CSV row; rows fail independently.
#[derive(Debug)]
pub struct BatchOutcome {
    /// 1-based data row number, excluding the header.
    pub row: usize,
    pub result: Result<PredictionResult, BatchRowError>,
}

#[derive(Debug, thiserror::Error)]
pub enum BatchRowError {
    #[error("malformed row: {0}")]
    Malformed(#[from] csv::Error),
    #[error(transparent)]
    Encoding(#[from] EncodingError),
}

/// Score every applicant in a CSV export whose headers match the request
/// fields (`degree, exam_type, exam_score, work_exp, cgpa, sop, lor,
/// research, internship, country`).
pub fn score_csv<R: Read>(
    context: &ScoringContext,
    reader: R,
) -> Result<Vec<BatchOutcome>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    // Fail the whole batch only when the header itself is unreadable.
    csv_reader.headers()?;

    let outcomes = csv_reader
        .deserialize::<ProfileSubmission>()
        .enumerate()
        .map(|(index, record)| BatchOutcome {
            row: index + 1,
            result: record
                .map_err(BatchRowError::from)
                .and_then(|submission| {
                    context
                        .evaluate_submission(submission)
                        .map_err(BatchRowError::from)
                }),
        })
        .collect();

    Ok(outcomes)
}
