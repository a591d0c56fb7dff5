use serde::Serialize;

use super::categories::CategoryMaps;
use super::domain::{ApplicantProfile, CategoryField, ExamType};

pub const FEATURE_COUNT: usize = 13;

/// Column order the forest was trained on. Changing it silently corrupts every
/// prediction, so artifacts record it and are rejected on mismatch.
pub const FEATURE_ORDER: [&str; FEATURE_COUNT] = [
    "degree_code",
    "work_experience_years",
    "cgpa",
    "sop",
    "lor",
    "research",
    "ielts",
    "toefl",
    "pte",
    "det",
    "gre",
    "exam_code",
    "country_code",
];

const EXAM_SLOT_OFFSET: usize = 6;

/// Ordered numeric features consumed by a [`Predictor`](super::Predictor).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn from_values(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }

    /// The five exam-score slots in `ielts, toefl, pte, det, gre` order.
    pub fn exam_slots(&self) -> [f64; 5] {
        let mut slots = [0.0; 5];
        slots.copy_from_slice(&self.0[EXAM_SLOT_OFFSET..EXAM_SLOT_OFFSET + 5]);
        slots
    }
}

/// Reasons a profile cannot be turned into model features.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EncodingError {
    #[error("Invalid {exam} score {score}. Allowed range: {min} to {max}")]
    InvalidScore {
        exam: ExamType,
        score: f64,
        min: f64,
        max: f64,
    },
    #[error("unknown {field} '{value}': not present in the trained category map")]
    UnknownCategory { field: CategoryField, value: String },
}

/// Validate the exam score, resolve category codes, and lay out the feature
/// vector in training order.
pub fn encode(
    profile: &ApplicantProfile,
    maps: &CategoryMaps,
) -> Result<FeatureVector, EncodingError> {
    let range = profile.exam_type.score_range();
    if !range.contains(profile.exam_score) {
        return Err(EncodingError::InvalidScore {
            exam: profile.exam_type,
            score: profile.exam_score,
            min: range.min,
            max: range.max,
        });
    }

    let degree_code = maps.code_for(profile.degree)?;
    let exam_code = maps.code_for(profile.exam_type)?;
    let country_code = maps.code_for(profile.country)?;

    let mut exam_slots = [0.0; 5];
    exam_slots[profile.exam_type.slot()] = profile.exam_score;
    let [ielts, toefl, pte, det, gre] = exam_slots;

    Ok(FeatureVector([
        f64::from(degree_code),
        f64::from(profile.work_experience_years),
        profile.cgpa,
        profile.sop,
        profile.lor,
        if profile.research { 1.0 } else { 0.0 },
        ielts,
        toefl,
        pte,
        det,
        gre,
        f64::from(exam_code),
        f64::from(country_code),
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admissions::domain::{Category, Country, Degree};

    fn profile(exam_type: ExamType, exam_score: f64) -> ApplicantProfile {
        ApplicantProfile {
            degree: Degree::Masters,
            exam_type,
            exam_score,
            work_experience_years: 2,
            cgpa: 8.5,
            sop: 4.0,
            lor: 4.0,
            research: true,
            internship: false,
            country: Country::Germany,
        }
    }

    #[test]
    fn exactly_one_exam_slot_carries_the_score() {
        let maps = CategoryMaps::standard();
        for exam in ExamType::ALL {
            let range = exam.score_range();
            for score in [range.min, (range.min + range.max) / 2.0, range.max] {
                let features = encode(&profile(*exam, score), &maps).expect("score in range");
                let slots = features.exam_slots();
                let populated: Vec<usize> = slots
                    .iter()
                    .enumerate()
                    .filter(|(_, value)| **value != 0.0)
                    .map(|(index, _)| index)
                    .collect();

                assert_eq!(slots[exam.slot()], score, "{exam} slot holds the score");
                for (index, value) in slots.iter().enumerate() {
                    if index != exam.slot() {
                        assert_eq!(*value, 0.0, "{exam} leaves slot {index} empty");
                    }
                }
                assert!(populated.len() <= 1);
            }
        }
    }

    #[test]
    fn features_follow_training_order() {
        let maps = CategoryMaps::standard();
        let features = encode(&profile(ExamType::Ielts, 7.0), &maps).expect("valid profile");

        assert_eq!(
            features.as_slice(),
            &[0.0, 2.0, 8.5, 4.0, 4.0, 1.0, 7.0, 0.0, 0.0, 0.0, 0.0, 2.0, 3.0]
        );
    }

    #[test]
    fn out_of_range_score_reports_allowed_range() {
        let maps = CategoryMaps::standard();

        match encode(&profile(ExamType::Pte, 200.0), &maps) {
            Err(EncodingError::InvalidScore {
                exam,
                score,
                min,
                max,
            }) => {
                assert_eq!(exam, ExamType::Pte);
                assert_eq!(score, 200.0);
                assert_eq!((min, max), (10.0, 90.0));
            }
            other => panic!("expected invalid score, got {other:?}"),
        }

        let message = encode(&profile(ExamType::Gre, 250.0), &maps)
            .expect_err("gre below range")
            .to_string();
        assert!(message.contains("GRE"));
        assert!(message.contains("260 to 340"));
    }

    #[test]
    fn score_is_validated_before_category_lookup() {
        let maps = CategoryMaps::from_labels(["Masters"], ["IELTS"], ["USA"]);

        let result = encode(&profile(ExamType::Ielts, 12.0), &maps);
        assert!(matches!(result, Err(EncodingError::InvalidScore { .. })));

        let result = encode(&profile(ExamType::Ielts, 7.0), &maps);
        assert!(matches!(
            result,
            Err(EncodingError::UnknownCategory {
                field: CategoryField::Country,
                ..
            })
        ));
    }
}
