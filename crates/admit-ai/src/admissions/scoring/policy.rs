use serde::Serialize;

use super::super::domain::{ApplicantProfile, Country, ExamType};
use super::config::ScoringPolicy;

const STRONG_ADMIT_FLOOR: f64 = 70.0;
const MODERATE_CHANCE_FLOOR: f64 = 45.0;

const EU_COUNTRIES: [Country; 5] = [
    Country::France,
    Country::Germany,
    Country::Netherlands,
    Country::Sweden,
    Country::Switzerland,
];

const GRE_EXPECTING_COUNTRIES: [Country; 4] = [
    Country::Usa,
    Country::Canada,
    Country::Singapore,
    Country::Australia,
];

/// Tiered reading of the final admit percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    StrongAdmit,
    ModerateChance,
    LowChance,
}

impl Verdict {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= STRONG_ADMIT_FLOOR {
            Verdict::StrongAdmit
        } else if percentage >= MODERATE_CHANCE_FLOOR {
            Verdict::ModerateChance
        } else {
            Verdict::LowChance
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Verdict::StrongAdmit => "Strong Admit",
            Verdict::ModerateChance => "Moderate Chance",
            Verdict::LowChance => "Low Chance",
        }
    }

    pub const fn bar_color(self) -> &'static str {
        match self {
            Verdict::StrongAdmit => "#22c55e",
            Verdict::ModerateChance => "#f59e0b",
            Verdict::LowChance => "#ef4444",
        }
    }
}

/// Advisory raised when the chosen exam does not match destination norms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "country", rename_all = "snake_case")]
pub enum FitWarning {
    GreNotRequired(Country),
    GreExpected(Country),
}

impl FitWarning {
    pub fn message(self) -> String {
        match self {
            FitWarning::GreNotRequired(country) => format!(
                "Most EU universities don't require GRE. Consider adding IELTS/TOEFL for {country}."
            ),
            FitWarning::GreExpected(country) => format!(
                "Many top programs in {country} expect GRE alongside a language test. Check requirements."
            ),
        }
    }
}

pub(crate) fn check_fit(exam_type: ExamType, country: Country) -> Option<FitWarning> {
    if exam_type == ExamType::Gre && EU_COUNTRIES.contains(&country) {
        return Some(FitWarning::GreNotRequired(country));
    }

    if exam_type.is_language_test() && GRE_EXPECTING_COUNTRIES.contains(&country) {
        return Some(FitWarning::GreExpected(country));
    }

    None
}

/// Percentage points to deduct for a valid but very low exam score.
pub(crate) fn low_score_penalty(profile: &ApplicantProfile, policy: &ScoringPolicy) -> f64 {
    if !policy.apply_low_score_penalty {
        return 0.0;
    }

    let exam_percent = profile
        .exam_type
        .score_range()
        .fraction(profile.exam_score)
        .clamp(0.0, 1.0);

    if exam_percent < policy.low_score_threshold {
        (policy.low_score_threshold - exam_percent) * 100.0 * policy.penalty_multiplier
    } else {
        0.0
    }
}

/// Two decimals, exact halves to the even cent.
pub(crate) fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verdict_boundaries_are_exact() {
        assert_eq!(Verdict::from_percentage(70.0), Verdict::StrongAdmit);
        assert_eq!(Verdict::from_percentage(69.99), Verdict::ModerateChance);
        assert_eq!(Verdict::from_percentage(45.0), Verdict::ModerateChance);
        assert_eq!(Verdict::from_percentage(44.99), Verdict::LowChance);
        assert_eq!(Verdict::from_percentage(0.0), Verdict::LowChance);
        assert_eq!(Verdict::from_percentage(100.0), Verdict::StrongAdmit);
    }

    #[test]
    fn eu_warning_takes_priority_for_gre() {
        assert_eq!(
            check_fit(ExamType::Gre, Country::Germany),
            Some(FitWarning::GreNotRequired(Country::Germany))
        );
        assert_eq!(check_fit(ExamType::Gre, Country::Usa), None);
        assert_eq!(
            check_fit(ExamType::Det, Country::Singapore),
            Some(FitWarning::GreExpected(Country::Singapore))
        );
        assert_eq!(check_fit(ExamType::Ielts, Country::Uk), None);
        assert_eq!(check_fit(ExamType::Toefl, Country::Uae), None);
    }

    #[test]
    fn fit_messages_name_the_country() {
        let message = FitWarning::GreNotRequired(Country::Sweden).message();
        assert!(message.contains("EU"));
        assert!(message.contains("Sweden"));

        let message = FitWarning::GreExpected(Country::Canada).message();
        assert!(message.contains("GRE"));
        assert!(message.contains("Canada"));
    }

    #[test]
    fn rounding_keeps_two_decimals() {
        assert_eq!(round_to_cents(69.994), 69.99);
        assert_eq!(round_to_cents(69.996), 70.0);
        assert_eq!(round_to_cents(0.7 * 100.0), 70.0);
    }

    #[test]
    fn exact_halves_round_to_the_even_cent() {
        assert_eq!(round_to_cents(72.125), 72.12);
        assert_eq!(round_to_cents(72.375), 72.38);
        assert_eq!(round_to_cents(0.125), 0.12);
    }
}
