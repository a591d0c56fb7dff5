use serde::Serialize;

use super::super::domain::ApplicantProfile;

/// Academic dimensions rated on the profile scorecard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScorecardDimension {
    Cgpa,
    Sop,
    Lor,
    WorkExperience,
    Research,
    Internship,
}

impl ScorecardDimension {
    pub const fn label(self) -> &'static str {
        match self {
            ScorecardDimension::Cgpa => "CGPA",
            ScorecardDimension::Sop => "SOP",
            ScorecardDimension::Lor => "LOR",
            ScorecardDimension::WorkExperience => "Work Exp",
            ScorecardDimension::Research => "Research",
            ScorecardDimension::Internship => "Internship",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Rating {
    Strong,
    Average,
    Weak,
}

impl Rating {
    fn graded(value: f64, strong: f64, average: f64) -> Self {
        if value >= strong {
            Rating::Strong
        } else if value >= average {
            Rating::Average
        } else {
            Rating::Weak
        }
    }

    fn binary(present: bool) -> Self {
        if present {
            Rating::Strong
        } else {
            Rating::Weak
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Rating::Strong => "Strong",
            Rating::Average => "Average",
            Rating::Weak => "Weak",
        }
    }
}

/// Raw value shown next to a scorecard rating.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DimensionValue {
    Decimal(f64),
    Years(u32),
    Flag(bool),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScorecardEntry {
    pub dimension: ScorecardDimension,
    pub value: DimensionValue,
    pub rating: Rating,
}

/// Rule-based improvement advice, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tip {
    LowCgpa,
    WeakSop,
    WeakLor,
    NoResearch,
    NoExperience,
    InternshipCounted,
    ReachSchools,
}

impl Tip {
    pub const fn message(self) -> &'static str {
        match self {
            Tip::LowCgpa => {
                "CGPA below 7.0: address the gap in your SOP and highlight strong final-year grades."
            }
            Tip::WeakSop => {
                "Weak SOP: focus on 'why this program', specific goals, and the unique value you bring."
            }
            Tip::WeakLor => {
                "Weak LOR: choose recommenders who know your work well, not just senior titles."
            }
            Tip::NoResearch => {
                "No research: a short assistantship or paper significantly boosts top-school admits."
            }
            Tip::NoExperience => {
                "No work/internship experience: even short internships or projects strengthen Masters applications."
            }
            Tip::InternshipCounted => {
                "Good, internship/project counted. Full-time experience further strengthens competitive programs."
            }
            Tip::ReachSchools => {
                "Strong profile: consider applying to reach/top-ranked schools in your target country."
            }
        }
    }
}

pub(crate) fn build_scorecard(profile: &ApplicantProfile) -> Vec<ScorecardEntry> {
    let work_years = profile.work_experience_years;

    vec![
        ScorecardEntry {
            dimension: ScorecardDimension::Cgpa,
            value: DimensionValue::Decimal(profile.cgpa),
            rating: Rating::graded(profile.cgpa, 8.0, 7.0),
        },
        ScorecardEntry {
            dimension: ScorecardDimension::Sop,
            value: DimensionValue::Decimal(profile.sop),
            rating: Rating::graded(profile.sop, 4.5, 3.0),
        },
        ScorecardEntry {
            dimension: ScorecardDimension::Lor,
            value: DimensionValue::Decimal(profile.lor),
            rating: Rating::graded(profile.lor, 4.5, 3.0),
        },
        ScorecardEntry {
            dimension: ScorecardDimension::WorkExperience,
            value: DimensionValue::Years(work_years),
            rating: Rating::graded(f64::from(work_years), 4.0, 2.0),
        },
        ScorecardEntry {
            dimension: ScorecardDimension::Research,
            value: DimensionValue::Flag(profile.research),
            rating: Rating::binary(profile.research),
        },
        ScorecardEntry {
            dimension: ScorecardDimension::Internship,
            value: DimensionValue::Flag(profile.internship),
            rating: Rating::binary(profile.internship),
        },
    ]
}

pub(crate) fn collect_tips(profile: &ApplicantProfile) -> Vec<Tip> {
    let mut tips = Vec::new();
    let no_work = profile.work_experience_years == 0;

    if profile.cgpa < 7.0 {
        tips.push(Tip::LowCgpa);
    }
    if profile.sop < 3.0 {
        tips.push(Tip::WeakSop);
    }
    if profile.lor < 3.0 {
        tips.push(Tip::WeakLor);
    }
    if !profile.research {
        tips.push(Tip::NoResearch);
    }
    if no_work && !profile.internship {
        tips.push(Tip::NoExperience);
    }
    if no_work && profile.internship {
        tips.push(Tip::InternshipCounted);
    }
    if !no_work && profile.cgpa >= 8.0 && profile.research {
        tips.push(Tip::ReachSchools);
    }

    tips
}
