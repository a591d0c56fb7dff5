use std::fmt;

use serde::{de, Deserialize, Deserializer, Serialize};

use super::encoder::EncodingError;

/// Categorical inputs the trained model consumes as integer codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryField {
    Degree,
    ExamType,
    Country,
}

impl CategoryField {
    pub const fn label(self) -> &'static str {
        match self {
            CategoryField::Degree => "degree",
            CategoryField::ExamType => "exam_type",
            CategoryField::Country => "country",
        }
    }
}

impl fmt::Display for CategoryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Closed set of user-facing options backed by a trained category map.
pub trait Category: Copy + Eq + 'static {
    const FIELD: CategoryField;
    const ALL: &'static [Self];

    /// Label used in the training dataset and the category maps.
    fn label(self) -> &'static str;

    fn parse_label(raw: &str) -> Option<Self> {
        match_label(raw.trim())
    }
}

fn match_label<C: Category>(raw: &str) -> Option<C> {
    C::ALL
        .iter()
        .copied()
        .find(|candidate| candidate.label().eq_ignore_ascii_case(raw))
}

/// Degree level the applicant is targeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Degree {
    Undergraduate,
    Masters,
    PhD,
}

impl Category for Degree {
    const FIELD: CategoryField = CategoryField::Degree;
    const ALL: &'static [Self] = &[Degree::Undergraduate, Degree::Masters, Degree::PhD];

    fn label(self) -> &'static str {
        match self {
            Degree::Undergraduate => "Undergraduate",
            Degree::Masters => "Masters",
            Degree::PhD => "PhD",
        }
    }
}

/// Inclusive bounds of a valid exam score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreRange {
    pub min: f64,
    pub max: f64,
}

impl ScoreRange {
    pub fn contains(&self, score: f64) -> bool {
        score.is_finite() && score >= self.min && score <= self.max
    }

    /// Position of `score` inside the range, 0.0 at `min` and 1.0 at `max`.
    pub fn fraction(&self, score: f64) -> f64 {
        let span = self.max - self.min;
        if span > 0.0 {
            (score - self.min) / span
        } else {
            0.0
        }
    }
}

/// Standardised test submitted with the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ExamType {
    Ielts,
    Toefl,
    Pte,
    Det,
    Gre,
}

impl ExamType {
    pub const fn score_range(self) -> ScoreRange {
        match self {
            ExamType::Ielts => ScoreRange { min: 0.0, max: 9.0 },
            ExamType::Toefl => ScoreRange {
                min: 0.0,
                max: 120.0,
            },
            ExamType::Pte => ScoreRange {
                min: 10.0,
                max: 90.0,
            },
            ExamType::Det => ScoreRange {
                min: 10.0,
                max: 160.0,
            },
            ExamType::Gre => ScoreRange {
                min: 260.0,
                max: 340.0,
            },
        }
    }

    /// Index of this exam among the five exam-score feature slots.
    pub const fn slot(self) -> usize {
        match self {
            ExamType::Ielts => 0,
            ExamType::Toefl => 1,
            ExamType::Pte => 2,
            ExamType::Det => 3,
            ExamType::Gre => 4,
        }
    }

    pub const fn is_language_test(self) -> bool {
        !matches!(self, ExamType::Gre)
    }
}

impl Category for ExamType {
    const FIELD: CategoryField = CategoryField::ExamType;
    const ALL: &'static [Self] = &[
        ExamType::Ielts,
        ExamType::Toefl,
        ExamType::Pte,
        ExamType::Det,
        ExamType::Gre,
    ];

    fn label(self) -> &'static str {
        match self {
            ExamType::Ielts => "IELTS",
            ExamType::Toefl => "TOEFL",
            ExamType::Pte => "PTE",
            ExamType::Det => "DET",
            ExamType::Gre => "GRE",
        }
    }
}

impl fmt::Display for ExamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Destination countries known to the predictor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Country {
    Australia,
    Canada,
    France,
    Germany,
    Ireland,
    Netherlands,
    #[serde(rename = "New Zealand")]
    NewZealand,
    Singapore,
    Sweden,
    Switzerland,
    #[serde(rename = "UAE")]
    Uae,
    #[serde(rename = "UK")]
    Uk,
    #[serde(rename = "USA")]
    Usa,
}

impl Country {
    /// ISO 3166-1 alpha-2 code, lowercase.
    pub const fn iso_code(self) -> &'static str {
        match self {
            Country::Australia => "au",
            Country::Canada => "ca",
            Country::France => "fr",
            Country::Germany => "de",
            Country::Ireland => "ie",
            Country::Netherlands => "nl",
            Country::NewZealand => "nz",
            Country::Singapore => "sg",
            Country::Sweden => "se",
            Country::Switzerland => "ch",
            Country::Uae => "ae",
            Country::Uk => "gb",
            Country::Usa => "us",
        }
    }
}

impl Category for Country {
    const FIELD: CategoryField = CategoryField::Country;
    const ALL: &'static [Self] = &[
        Country::Australia,
        Country::Canada,
        Country::France,
        Country::Germany,
        Country::Ireland,
        Country::Netherlands,
        Country::NewZealand,
        Country::Singapore,
        Country::Sweden,
        Country::Switzerland,
        Country::Uae,
        Country::Uk,
        Country::Usa,
    ];

    fn label(self) -> &'static str {
        match self {
            Country::Australia => "Australia",
            Country::Canada => "Canada",
            Country::France => "France",
            Country::Germany => "Germany",
            Country::Ireland => "Ireland",
            Country::Netherlands => "Netherlands",
            Country::NewZealand => "New Zealand",
            Country::Singapore => "Singapore",
            Country::Sweden => "Sweden",
            Country::Switzerland => "Switzerland",
            Country::Uae => "UAE",
            Country::Uk => "UK",
            Country::Usa => "USA",
        }
    }

    // Dropdown labels carry a flag prefix such as "🇩🇪 Germany".
    fn parse_label(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        match_label(trimmed).or_else(|| {
            let (prefix, rest) = trimmed.split_once(char::is_whitespace)?;
            if prefix.chars().any(char::is_alphanumeric) {
                return None;
            }
            match_label(rest.trim())
        })
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Validated applicant inputs for a single prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantProfile {
    pub degree: Degree,
    pub exam_type: ExamType,
    pub exam_score: f64,
    pub work_experience_years: u32,
    pub cgpa: f64,
    pub sop: f64,
    pub lor: f64,
    pub research: bool,
    #[serde(default)]
    pub internship: bool,
    pub country: Country,
}

/// Raw request payload as submitted by a form, API client, or CSV row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSubmission {
    pub degree: String,
    pub exam_type: String,
    pub exam_score: f64,
    pub work_exp: u32,
    pub cgpa: f64,
    pub sop: f64,
    pub lor: f64,
    #[serde(deserialize_with = "deserialize_flag")]
    pub research: bool,
    #[serde(default, deserialize_with = "deserialize_optional_flag")]
    pub internship: bool,
    pub country: String,
}

impl TryFrom<ProfileSubmission> for ApplicantProfile {
    type Error = EncodingError;

    fn try_from(submission: ProfileSubmission) -> Result<Self, Self::Error> {
        Ok(Self {
            degree: parse_category(&submission.degree)?,
            exam_type: parse_category(&submission.exam_type)?,
            exam_score: submission.exam_score,
            work_experience_years: submission.work_exp,
            cgpa: submission.cgpa,
            sop: submission.sop,
            lor: submission.lor,
            research: submission.research,
            internship: submission.internship,
            country: parse_category(&submission.country)?,
        })
    }
}

fn parse_category<C: Category>(raw: &str) -> Result<C, EncodingError> {
    C::parse_label(raw).ok_or_else(|| EncodingError::UnknownCategory {
        field: C::FIELD,
        value: raw.trim().to_string(),
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FlagRepr {
    Bool(bool),
    Number(u64),
    Text(String),
}

/// Accepts `0`/`1`, booleans, and their string spellings.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    flag_from_repr(FlagRepr::deserialize(deserializer)?, None)
}

/// Like [`deserialize_flag`], but a blank value (an empty CSV cell) reads as
/// `false`.
fn deserialize_optional_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    flag_from_repr(FlagRepr::deserialize(deserializer)?, Some(false))
}

fn flag_from_repr<E: de::Error>(repr: FlagRepr, blank: Option<bool>) -> Result<bool, E> {
    match repr {
        FlagRepr::Bool(value) => Ok(value),
        FlagRepr::Number(0) => Ok(false),
        FlagRepr::Number(1) => Ok(true),
        FlagRepr::Number(other) => Err(E::custom(format!("expected 0 or 1, found {other}"))),
        FlagRepr::Text(text) => match (text.trim().to_ascii_lowercase().as_str(), blank) {
            ("", Some(value)) => Ok(value),
            ("0" | "false" | "no", _) => Ok(false),
            ("1" | "true" | "yes", _) => Ok(true),
            (other, _) => Err(E::custom(format!(
                "expected 0, 1, true or false, found '{other}'"
            ))),
        },
    }
}
