use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::scoring::{DimensionValue, PredictionResult};

/// JSON body returned to API clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionView {
    pub prediction: f64,
    pub verdict: &'static str,
    pub bar_color: &'static str,
    pub scorecard: ScorecardSummary,
    pub tips: Vec<&'static str>,
    /// Empty when the exam suits the destination.
    pub fit_warning: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScorecardView {
    pub value: DimensionValue,
    pub rating: &'static str,
}

/// Scorecard keyed by dimension label, serialized as a JSON object in
/// display order (CGPA, SOP, LOR, Work Exp, Research, Internship).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScorecardSummary {
    entries: Vec<(&'static str, ScorecardView)>,
}

impl ScorecardSummary {
    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(label, _)| *label)
    }

    pub fn get(&self, label: &str) -> Option<&ScorecardView> {
        self.entries
            .iter()
            .find(|(candidate, _)| *candidate == label)
            .map(|(_, view)| view)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(&'static str, ScorecardView)> for ScorecardSummary {
    fn from_iter<I: IntoIterator<Item = (&'static str, ScorecardView)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Serialize for ScorecardSummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, view) in &self.entries {
            map.serialize_entry(label, view)?;
        }
        map.end()
    }
}

impl PredictionResult {
    pub fn view(&self) -> PredictionView {
        PredictionView {
            prediction: self.prediction,
            verdict: self.verdict.label(),
            bar_color: self.verdict.bar_color(),
            scorecard: self
                .scorecard
                .iter()
                .map(|entry| {
                    (
                        entry.dimension.label(),
                        ScorecardView {
                            value: entry.value,
                            rating: entry.rating.label(),
                        },
                    )
                })
                .collect(),
            tips: self.tips.iter().map(|tip| tip.message()).collect(),
            fit_warning: self
                .fit_warning
                .map(|warning| warning.message())
                .unwrap_or_default(),
        }
    }
}
