use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::domain::{Category, CategoryField, Country, Degree, ExamType};
use super::encoder::EncodingError;

/// Label-to-code tables the model was trained with.
///
/// Codes are only meaningful together with the forest they were fitted
/// alongside, so the maps travel inside the model artifact and are never
/// rebuilt at inference time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryMaps {
    pub degree: BTreeMap<String, u32>,
    pub exam: BTreeMap<String, u32>,
    pub country: BTreeMap<String, u32>,
}

impl CategoryMaps {
    /// Assign codes by sorted label order, the way the training job enumerates
    /// dataset categories.
    pub fn from_labels<'a>(
        degrees: impl IntoIterator<Item = &'a str>,
        exams: impl IntoIterator<Item = &'a str>,
        countries: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        Self {
            degree: sorted_codes(degrees),
            exam: sorted_codes(exams),
            country: sorted_codes(countries),
        }
    }

    /// Maps covering every known degree, exam, and country.
    pub fn standard() -> Self {
        Self::from_labels(
            Degree::ALL.iter().map(|degree| degree.label()),
            ExamType::ALL.iter().map(|exam| exam.label()),
            Country::ALL.iter().map(|country| country.label()),
        )
    }

    pub fn table(&self, field: CategoryField) -> &BTreeMap<String, u32> {
        match field {
            CategoryField::Degree => &self.degree,
            CategoryField::ExamType => &self.exam,
            CategoryField::Country => &self.country,
        }
    }

    pub fn code_for<C: Category>(&self, value: C) -> Result<u32, EncodingError> {
        self.table(C::FIELD)
            .get(value.label())
            .copied()
            .ok_or_else(|| EncodingError::UnknownCategory {
                field: C::FIELD,
                value: value.label().to_string(),
            })
    }

    pub fn contains<C: Category>(&self, value: C) -> bool {
        self.table(C::FIELD).contains_key(value.label())
    }

    /// Known options of `C` the trained maps cannot encode.
    pub fn missing<C: Category>(&self) -> Vec<C> {
        C::ALL
            .iter()
            .copied()
            .filter(|value| !self.contains(*value))
            .collect()
    }

    /// First code shared by two labels in the same table, if any.
    pub(crate) fn duplicate_code(&self) -> Option<(CategoryField, u32)> {
        [
            CategoryField::Degree,
            CategoryField::ExamType,
            CategoryField::Country,
        ]
        .into_iter()
        .find_map(|field| {
            let mut seen = BTreeSet::new();
            self.table(field)
                .values()
                .find(|code| !seen.insert(**code))
                .map(|code| (field, *code))
        })
    }
}

fn sorted_codes<'a>(labels: impl IntoIterator<Item = &'a str>) -> BTreeMap<String, u32> {
    let unique: BTreeSet<&str> = labels.into_iter().collect();
    unique
        .into_iter()
        .zip(0u32..)
        .map(|(label, code)| (label.to_string(), code))
        .collect()
}
