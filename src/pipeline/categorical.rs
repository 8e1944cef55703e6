//! Categorical standardization
//!
//! Collapses free-form labels onto the canonical label sets and decodes
//! textual score indicators into numbers. Unknown values never raise: gender
//! falls back to `Other`, flags to `No`, housing labels to the neutral score,
//! and unrecognized score text to missing.

use std::fmt;

use anyhow::Result;
use polars::prelude::*;

use super::schema::{CanonicalField, NEUTRAL_SCORE};
use super::values::{has_column, is_text_column, parse_number, set_numeric, set_text, text_values};

/// Canonical gender label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// Known gender spellings, matched after trimming
const GENDER_LABELS: &[(&str, Gender)] = &[
    ("male", Gender::Male),
    ("Male", Gender::Male),
    ("M", Gender::Male),
    ("m", Gender::Male),
    ("female", Gender::Female),
    ("Female", Gender::Female),
    ("F", Gender::Female),
    ("f", Gender::Female),
    ("other", Gender::Other),
    ("Other", Gender::Other),
    ("non-binary", Gender::Other),
    ("prefer not to say", Gender::Other),
    ("Prefer not to say", Gender::Other),
];

impl Gender {
    /// Map a raw label; anything not in the table (including missing) is `Other`
    pub fn from_label(label: Option<&str>) -> Gender {
        let Some(label) = label else {
            return Gender::Other;
        };
        let trimmed = label.trim();
        GENDER_LABELS
            .iter()
            .find(|(known, _)| *known == trimmed)
            .map(|(_, gender)| *gender)
            .unwrap_or(Gender::Other)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical value of a behavioral flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum YesNo {
    Yes,
    No,
}

/// Case-insensitive spellings read as `Yes`
const TRUTHY: [&str; 4] = ["yes", "y", "true", "1"];

impl YesNo {
    /// Truthy spellings become `Yes`; everything else, including missing, is `No`
    pub fn from_flag(value: Option<&str>) -> YesNo {
        match value {
            Some(v) if TRUTHY.iter().any(|t| v.trim().eq_ignore_ascii_case(t)) => YesNo::Yes,
            _ => YesNo::No,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            YesNo::Yes => "Yes",
            YesNo::No => "No",
        }
    }
}

impl fmt::Display for YesNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Housing type labels and the satisfaction score they stand for
const HOUSING_SCORES: &[(&str, f64)] = &[
    ("On-Campus", 4.0),
    ("Off-Campus", 3.0),
    ("Home", 3.0),
    ("With Family", 4.0),
    ("Alone", 2.0),
];

/// Satisfaction score for a housing label, neutral for anything unknown
pub fn housing_score(label: Option<&str>) -> f64 {
    label
        .and_then(|l| {
            let trimmed = l.trim();
            HOUSING_SCORES
                .iter()
                .find(|(known, _)| *known == trimmed)
                .map(|(_, score)| *score)
        })
        .unwrap_or(NEUTRAL_SCORE)
}

/// Numeric proxy for a textual indicator: yes 5, no 1, numeric text as-is
pub fn indicator_score(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.eq_ignore_ascii_case("yes") {
        Some(5.0)
    } else if trimmed.eq_ignore_ascii_case("no") {
        Some(1.0)
    } else {
        parse_number(trimmed)
    }
}

/// Decode score fields that arrived as text into numbers.
///
/// Runs before scale normalization, whose numeric coercion would otherwise
/// turn every Yes/No indicator into a missing value. Returns the fields that
/// were decoded.
pub fn decode_text_scores(df: &mut DataFrame) -> Result<Vec<CanonicalField>> {
    let mut decoded = Vec::new();

    for field in CanonicalField::SCORES {
        let name = field.name();
        if !has_column(df, name) || !is_text_column(df, name)? {
            continue;
        }

        let raw = text_values(df, name)?;
        let values: Vec<Option<f64>> = if field == CanonicalField::AccommodationSatisfaction {
            raw.iter().map(|v| Some(housing_score(v.as_deref()))).collect()
        } else {
            raw.iter()
                .map(|v| v.as_deref().and_then(indicator_score))
                .collect()
        };

        log::debug!("Decoded textual values in {}", name);
        set_numeric(df, name, values)?;
        decoded.push(field);
    }

    Ok(decoded)
}

/// Standardize gender and the two behavioral flags in place
pub fn standardize_labels(df: &mut DataFrame) -> Result<()> {
    if has_column(df, CanonicalField::Gender.name()) {
        let values = text_values(df, CanonicalField::Gender.name())?
            .iter()
            .map(|v| Some(Gender::from_label(v.as_deref()).as_str().to_string()))
            .collect();
        set_text(df, CanonicalField::Gender.name(), values)?;
    }

    for field in [CanonicalField::SeeksCounseling, CanonicalField::AwareOfServices] {
        if !has_column(df, field.name()) {
            continue;
        }
        let values = text_values(df, field.name())?
            .iter()
            .map(|v| Some(YesNo::from_flag(v.as_deref()).as_str().to_string()))
            .collect();
        set_text(df, field.name(), values)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::values::numeric_values;

    #[test]
    fn test_gender_table_and_fallback() {
        assert_eq!(Gender::from_label(Some(" M ")), Gender::Male);
        assert_eq!(Gender::from_label(Some("female")), Gender::Female);
        assert_eq!(Gender::from_label(Some("non-binary")), Gender::Other);
        assert_eq!(Gender::from_label(Some("MALE")), Gender::Other);
        assert_eq!(Gender::from_label(Some("")), Gender::Other);
        assert_eq!(Gender::from_label(None), Gender::Other);
    }

    #[test]
    fn test_flags() {
        let inputs = [Some("Y"), Some("no"), Some("1"), Some(""), Some("TRUE"), None, Some("maybe")];
        let mapped: Vec<&str> = inputs
            .iter()
            .map(|v| YesNo::from_flag(*v).as_str())
            .collect();
        assert_eq!(mapped, vec!["Yes", "No", "Yes", "No", "Yes", "No", "No"]);
    }

    #[test]
    fn test_housing_scores() {
        assert_eq!(housing_score(Some("On-Campus")), 4.0);
        assert_eq!(housing_score(Some(" Alone ")), 2.0);
        assert_eq!(housing_score(Some("Tent")), 3.0);
        assert_eq!(housing_score(None), 3.0);
    }

    #[test]
    fn test_decode_yes_no_indicators() {
        let mut df = df! {
            "depression_score" => [Some("Yes"), Some("No"), Some("maybe"), None],
            "stress_level" => [Some(4i64), Some(2), None, Some(1)],
        }
        .unwrap();

        let decoded = decode_text_scores(&mut df).unwrap();

        assert_eq!(decoded, vec![CanonicalField::DepressionScore]);
        assert_eq!(
            numeric_values(&df, "depression_score").unwrap(),
            vec![Some(5.0), Some(1.0), None, None]
        );
        assert_eq!(df.column("stress_level").unwrap().dtype(), &DataType::Int64);
    }

    #[test]
    fn test_decode_housing_labels() {
        let mut df = df! {
            "accommodation_satisfaction" => [Some("With Family"), Some("Dorm"), None],
        }
        .unwrap();

        decode_text_scores(&mut df).unwrap();

        assert_eq!(
            numeric_values(&df, "accommodation_satisfaction").unwrap(),
            vec![Some(4.0), Some(3.0), Some(3.0)]
        );
    }

    #[test]
    fn test_standardize_labels() {
        let mut df = df! {
            "gender" => [Some("m"), Some("F"), Some("robot"), None],
            "seeks_counseling" => [Some("Y"), Some("no"), Some("1"), Some("")],
            "aware_of_services" => [1i64, 0, 1, 0],
        }
        .unwrap();

        standardize_labels(&mut df).unwrap();

        let gender = text_values(&df, "gender").unwrap();
        assert_eq!(
            gender,
            vec![
                Some("Male".to_string()),
                Some("Female".to_string()),
                Some("Other".to_string()),
                Some("Other".to_string())
            ]
        );
        let counseling = text_values(&df, "seeks_counseling").unwrap();
        assert_eq!(
            counseling,
            vec![
                Some("Yes".to_string()),
                Some("No".to_string()),
                Some("Yes".to_string()),
                Some("No".to_string())
            ]
        );
        let aware = text_values(&df, "aware_of_services").unwrap();
        assert_eq!(aware[0].as_deref(), Some("Yes"));
        assert_eq!(aware[1].as_deref(), Some("No"));
    }
}
