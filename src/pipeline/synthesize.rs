//! Missing-field synthesis
//!
//! Fills every canonical field a source does not supply at all, so each
//! per-source table carries the full schema before merge. Scores default to
//! the neutral midpoint; wholly absent demographics get plausible random
//! values from the run's seeded generator.

use anyhow::Result;
use polars::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::categorical::{Gender, YesNo};
use super::schema::{CanonicalField, FieldKind, NEUTRAL_SCORE};
use super::values::{has_column, set_numeric, set_text};

/// Default injected for an absent field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldDefault {
    /// Uniform integer age in [18, 26)
    RandomAge,
    /// Uniform year of study in {1, 2, 3, 4}
    RandomYear,
    /// Uniform CGPA in [2.5, 3.5), two decimals
    RandomCgpa,
    /// The same number on every row
    Constant(f64),
    /// The same label on every row
    Label(&'static str),
}

/// Default for an absent source field
pub fn field_default(field: CanonicalField) -> FieldDefault {
    match field {
        CanonicalField::Age => FieldDefault::RandomAge,
        CanonicalField::YearOfStudy => FieldDefault::RandomYear,
        CanonicalField::Cgpa => FieldDefault::RandomCgpa,
        CanonicalField::Gender => FieldDefault::Label(Gender::Other.as_str()),
        CanonicalField::SeeksCounseling => FieldDefault::Label(YesNo::No.as_str()),
        CanonicalField::AwareOfServices => FieldDefault::Label(YesNo::Yes.as_str()),
        _ => FieldDefault::Constant(NEUTRAL_SCORE),
    }
}

/// The run's random generator, seeded once at pipeline start
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

fn random_cgpa<R: Rng>(rng: &mut R) -> f64 {
    (rng.gen_range(2.5..3.5) * 100.0_f64).round() / 100.0
}

/// Add every absent source field with its default.
///
/// `rows` is the source's row count; it is passed explicitly because a source
/// with no recognized columns reconciles to a zero-width frame.
/// Returns the fields that were added.
pub fn synthesize_missing_fields<R: Rng>(
    df: &mut DataFrame,
    rows: usize,
    rng: &mut R,
) -> Result<Vec<CanonicalField>> {
    let mut added = Vec::new();

    for field in CanonicalField::source_fields() {
        if has_column(df, field.name()) {
            continue;
        }

        match field_default(field) {
            FieldDefault::RandomAge => {
                let values = (0..rows)
                    .map(|_| Some(f64::from(rng.gen_range(18u8..26))))
                    .collect();
                set_numeric(df, field.name(), values)?;
            }
            FieldDefault::RandomYear => {
                let values = (0..rows)
                    .map(|_| Some(f64::from(rng.gen_range(1u8..=4))))
                    .collect();
                set_numeric(df, field.name(), values)?;
            }
            FieldDefault::RandomCgpa => {
                let values = (0..rows).map(|_| Some(random_cgpa(rng))).collect();
                set_numeric(df, field.name(), values)?;
            }
            FieldDefault::Constant(v) => {
                debug_assert!(field.kind() == FieldKind::Score);
                set_numeric(df, field.name(), vec![Some(v); rows])?;
            }
            FieldDefault::Label(label) => {
                set_text(df, field.name(), vec![Some(label.to_string()); rows])?;
            }
        }
        added.push(field);
    }

    if !added.is_empty() {
        log::debug!(
            "Added missing columns with default values: {}",
            added.iter().map(|f| f.name()).collect::<Vec<_>>().join(", ")
        );
    }

    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::values::{numeric_values, text_values};

    #[test]
    fn test_defaults_by_field() {
        assert_eq!(field_default(CanonicalField::Age), FieldDefault::RandomAge);
        assert_eq!(field_default(CanonicalField::Gender), FieldDefault::Label("Other"));
        assert_eq!(field_default(CanonicalField::SeeksCounseling), FieldDefault::Label("No"));
        assert_eq!(field_default(CanonicalField::AwareOfServices), FieldDefault::Label("Yes"));
        assert_eq!(
            field_default(CanonicalField::CareerConcerns),
            FieldDefault::Constant(3.0)
        );
    }

    #[test]
    fn test_fills_full_schema_from_empty_frame() {
        let mut df = DataFrame::empty();
        let mut rng = seeded_rng(42);

        let added = synthesize_missing_fields(&mut df, 6, &mut rng).unwrap();

        assert_eq!(added.len(), 20);
        assert_eq!(df.height(), 6);
        assert_eq!(df.width(), 20);

        for age in numeric_values(&df, "age").unwrap() {
            let age = age.unwrap();
            assert!((18.0..26.0).contains(&age) && age.fract() == 0.0);
        }
        for year in numeric_values(&df, "year_of_study").unwrap() {
            assert!([1.0, 2.0, 3.0, 4.0].contains(&year.unwrap()));
        }
        for cgpa in numeric_values(&df, "cgpa").unwrap() {
            let cgpa = cgpa.unwrap();
            assert!((2.5..=3.5).contains(&cgpa));
            assert!(((cgpa * 100.0).round() - cgpa * 100.0).abs() < 1e-9);
        }
        assert!(numeric_values(&df, "sleep_quality")
            .unwrap()
            .iter()
            .all(|v| *v == Some(3.0)));
        assert!(text_values(&df, "gender")
            .unwrap()
            .iter()
            .all(|v| v.as_deref() == Some("Other")));
    }

    #[test]
    fn test_existing_columns_untouched() {
        let mut df = df! {
            "gender" => [Some("Male"), None],
            "depression_score" => [Some(2.0f64), None],
        }
        .unwrap();
        let mut rng = seeded_rng(7);

        let added = synthesize_missing_fields(&mut df, 2, &mut rng).unwrap();

        assert!(!added.contains(&CanonicalField::Gender));
        assert!(!added.contains(&CanonicalField::DepressionScore));
        assert_eq!(
            numeric_values(&df, "depression_score").unwrap(),
            vec![Some(2.0), None]
        );
    }

    #[test]
    fn test_same_seed_same_defaults() {
        let mut a = DataFrame::empty();
        let mut b = DataFrame::empty();

        synthesize_missing_fields(&mut a, 20, &mut seeded_rng(99)).unwrap();
        synthesize_missing_fields(&mut b, 20, &mut seeded_rng(99)).unwrap();

        assert!(a.equals_missing(&b));
    }
}
