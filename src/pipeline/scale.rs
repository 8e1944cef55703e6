//! Scale normalization onto the 1-5 score range
//!
//! Sources rate indicators on whatever scale they like (0-10, 1-7, raw
//! PHQ-9 totals, ...). A score field whose observed range leaves [1, 5] is
//! mapped linearly onto it and rounded, which preserves the rank order of the
//! observed values.

use anyhow::Result;
use polars::prelude::*;
use serde::Serialize;

use super::schema::{CanonicalField, SCORE_MAX, SCORE_MIN};
use super::values::{has_column, numeric_values, set_numeric};

/// Record of a field that was rescaled
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rescale {
    pub field: CanonicalField,
    pub observed_min: f64,
    pub observed_max: f64,
}

/// Outcome of inspecting one column's observed range
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScaleDecision {
    /// No observed values; left for imputation
    Empty,
    /// Already within [1, 5]
    InRange,
    /// A single distinct value outside the range; cannot be stretched
    Constant(f64),
    /// Needs the affine map from `[min, max]` onto [1, 5]
    Rescale { min: f64, max: f64 },
}

/// Observed range of the non-missing values
pub fn observed_range(values: &[Option<f64>]) -> Option<(f64, f64)> {
    values.iter().flatten().fold(None, |acc, &v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

pub fn decide_scale(values: &[Option<f64>]) -> ScaleDecision {
    match observed_range(values) {
        None => ScaleDecision::Empty,
        Some((min, max)) if min >= SCORE_MIN && max <= SCORE_MAX => ScaleDecision::InRange,
        Some((min, max)) if min == max => ScaleDecision::Constant(min),
        Some((min, max)) => ScaleDecision::Rescale { min, max },
    }
}

/// Map `value` from `[min, max]` onto the score range, rounding half to even
pub fn rescale_value(value: f64, min: f64, max: f64) -> f64 {
    let scaled = SCORE_MIN + (SCORE_MAX - SCORE_MIN) * (value - min) / (max - min);
    scaled.round_ties_even().clamp(SCORE_MIN, SCORE_MAX)
}

/// Coerce every present score field to numbers and rescale the ones that need it.
///
/// Returns the fields that were rescaled, with their observed ranges.
pub fn normalize_scales(df: &mut DataFrame) -> Result<Vec<Rescale>> {
    let mut rescaled = Vec::new();

    for field in CanonicalField::SCORES {
        let name = field.name();
        if !has_column(df, name) {
            continue;
        }

        let values = numeric_values(df, name)?;
        let values = match decide_scale(&values) {
            ScaleDecision::Rescale { min, max } => {
                log::debug!("Normalized {}: [{}, {}] -> [1, 5]", name, min, max);
                rescaled.push(Rescale {
                    field,
                    observed_min: min,
                    observed_max: max,
                });
                values
                    .into_iter()
                    .map(|v| v.map(|x| rescale_value(x, min, max)))
                    .collect()
            }
            ScaleDecision::Constant(v) => {
                log::debug!("{} holds the single value {}; left unscaled", name, v);
                values
            }
            ScaleDecision::Empty | ScaleDecision::InRange => values,
        };

        set_numeric(df, name, values)?;
    }

    Ok(rescaled)
}
