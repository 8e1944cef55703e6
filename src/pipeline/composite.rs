//! Composite score derivation
//!
//! The three composites are per-row means of fixed score groups. They are
//! always recomputed on the merged table; sources never supply them.

use anyhow::Result;
use polars::prelude::*;

use super::schema::CanonicalField;
use super::values::{has_column, numeric_values, set_numeric};

/// A composite field and the score fields it averages
#[derive(Debug, Clone, Copy)]
pub struct CompositeDefinition {
    pub field: CanonicalField,
    pub constituents: &'static [CanonicalField],
}

pub const COMPOSITES: [CompositeDefinition; 3] = [
    CompositeDefinition {
        field: CanonicalField::CampusEnvironmentScore,
        constituents: &[
            CanonicalField::CampusSafety,
            CanonicalField::SocialSupport,
            CanonicalField::CampusFacilities,
            CanonicalField::AccommodationSatisfaction,
            CanonicalField::PeerRelationships,
        ],
    },
    CompositeDefinition {
        field: CanonicalField::AcademicExpectationScore,
        constituents: &[
            CanonicalField::AcademicPressure,
            CanonicalField::WorkloadStress,
            CanonicalField::ExamAnxiety,
            CanonicalField::GradeExpectations,
            CanonicalField::CareerConcerns,
        ],
    },
    CompositeDefinition {
        field: CanonicalField::MentalHealthScore,
        constituents: &[
            CanonicalField::DepressionScore,
            CanonicalField::AnxietyScore,
            CanonicalField::StressLevel,
            CanonicalField::SleepQuality,
        ],
    },
];

/// Mean of the present values in a row, `None` if all are missing
fn row_mean(values: impl Iterator<Item = Option<f64>>) -> Option<f64> {
    let (sum, count) = values
        .flatten()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Compute (or overwrite) every composite whose constituents are all present.
///
/// Missing cells are skipped in the mean; residual gaps are left for
/// imputation. Returns the composites written.
pub fn compute_composites(df: &mut DataFrame) -> Result<Vec<CanonicalField>> {
    let mut written = Vec::new();

    for composite in COMPOSITES {
        if let Some(absent) = composite
            .constituents
            .iter()
            .find(|f| !has_column(df, f.name()))
        {
            log::warn!(
                "Skipping {}: constituent '{}' is not in the table",
                composite.field,
                absent
            );
            continue;
        }

        let columns: Vec<Vec<Option<f64>>> = composite
            .constituents
            .iter()
            .map(|f| numeric_values(df, f.name()))
            .collect::<Result<_>>()?;

        let means: Vec<Option<f64>> = (0..df.height())
            .map(|row| row_mean(columns.iter().map(|c| c[row])))
            .collect();

        set_numeric(df, composite.field.name(), means)?;
        written.push(composite.field);
    }

    Ok(written)
}
