//! Validation and deduplication of the merged table
//!
//! Three passes: drop exact duplicate records, impute residual gaps (median
//! for numbers, mode for labels), and clamp bounded fields to their domains.
//! Clamping is a hard floor and ceiling, not a rescale. Imputation and
//! clamping can make distinct records equal, so duplicates are dropped once
//! more at the end; a validated table passes through unchanged. No pass adds
//! columns or drops rows other than duplicates.

use std::collections::{HashMap, HashSet};

use anyhow::{Context, Result};
use polars::prelude::*;
use serde::Serialize;

use super::merge::assign_student_ids;
use super::schema::{CanonicalField, FieldKind};
use super::values::{has_column, numeric_values, set_integer, set_numeric, set_text, text_values};

/// What validation changed
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub duplicates_removed: usize,
    /// Fields that had gaps, with the number of cells filled
    pub imputed: Vec<(CanonicalField, usize)>,
    /// Cells moved onto a domain bound
    pub clamped: usize,
}

/// Canonical fields present in the frame, in column order
fn present_fields(df: &DataFrame) -> Vec<CanonicalField> {
    df.get_column_names()
        .iter()
        .filter_map(|name| CanonicalField::from_name(name.as_str()))
        .collect()
}

/// Run all three passes, then drop records that became equal along the way.
pub fn validate(df: DataFrame) -> Result<(DataFrame, ValidationReport)> {
    let (mut df, merged_duplicates) = drop_duplicate_rows(&df)?;
    let imputed = impute_missing(&mut df)?;
    let clamped = clamp_domains(&mut df)?;
    let (df, converged_duplicates) = drop_duplicate_rows(&df)?;
    let duplicates_removed = merged_duplicates + converged_duplicates;

    Ok((
        df,
        ValidationReport {
            duplicates_removed,
            imputed,
            clamped,
        },
    ))
}

/// Drop records identical in every field except `student_id`, keeping the first.
///
/// Because every record carries a unique `student_id`, a literal full-row
/// comparison would never find a duplicate. Survivors are renumbered 1..N so
/// the identifier stays dense.
pub fn drop_duplicate_rows(df: &DataFrame) -> Result<(DataFrame, usize)> {
    let key_columns: Vec<Vec<Option<String>>> = df
        .get_column_names()
        .iter()
        .filter(|name| name.as_str() != CanonicalField::StudentId.name())
        .map(|name| text_values(df, name.as_str()))
        .collect::<Result<_>>()?;

    let mut seen: HashSet<Vec<Option<&str>>> = HashSet::with_capacity(df.height());
    let keep: Vec<bool> = (0..df.height())
        .map(|row| {
            let key: Vec<Option<&str>> = key_columns.iter().map(|c| c[row].as_deref()).collect();
            seen.insert(key)
        })
        .collect();

    let removed = keep.iter().filter(|k| !**k).count();
    if removed == 0 {
        return Ok((df.clone(), 0));
    }

    let mask = BooleanChunked::from_slice("keep".into(), &keep);
    let mut deduped = df.filter(&mask).context("Failed to drop duplicate rows")?;
    if has_column(&deduped, CanonicalField::StudentId.name()) {
        assign_student_ids(&mut deduped)?;
    }
    log::info!("Removed {} duplicate row(s)", removed);

    Ok((deduped, removed))
}

/// Median of the values, averaging the two middle values for even counts
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Most frequent value; ties go to the value encountered first
pub fn mode<'a>(values: impl Iterator<Item = &'a str>) -> Option<String> {
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (position, value) in values.enumerate() {
        counts.entry(value).or_insert((0, position)).0 += 1;
    }
    counts
        .into_iter()
        .max_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
            count_a.cmp(count_b).then(first_b.cmp(first_a))
        })
        .map(|(value, _)| value.to_string())
}

/// Fill gaps in every canonical column.
///
/// A numeric column with no observed value at all falls back to the field's
/// neutral value.
pub fn impute_missing(df: &mut DataFrame) -> Result<Vec<(CanonicalField, usize)>> {
    let mut imputed = Vec::new();

    for field in present_fields(df) {
        let name = field.name();
        if field.kind().is_numeric() {
            let values = numeric_values(df, name)?;
            let gaps = values.iter().filter(|v| v.is_none()).count();
            if gaps == 0 {
                continue;
            }
            let observed: Vec<f64> = values.iter().flatten().copied().collect();
            let Some(fill) = median(&observed).or_else(|| field.neutral_value()) else {
                continue;
            };
            log::debug!("Imputing {} gap(s) in {} with {}", gaps, name, fill);
            set_numeric(df, name, values.into_iter().map(|v| v.or(Some(fill))).collect())?;
            imputed.push((field, gaps));
        } else {
            let values = text_values(df, name)?;
            let gaps = values.iter().filter(|v| v.is_none()).count();
            if gaps == 0 {
                continue;
            }
            let Some(fill) = mode(values.iter().flatten().map(|s| s.as_str())) else {
                continue;
            };
            log::debug!("Imputing {} gap(s) in {} with '{}'", gaps, name, fill);
            let filled = values
                .into_iter()
                .map(|v| v.or_else(|| Some(fill.clone())))
                .collect();
            set_text(df, name, filled)?;
            imputed.push((field, gaps));
        }
    }

    Ok(imputed)
}

/// Clamp bounded fields to their domains and render integer fields as integers.
///
/// Returns the number of cells that were moved onto a bound.
pub fn clamp_domains(df: &mut DataFrame) -> Result<usize> {
    let mut clamped = 0;

    for field in present_fields(df) {
        let Some((lo, hi)) = field.domain() else {
            continue;
        };
        let name = field.name();
        let values = numeric_values(df, name)?;

        let bounded: Vec<Option<f64>> = values
            .into_iter()
            .map(|v| {
                v.map(|x| {
                    let c = x.clamp(lo, hi);
                    if c != x {
                        clamped += 1;
                    }
                    c
                })
            })
            .collect();

        if field.kind() == FieldKind::Integer {
            let whole = bounded
                .into_iter()
                .map(|v| v.map(|x| x.round_ties_even() as i64))
                .collect();
            set_integer(df, name, whole)?;
        } else {
            set_numeric(df, name, bounded)?;
        }
    }

    Ok(clamped)
}
