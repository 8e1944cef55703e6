//! Merge of per-source canonical tables
//!
//! Sources are stacked in processing order and then numbered. This is the only
//! place `student_id` is produced.

use anyhow::{Context, Result};
use polars::prelude::*;

use super::schema::CanonicalField;
use super::values::{numeric_values, text_values};

/// Stack canonical source tables and assign a dense 1-based `student_id`.
///
/// Every table must carry all source fields (see
/// [`synthesize_missing_fields`](super::synthesize_missing_fields)). Columns
/// are rebuilt field by field with their canonical dtype, so differing source
/// dtypes (an integer `age` here, a float `age` there) stack cleanly. Any column
/// outside the source fields, including a stray `student_id`, is discarded.
pub fn merge_sources(tables: &[DataFrame]) -> Result<DataFrame> {
    let total_rows: usize = tables.iter().map(|t| t.height()).sum();
    let mut columns: Vec<Column> = Vec::with_capacity(CanonicalField::ALL.len());

    let ids: Vec<i64> = (1..=total_rows as i64).collect();
    columns.push(Column::new(CanonicalField::StudentId.name().into(), ids));

    for field in CanonicalField::source_fields() {
        let name = field.name();
        if field.kind().is_numeric() {
            let mut values: Vec<Option<f64>> = Vec::with_capacity(total_rows);
            for table in tables {
                values.extend(
                    numeric_values(table, name)
                        .with_context(|| format!("Cannot merge: source lacks '{}'", name))?,
                );
            }
            columns.push(Column::new(name.into(), values));
        } else {
            let mut values: Vec<Option<String>> = Vec::with_capacity(total_rows);
            for table in tables {
                values.extend(
                    text_values(table, name)
                        .with_context(|| format!("Cannot merge: source lacks '{}'", name))?,
                );
            }
            columns.push(Column::new(name.into(), values));
        }
    }

    let merged = DataFrame::new(columns).context("Failed to assemble merged table")?;
    log::info!("Merged {} source(s) into {} rows", tables.len(), merged.height());

    Ok(merged)
}

/// Renumber `student_id` as 1..N in current row order
pub fn assign_student_ids(df: &mut DataFrame) -> Result<()> {
    let ids: Vec<i64> = (1..=df.height() as i64).collect();
    df.with_column(Column::new(CanonicalField::StudentId.name().into(), ids))
        .context("Failed to assign student ids")?;
    Ok(())
}
