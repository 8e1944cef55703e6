//! Per-source standardization and assembly of the canonical table
//!
//! Each source goes through reconciliation, decoding, normalization and
//! synthesis independently; the standardized tables are then merged, scored
//! and validated once.

use std::path::PathBuf;

use anyhow::{Context, Result};
use polars::prelude::*;
use rand::Rng;

use super::categorical::{decode_text_scores, standardize_labels};
use super::coerce::coerce_demographics;
use super::columns::{reconcile_columns, ColumnMapping};
use super::composite::compute_composites;
use super::loader::SourceTable;
use super::merge::merge_sources;
use super::scale::{normalize_scales, Rescale};
use super::schema::CanonicalField;
use super::synthesize::synthesize_missing_fields;
use super::validate::{validate, ValidationReport};

/// Default name of the canonical output file
pub const DEFAULT_OUTPUT_NAME: &str = "combined_mental_health_data.csv";

/// Settings for one combination run
#[derive(Debug, Clone)]
pub struct CombineConfig {
    /// Directory searched for source CSV files
    pub input_dir: PathBuf,
    /// Explicit source files; when non-empty, discovery is skipped
    pub files: Vec<PathBuf>,
    pub output: PathBuf,
    /// Seed of the run's random generator
    pub seed: u64,
    /// Rows used for CSV dtype inference (0 = full scan)
    pub infer_schema_length: usize,
    /// Optional JSON run report path
    pub report: Option<PathBuf>,
}

impl Default for CombineConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            files: Vec::new(),
            output: PathBuf::from(DEFAULT_OUTPUT_NAME),
            seed: 42,
            infer_schema_length: 10000,
            report: None,
        }
    }
}

/// What happened to one source on its way to the canonical schema
#[derive(Debug, Clone)]
pub struct SourceOutcome {
    pub name: String,
    pub path: PathBuf,
    pub rows: usize,
    pub columns: usize,
    pub mapping: ColumnMapping,
    /// Score fields decoded from text
    pub decoded: Vec<CanonicalField>,
    pub rescaled: Vec<Rescale>,
    /// Fields absent from the source and filled with defaults
    pub synthesized: Vec<CanonicalField>,
}

/// Bring one source table onto the canonical schema.
///
/// Order matters: textual indicators are decoded before scale normalization
/// coerces score columns to numbers.
pub fn standardize_source<R: Rng>(
    source: &SourceTable,
    rng: &mut R,
) -> Result<(DataFrame, SourceOutcome)> {
    let (mut df, mapping) = reconcile_columns(&source.frame, &source.name)?;

    let decoded = decode_text_scores(&mut df)
        .with_context(|| format!("Failed to decode text scores in {}", source.name))?;
    coerce_demographics(&mut df)
        .with_context(|| format!("Failed to coerce demographics in {}", source.name))?;
    let rescaled = normalize_scales(&mut df)
        .with_context(|| format!("Failed to normalize scales in {}", source.name))?;
    standardize_labels(&mut df)
        .with_context(|| format!("Failed to standardize labels in {}", source.name))?;
    let synthesized = synthesize_missing_fields(&mut df, source.rows(), rng)
        .with_context(|| format!("Failed to synthesize fields in {}", source.name))?;

    let outcome = SourceOutcome {
        name: source.name.clone(),
        path: source.path.clone(),
        rows: source.rows(),
        columns: source.frame.width(),
        mapping,
        decoded,
        rescaled,
        synthesized,
    };

    Ok((df, outcome))
}

/// Merge standardized tables, derive composites, and validate.
pub fn assemble_canonical(tables: &[DataFrame]) -> Result<(DataFrame, ValidationReport)> {
    let mut merged = merge_sources(tables)?;
    compute_composites(&mut merged)?;
    validate(merged)
}
