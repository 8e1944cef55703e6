//! JSON run report export

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::pipeline::{CanonicalField, LoadedSources, Rescale, SourceOutcome, ValidationReport};

/// Metadata about the run
#[derive(Serialize)]
pub struct RunMetadata {
    /// Timestamp of the run (ISO 8601 format)
    pub timestamp: String,
    /// mindmerge version
    pub mindmerge_version: String,
    /// Seed of the random generator used for synthesized demographics
    pub seed: u64,
    /// Canonical output file
    pub output_file: String,
}

/// A column rename applied to a source
#[derive(Serialize)]
pub struct RenamedColumn {
    pub source: String,
    pub canonical: CanonicalField,
}

/// One loaded source and what reconciliation did to it
#[derive(Serialize)]
pub struct SourceEntry {
    pub name: String,
    pub path: String,
    pub rows: usize,
    pub columns: usize,
    pub renamed: Vec<RenamedColumn>,
    pub unmapped: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub collisions: Vec<String>,
    pub decoded: Vec<CanonicalField>,
    pub rescaled: Vec<Rescale>,
    pub synthesized: Vec<CanonicalField>,
}

impl From<&SourceOutcome> for SourceEntry {
    fn from(outcome: &SourceOutcome) -> Self {
        Self {
            name: outcome.name.clone(),
            path: outcome.path.display().to_string(),
            rows: outcome.rows,
            columns: outcome.columns,
            renamed: outcome
                .mapping
                .renamed
                .iter()
                .map(|(source, canonical)| RenamedColumn {
                    source: source.clone(),
                    canonical: *canonical,
                })
                .collect(),
            unmapped: outcome.mapping.unmapped.clone(),
            collisions: outcome
                .mapping
                .collisions
                .iter()
                .map(|(source, _)| source.clone())
                .collect(),
            decoded: outcome.decoded.clone(),
            rescaled: outcome.rescaled.clone(),
            synthesized: outcome.synthesized.clone(),
        }
    }
}

/// A candidate file that failed to load
#[derive(Serialize)]
pub struct SkippedEntry {
    pub path: String,
    pub reason: String,
}

/// Complete run report
#[derive(Serialize)]
pub struct RunReport {
    pub metadata: RunMetadata,
    pub sources: Vec<SourceEntry>,
    pub skipped: Vec<SkippedEntry>,
    pub validation: ValidationReport,
    pub students: usize,
}

impl RunReport {
    pub fn new(
        seed: u64,
        output: &Path,
        loaded: &LoadedSources,
        outcomes: &[SourceOutcome],
        validation: &ValidationReport,
        students: usize,
    ) -> Self {
        Self {
            metadata: RunMetadata {
                timestamp: Utc::now().to_rfc3339(),
                mindmerge_version: env!("CARGO_PKG_VERSION").to_string(),
                seed,
                output_file: output.display().to_string(),
            },
            sources: outcomes.iter().map(SourceEntry::from).collect(),
            skipped: loaded
                .skipped
                .iter()
                .map(|s| SkippedEntry {
                    path: s.path.display().to_string(),
                    reason: s.reason.clone(),
                })
                .collect(),
            validation: validation.clone(),
            students,
        }
    }
}

/// Write the run report as pretty-printed JSON
pub fn export_run_report(report: &RunReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialize run report")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write run report: {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::ColumnMapping;
    use std::path::PathBuf;

    #[test]
    fn test_report_serializes_field_names() {
        let outcome = SourceOutcome {
            name: "dataset1".to_string(),
            path: PathBuf::from("survey.csv"),
            rows: 4,
            columns: 2,
            mapping: ColumnMapping {
                renamed: vec![("Depression".to_string(), CanonicalField::DepressionScore)],
                unmapped: vec!["Timestamp".to_string()],
                collisions: Vec::new(),
            },
            decoded: Vec::new(),
            rescaled: vec![Rescale {
                field: CanonicalField::DepressionScore,
                observed_min: 0.0,
                observed_max: 10.0,
            }],
            synthesized: vec![CanonicalField::Gender],
        };
        let validation = ValidationReport::default();

        let report = RunReport::new(
            42,
            Path::new("combined.csv"),
            &LoadedSources::default(),
            &[outcome],
            &validation,
            4,
        );
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["metadata"]["seed"], 42);
        assert_eq!(json["sources"][0]["renamed"][0]["canonical"], "depression_score");
        assert_eq!(json["sources"][0]["rescaled"][0]["observed_max"], 10.0);
        assert_eq!(json["sources"][0]["synthesized"][0], "gender");
        assert!(json["sources"][0].get("collisions").is_none());
        assert_eq!(json["students"], 4);
    }
}
