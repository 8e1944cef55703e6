//! Source discovery and loading
//!
//! Candidate CSV files are discovered in a directory (or given explicitly),
//! then loaded one by one. A file that fails to load is skipped and reported;
//! the batch only fails when nothing at all could be loaded.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use polars::prelude::*;

use super::error::CombineError;

/// File name prefixes that mark outputs of this pipeline
pub const OUTPUT_PREFIXES: [&str; 2] = ["combined_", "processed_"];

/// A loaded input table before reconciliation
#[derive(Debug, Clone)]
pub struct SourceTable {
    /// Synthetic name (`dataset1`, `dataset2`, ...) by discovery position
    pub name: String,
    pub path: PathBuf,
    pub frame: DataFrame,
}

impl SourceTable {
    pub fn rows(&self) -> usize {
        self.frame.height()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }
}

/// A candidate file that could not be loaded
#[derive(Debug, Clone)]
pub struct SkippedSource {
    pub path: PathBuf,
    pub reason: String,
}

/// Result of loading a batch of candidate files
#[derive(Debug, Clone, Default)]
pub struct LoadedSources {
    /// Loaded tables, in candidate order
    pub tables: Vec<SourceTable>,
    pub skipped: Vec<SkippedSource>,
}

impl LoadedSources {
    pub fn candidates(&self) -> usize {
        self.tables.len() + self.skipped.len()
    }
}

/// Whether a file name marks an output of this pipeline
pub fn is_pipeline_output(file_name: &str) -> bool {
    OUTPUT_PREFIXES
        .iter()
        .any(|prefix| file_name.starts_with(prefix))
}

/// Find candidate CSV files directly inside `dir`.
///
/// Outputs of this pipeline (see [`OUTPUT_PREFIXES`]) and the configured
/// output file are excluded. The result is sorted by file name so repeated
/// runs on the same directory assign the same student ids.
pub fn discover_sources(dir: &Path, output: Option<&Path>) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|source| CombineError::Discovery {
        path: dir.to_path_buf(),
        source,
    })?;

    let output_canonical = output.and_then(|p| std::fs::canonicalize(p).ok());

    let mut candidates = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| CombineError::Discovery {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if !path.is_file() || !has_csv_extension(&path) {
            continue;
        }

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        if is_pipeline_output(file_name) {
            log::debug!("Skipping pipeline output during discovery: {}", path.display());
            continue;
        }
        if output_canonical.is_some() && std::fs::canonicalize(&path).ok() == output_canonical {
            continue;
        }

        candidates.push(path);
    }

    candidates.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(candidates)
}

fn has_csv_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("csv"))
        .unwrap_or(false)
}

/// Load a single CSV file into memory
///
/// # Arguments
/// * `path` - Path to the CSV file
/// * `infer_schema_length` - Rows used for dtype inference (0 = full scan)
pub fn load_dataset(path: &Path, infer_schema_length: usize) -> Result<DataFrame> {
    if !has_csv_extension(path) {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        return Err(CombineError::UnsupportedFormat { extension }.into());
    }

    let schema_length = if infer_schema_length == 0 {
        None
    } else {
        Some(infer_schema_length)
    };

    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(schema_length)
        .finish()
        .with_context(|| format!("Failed to load CSV file: {}", path.display()))?
        .collect()
        .with_context(|| format!("Failed to parse CSV file: {}", path.display()))?;

    Ok(df)
}

/// Load every candidate, skipping the ones that fail.
///
/// Returns [`CombineError::EmptyInput`] if no candidate could be loaded.
pub fn load_sources(paths: &[PathBuf], infer_schema_length: usize) -> Result<LoadedSources> {
    let mut loaded = LoadedSources::default();

    for (i, path) in paths.iter().enumerate() {
        match load_dataset(path, infer_schema_length) {
            Ok(frame) => {
                log::info!(
                    "Loaded {} ({} rows x {} columns)",
                    path.display(),
                    frame.height(),
                    frame.width()
                );
                loaded.tables.push(SourceTable {
                    name: format!("dataset{}", i + 1),
                    path: path.clone(),
                    frame,
                });
            }
            Err(e) => {
                log::warn!("Skipping {}: {:#}", path.display(), e);
                loaded.skipped.push(SkippedSource {
                    path: path.clone(),
                    reason: format!("{:#}", e),
                });
            }
        }
    }

    if loaded.tables.is_empty() {
        return Err(CombineError::EmptyInput {
            candidates: loaded.candidates(),
            skipped: loaded.skipped.len(),
        }
        .into());
    }

    Ok(loaded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_pipeline_output() {
        assert!(is_pipeline_output("combined_mental_health_data.csv"));
        assert!(is_pipeline_output("processed_survey.csv"));
        assert!(!is_pipeline_output("student_survey.csv"));
        assert!(!is_pipeline_output("my_combined.csv"));
    }

    #[test]
    fn test_csv_extension_is_case_insensitive() {
        assert!(has_csv_extension(Path::new("a.CSV")));
        assert!(has_csv_extension(Path::new("dir/b.csv")));
        assert!(!has_csv_extension(Path::new("c.parquet")));
        assert!(!has_csv_extension(Path::new("noext")));
    }

    #[test]
    fn test_unsupported_format_is_typed() {
        let err = load_dataset(Path::new("survey.xlsx"), 100).unwrap_err();
        match err.downcast_ref::<CombineError>() {
            Some(CombineError::UnsupportedFormat { extension }) => assert_eq!(extension, "xlsx"),
            other => panic!("Expected UnsupportedFormat, got {:?}", other),
        }
    }

    #[test]
    fn test_load_sources_with_nothing_is_empty_input() {
        let err = load_sources(&[], 100).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CombineError>(),
            Some(CombineError::EmptyInput {
                candidates: 0,
                skipped: 0
            })
        ));
    }
}
