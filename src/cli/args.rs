//! Command-line argument definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::pipeline::{CombineConfig, DEFAULT_OUTPUT_NAME};

/// mindmerge - Combine heterogeneous student mental-health surveys into one canonical dataset
#[derive(Parser, Debug)]
#[command(name = "mindmerge")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory searched for source CSV files.
    /// Files named combined_* or processed_* are outputs and are never read.
    #[arg(short = 'd', long, default_value = ".")]
    pub input_dir: PathBuf,

    /// Explicit source file (repeatable). When given, directory discovery is skipped.
    #[arg(short = 'f', long = "file")]
    pub files: Vec<PathBuf>,

    /// Output CSV path.
    /// Defaults to combined_mental_health_data.csv inside the input directory.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Seed for randomized defaults of wholly absent demographic fields
    #[arg(long, default_value = "42")]
    pub seed: u64,

    /// Number of rows to use for schema inference.
    /// Higher values improve type detection for ambiguous columns but may be slower.
    /// Use 0 for full table scan.
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,

    /// Write a JSON run report (mappings, rescales, defaults, skipped files) to this path
    #[arg(long)]
    pub report: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show how each source's columns map onto the canonical schema, without writing anything
    Inspect {
        /// Directory searched for source CSV files
        #[arg(short = 'd', long, default_value = ".")]
        input_dir: PathBuf,

        /// Explicit source file (repeatable)
        #[arg(short = 'f', long = "file")]
        files: Vec<PathBuf>,
    },
}

impl Cli {
    /// Output path, defaulting to the standard file name inside the input directory
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.input_dir.join(DEFAULT_OUTPUT_NAME))
    }

    /// Fold the parsed arguments into the pipeline's configuration
    pub fn combine_config(&self) -> CombineConfig {
        CombineConfig {
            input_dir: self.input_dir.clone(),
            files: self.files.clone(),
            output: self.output_path(),
            seed: self.seed,
            infer_schema_length: self.infer_schema_length,
            report: self.report.clone(),
        }
    }
}
