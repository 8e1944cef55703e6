//! Shared test utilities and fixture generators

#![allow(dead_code)]

use mindmerge::pipeline::{canonical_column_names, numeric_values, text_values};
use polars::prelude::*;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Write CSV text to `name` inside `dir`
pub fn write_csv(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

/// A survey export using the wide questionnaire headers and a 0-10 depression scale
pub const SURVEY_WIDE: &str = "\
Timestamp,Choose your gender,Age,Your current year of Study,What is your CGPA?,Depression,Do you have Anxiety?,Did you seek any specialist for a treatment?
t1,Female,18,year 1,3.00 - 3.49,0,Yes,No
t2,Male,21,Year 3,3.50 - 4.00,5,No,Yes
t3,Female,19,year 2,2.50 - 2.99,10,Yes,No
";

/// A survey export already on canonical names and scales, without gender
pub const SURVEY_CANONICAL: &str = "\
age,year_of_study,cgpa,depression_score,stress_level,seeks_counseling
22,4,3.1,1,2,Y
23,3,2.9,5,4,no
24,2,3.6,3,3,1
25,1,3.3,2,5,
";

/// Create a temporary directory holding both fixture surveys
pub fn create_survey_dir() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    write_csv(temp_dir.path(), "a_wide.csv", SURVEY_WIDE);
    write_csv(temp_dir.path(), "b_canonical.csv", SURVEY_CANONICAL);
    temp_dir
}

pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names().iter().map(|s| s.to_string()).collect()
}

/// Assert that a DataFrame has the exact canonical schema in canonical order
pub fn assert_canonical_schema(df: &DataFrame) {
    assert_eq!(
        column_names(df),
        canonical_column_names(),
        "Output columns should match the canonical schema"
    );
}

/// Assert that a DataFrame has the expected shape
pub fn assert_shape(df: &DataFrame, expected_rows: usize, expected_cols: usize) {
    assert_eq!(df.height(), expected_rows, "Row count mismatch");
    assert_eq!(df.width(), expected_cols, "Column count mismatch");
}

/// All values of a numeric column, failing on any missing cell
pub fn numbers(df: &DataFrame, name: &str) -> Vec<f64> {
    numeric_values(df, name)
        .unwrap()
        .into_iter()
        .map(|v| v.unwrap_or_else(|| panic!("missing value in {}", name)))
        .collect()
}

/// All values of a label column, failing on any missing cell
pub fn labels(df: &DataFrame, name: &str) -> Vec<String> {
    text_values(df, name)
        .unwrap()
        .into_iter()
        .map(|v| v.unwrap_or_else(|| panic!("missing label in {}", name)))
        .collect()
}
