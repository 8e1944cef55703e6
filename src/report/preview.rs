//! Sample of the saved dataset's key columns

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Table};
use console::style;
use polars::prelude::DataFrame;

use crate::pipeline::{has_column, text_values, CanonicalField};

/// Rows shown in the console preview
pub const PREVIEW_ROWS: usize = 5;

/// Columns shown in the console preview, in display order
pub const PREVIEW_FIELDS: [CanonicalField; 10] = [
    CanonicalField::StudentId,
    CanonicalField::Age,
    CanonicalField::Gender,
    CanonicalField::Cgpa,
    CanonicalField::DepressionScore,
    CanonicalField::AnxietyScore,
    CanonicalField::StressLevel,
    CanonicalField::CampusEnvironmentScore,
    CanonicalField::AcademicExpectationScore,
    CanonicalField::MentalHealthScore,
];

/// Header and the first `rows` rows of the preview columns present in `df`
pub fn preview_rows(df: &DataFrame, rows: usize) -> Result<(Vec<String>, Vec<Vec<String>>)> {
    let fields: Vec<CanonicalField> = PREVIEW_FIELDS
        .into_iter()
        .filter(|f| has_column(df, f.name()))
        .collect();

    let columns = fields
        .iter()
        .map(|f| text_values(df, f.name()))
        .collect::<Result<Vec<_>>>()?;

    let body = (0..rows.min(df.height()))
        .map(|row| {
            columns
                .iter()
                .map(|c| c[row].clone().unwrap_or_default())
                .collect()
        })
        .collect();

    Ok((fields.iter().map(|f| f.to_string()).collect(), body))
}

/// Print the first rows of the key columns as a table
pub fn display_preview(df: &DataFrame) -> Result<()> {
    let (header, body) = preview_rows(df, PREVIEW_ROWS)?;

    println!();
    println!(
        "    {} {}",
        style("🔎").cyan(),
        style(format!("SAMPLE DATA (first {} rows)", body.len()))
            .white()
            .bold()
    );
    println!("    {}", style("─".repeat(50)).dim());

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(
        header
            .iter()
            .map(|h| Cell::new(h).add_attribute(Attribute::Bold))
            .collect::<Vec<_>>(),
    );
    for row in body {
        table.add_row(row);
    }

    for line in table.to_string().lines() {
        println!("    {}", line);
    }

    Ok(())
}
