//! Dry-run inspection of source column mappings

use std::path::{Path, PathBuf};

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::pipeline::{discover_sources, load_sources, reconcile_columns};
use crate::utils::create_spinner;

/// Load every source and print how its columns map onto the canonical schema.
///
/// # Arguments
/// * `input_dir` - Directory searched when no explicit files are given
/// * `files` - Explicit source files
/// * `infer_schema_length` - Rows used for CSV dtype inference
pub fn run_inspect(input_dir: &Path, files: &[PathBuf], infer_schema_length: usize) -> Result<()> {
    let candidates = if files.is_empty() {
        discover_sources(input_dir, None)?
    } else {
        files.to_vec()
    };

    println!(
        "\n {} Inspecting {} source file(s)",
        style("◆").cyan().bold(),
        style(candidates.len()).yellow()
    );
    println!();

    let spinner = create_spinner("Loading sources...");
    let loaded = load_sources(&candidates, infer_schema_length)?;
    spinner.finish_with_message(format!(
        "{} Loaded {} source(s)",
        style("✓").green(),
        loaded.tables.len()
    ));

    for skipped in &loaded.skipped {
        println!(
            "   {} {}: {}",
            style("✗").red(),
            skipped.path.display(),
            style(&skipped.reason).dim()
        );
    }

    for source in &loaded.tables {
        let (_, mapping) = reconcile_columns(&source.frame, &source.name)?;

        println!();
        println!(
            "   {} {} {}",
            style(&source.name).cyan().bold(),
            style(source.path.display()).dim(),
            style(format!("({} rows)", source.rows())).dim()
        );

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Source Column").add_attribute(Attribute::Bold),
            Cell::new("Canonical Field").add_attribute(Attribute::Bold),
        ]);

        for (label, field) in &mapping.renamed {
            table.add_row(vec![Cell::new(label), Cell::new(field).fg(Color::Green)]);
        }
        for (label, field) in &mapping.collisions {
            table.add_row(vec![
                Cell::new(label),
                Cell::new(format!("(dropped: {} already mapped)", field)).fg(Color::Yellow),
            ]);
        }
        for label in &mapping.unmapped {
            table.add_row(vec![Cell::new(label), Cell::new("(unmapped)").fg(Color::DarkGrey)]);
        }

        for line in table.to_string().lines() {
            println!("   {}", line);
        }
    }

    println!();
    println!(" {} Inspection complete, nothing written", style("✓").green().bold());

    Ok(())
}
