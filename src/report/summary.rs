//! Combination summary report generation

use std::path::PathBuf;

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

use crate::pipeline::{LoadedSources, SourceOutcome, ValidationReport};

/// Summary of a combination run
#[derive(Debug, Default)]
pub struct CombineSummary {
    pub candidates: usize,
    pub loaded: usize,
    pub skipped: usize,
    pub rows_in: usize,
    pub duplicates_removed: usize,
    pub imputed_cells: usize,
    pub clamped_cells: usize,
    pub students_out: usize,
    pub output: PathBuf,
    /// Source name and the fields synthesized for it
    pub synthesized: Vec<(String, Vec<String>)>,
}

impl CombineSummary {
    pub fn new(loaded: &LoadedSources) -> Self {
        Self {
            candidates: loaded.candidates(),
            loaded: loaded.tables.len(),
            skipped: loaded.skipped.len(),
            rows_in: loaded.tables.iter().map(|t| t.rows()).sum(),
            ..Default::default()
        }
    }

    pub fn add_sources(&mut self, outcomes: &[SourceOutcome]) {
        self.synthesized = outcomes
            .iter()
            .map(|o| {
                (
                    o.name.clone(),
                    o.synthesized.iter().map(|f| f.to_string()).collect(),
                )
            })
            .collect();
    }

    pub fn add_validation(&mut self, report: &ValidationReport, students_out: usize) {
        self.duplicates_removed = report.duplicates_removed;
        self.imputed_cells = report.imputed.iter().map(|(_, n)| n).sum();
        self.clamped_cells = report.clamped;
        self.students_out = students_out;
    }

    pub fn set_output(&mut self, output: PathBuf) {
        self.output = output;
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("COMBINATION SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![
            Cell::new("📁 Candidate Files"),
            Cell::new(self.candidates),
        ]);
        table.add_row(vec![Cell::new("✅ Loaded"), Cell::new(self.loaded)]);
        table.add_row(vec![
            Cell::new("⚠️  Skipped (Load Error)"),
            Cell::new(self.skipped).fg(if self.skipped == 0 {
                Color::White
            } else {
                Color::Red
            }),
        ]);
        table.add_row(vec![Cell::new("📥 Rows In"), Cell::new(self.rows_in)]);
        table.add_row(vec![
            Cell::new("🗑️  Duplicates Removed"),
            Cell::new(self.duplicates_removed).fg(if self.duplicates_removed == 0 {
                Color::White
            } else {
                Color::Yellow
            }),
        ]);
        table.add_row(vec![
            Cell::new("🩹 Cells Imputed"),
            Cell::new(self.imputed_cells),
        ]);
        table.add_row(vec![
            Cell::new("📏 Cells Clamped"),
            Cell::new(self.clamped_cells),
        ]);
        table.add_row(vec![
            Cell::new("🎓 Total Students"),
            Cell::new(self.students_out)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);
        table.add_row(vec![
            Cell::new("💾 Output"),
            Cell::new(self.output.display()),
        ]);

        // Indent the table
        for line in table.to_string().lines() {
            println!("    {}", line);
        }

        let with_defaults: Vec<_> = self
            .synthesized
            .iter()
            .filter(|(_, fields)| !fields.is_empty())
            .collect();
        if with_defaults.is_empty() {
            return;
        }

        println!();
        println!(
            "    {} {}",
            style("📝").cyan(),
            style("FIELDS FILLED WITH DEFAULTS").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());

        for (source, fields) in with_defaults {
            println!();
            println!(
                "      {} {}:",
                style(source).yellow(),
                style(format!("({})", fields.len())).dim()
            );
            for field in fields {
                println!("        {} {}", style("•").dim(), field);
            }
        }
    }
}
