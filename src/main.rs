//! mindmerge: Survey Combination CLI Tool
//!
//! Reads every student mental-health survey export in a directory, maps
//! each onto one canonical schema, and writes a single cleaned CSV.

use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use console::style;
use env_logger::Env;

use mindmerge::cli::{self, Cli, Commands};
use mindmerge::pipeline::{
    assemble_canonical, discover_sources, load_sources, seeded_rng, standardize_source,
    write_canonical_csv,
};
use mindmerge::report::{display_preview, export_run_report, CombineSummary, RunReport};
use mindmerge::utils::{
    create_progress_bar, create_spinner, finish_with_success, finish_with_warning, print_banner,
    print_completion, print_config, print_count, print_info, print_step_header, print_step_time,
    print_success, print_warning,
};

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    // Handle subcommands
    if let Some(command) = &cli.command {
        return match command {
            Commands::Inspect { input_dir, files } => {
                cli::inspect::run_inspect(input_dir, files, cli.infer_schema_length)
            }
        };
    }

    let config = cli.combine_config();

    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(&config);

    // Step 1: Load sources
    print_step_header(1, "Load Sources");

    let step_start = Instant::now();
    let candidates = if config.files.is_empty() {
        discover_sources(&config.input_dir, Some(&config.output))?
    } else {
        config.files.clone()
    };
    print_count("candidate file(s)", candidates.len(), None);

    let spinner = create_spinner("Reading source files...");
    let loaded = load_sources(&candidates, config.infer_schema_length)?;
    if loaded.skipped.is_empty() {
        finish_with_success(&spinner, "All sources loaded");
    } else {
        finish_with_warning(
            &spinner,
            &format!("{} source(s) could not be read", loaded.skipped.len()),
        );
    }

    for source in &loaded.tables {
        let columns = source.column_names();
        let preview: Vec<&str> = columns.iter().take(10).map(|c| c.as_str()).collect();
        let more = if columns.len() > preview.len() { ", ..." } else { "" };
        println!(
            "\n    {} {} {}",
            style("✧").cyan(),
            style(&source.name).bold(),
            style(source.path.display()).dim()
        );
        println!("      Shape: {} rows x {} columns", source.rows(), columns.len());
        println!("      Columns: {}{}", preview.join(", "), more);
    }
    for skipped in &loaded.skipped {
        print_warning(&format!(
            "Skipped {}: {}",
            skipped.path.display(),
            skipped.reason
        ));
    }

    let mut summary = CombineSummary::new(&loaded);
    print_step_time(step_start.elapsed());

    // Step 2: Standardize each source onto the canonical schema
    print_step_header(2, "Standardize Sources");

    let step_start = Instant::now();
    let mut rng = seeded_rng(config.seed);
    let progress = create_progress_bar(loaded.tables.len() as u64, "Standardizing");
    let mut standardized = Vec::with_capacity(loaded.tables.len());
    let mut outcomes = Vec::with_capacity(loaded.tables.len());
    for source in &loaded.tables {
        progress.set_message(source.name.clone());
        let (df, outcome) = standardize_source(source, &mut rng)?;
        standardized.push(df);
        outcomes.push(outcome);
        progress.inc(1);
    }
    finish_with_success(&progress, "Sources standardized");

    for outcome in &outcomes {
        print_info(&format!(
            "{}: {} mapped, {} unmapped, {} rescaled, {} defaulted",
            outcome.name,
            outcome.mapping.renamed.len(),
            outcome.mapping.unmapped.len(),
            outcome.rescaled.len(),
            outcome.synthesized.len()
        ));
    }
    summary.add_sources(&outcomes);
    print_step_time(step_start.elapsed());

    // Step 3: Merge, derive composites, validate
    print_step_header(3, "Merge & Validate");

    let step_start = Instant::now();
    let spinner = create_spinner("Merging sources...");
    let (mut canonical, validation) = assemble_canonical(&standardized)?;
    finish_with_success(&spinner, "Canonical table assembled");

    if validation.duplicates_removed > 0 {
        print_count("duplicate row(s) removed", validation.duplicates_removed, None);
    }
    let students = canonical.height();
    summary.add_validation(&validation, students);
    print_success(&format!("{} students in combined dataset", students));
    print_step_time(step_start.elapsed());

    // Step 4: Save output
    print_step_header(4, "Save Results");

    let step_start = Instant::now();
    let spinner = create_spinner("Writing output file...");
    write_canonical_csv(&mut canonical, &config.output)?;
    finish_with_success(
        &spinner,
        &format!("Saved to {}", config.output.display()),
    );

    if let Some(report_path) = &config.report {
        let report = RunReport::new(
            config.seed,
            &config.output,
            &loaded,
            &outcomes,
            &validation,
            students,
        );
        export_run_report(&report, report_path)?;
        print_success(&format!("Run report written to {}", report_path.display()));
    }
    summary.set_output(config.output.clone());
    print_step_time(step_start.elapsed());

    display_preview(&canonical)?;

    summary.display();
    print_completion();

    Ok(())
}
