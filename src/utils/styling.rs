//! Terminal styling utilities for step-by-step console output

use console::{style, Emoji};
use std::path::Path;

use crate::pipeline::CombineConfig;

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", ">> ");
pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");
pub static SAVE: Emoji<'_, '_> = Emoji("💾 ", "");
pub static SEED: Emoji<'_, '_> = Emoji("🎲 ", "");
pub static REPORT: Emoji<'_, '_> = Emoji("📄 ", "");

/// Print the application banner
pub fn print_banner(version: &str) {
    let banner = r#"
     __  __ _           _ __  __
    |  \/  (_)_ __   __| |  \/  | ___ _ __ __ _  ___
    | |\/| | | '_ \ / _` | |\/| |/ _ \ '__/ _` |/ _ \
    | |  | | | | | | (_| | |  | |  __/ | | (_| |  __/
    |_|  |_|_|_| |_|\__,_|_|  |_|\___|_|  \__, |\___|
                                          |___/
    "#;

    println!();
    println!("{}", style(banner).cyan().bold());
    println!(
        "    {}",
        style("Many surveys in, one canonical dataset out").dim()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Print configuration card
pub fn print_config(config: &CombineConfig) {
    let box_width = 56;
    let line = "─".repeat(box_width - 2);

    let input = if config.files.is_empty() {
        truncate_path(&config.input_dir, 38)
    } else {
        format!("{} explicit file(s)", config.files.len())
    };

    println!("    ┌{}┐", line);
    println!(
        "    │ {}{}│",
        style("⚙️  Configuration").cyan().bold(),
        " ".repeat(box_width - 20)
    );
    println!("    ├{}┤", line);
    println!("    │  {} Input:  {:<39}│", FOLDER, input);
    println!(
        "    │  {} Output: {:<39}│",
        SAVE,
        truncate_path(&config.output, 38)
    );
    if let Some(report) = &config.report {
        println!(
            "    │  {} Report: {:<39}│",
            REPORT,
            truncate_path(report, 38)
        );
    }
    println!("    ├{}┤", line);
    println!(
        "    │  {} Seed:   {:<39}│",
        SEED,
        style(config.seed).yellow()
    );
    println!("    └{}┘", line);
    println!();
}

/// Print a step header with styling
pub fn print_step_header(step_num: u8, title: &str) {
    println!();
    println!(
        "    {} {} {}",
        style(format!("STEP {}", step_num)).cyan().bold(),
        style("│").dim(),
        style(title).white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {} {}", INFO, message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("    {} {}", style("⚠").yellow().bold(), style(message).yellow());
}

/// Print the final completion message
pub fn print_completion() {
    println!();
    println!(
        "    {} {}",
        ROCKET,
        style("Dataset ready for analysis!").green().bold()
    );
    println!();
}

/// Print a styled count message
pub fn print_count(description: &str, count: usize, detail: Option<&str>) {
    if let Some(info) = detail {
        println!(
            "      Found {} {} {}",
            style(count).yellow().bold(),
            description,
            style(info).dim()
        );
    } else {
        println!("      Found {} {}", style(count).yellow().bold(), description);
    }
}

/// Print elapsed time for a step
pub fn print_step_time(elapsed: std::time::Duration) {
    println!(
        "    {}",
        style(format!("⏱  {:.2}s", elapsed.as_secs_f64())).dim()
    );
}

// Helper functions

fn truncate_path(path: &Path, max_len: usize) -> String {
    let path_str = path.display().to_string();
    truncate_string(&path_str, max_len)
}

fn truncate_string(s: &str, max_len: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= max_len {
        s.to_string()
    } else {
        let tail: String = chars[chars.len() - (max_len - 3)..].iter().collect();
        format!("...{}", tail)
    }
}
