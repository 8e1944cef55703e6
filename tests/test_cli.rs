//! Tests for CLI argument parsing

use clap::Parser;
use mindmerge::cli::{Cli, Commands};
use mindmerge::pipeline::DEFAULT_OUTPUT_NAME;
use std::path::PathBuf;

#[test]
fn test_cli_default_values() {
    let cli = Cli::parse_from(["mindmerge"]);

    assert!(cli.command.is_none());
    assert_eq!(cli.input_dir, PathBuf::from("."));
    assert!(cli.files.is_empty());
    assert_eq!(cli.output, None);
    assert_eq!(cli.seed, 42, "Default seed should be 42");
    assert_eq!(
        cli.infer_schema_length, 10000,
        "Default schema inference should be 10000"
    );
    assert_eq!(cli.report, None);
}

#[test]
fn test_default_output_lives_in_input_dir() {
    let cli = Cli::parse_from(["mindmerge", "-d", "surveys"]);

    assert_eq!(
        cli.output_path(),
        PathBuf::from("surveys").join(DEFAULT_OUTPUT_NAME)
    );
}

#[test]
fn test_explicit_output_used_as_given() {
    let cli = Cli::parse_from(["mindmerge", "-d", "surveys", "-o", "out/all.csv"]);

    assert_eq!(cli.output_path(), PathBuf::from("out/all.csv"));
}

#[test]
fn test_repeatable_file_flag() {
    let cli = Cli::parse_from(["mindmerge", "-f", "a.csv", "--file", "b.csv"]);

    assert_eq!(
        cli.files,
        vec![PathBuf::from("a.csv"), PathBuf::from("b.csv")]
    );
}

#[test]
fn test_combine_config_from_flags() {
    let cli = Cli::parse_from([
        "mindmerge",
        "--input-dir",
        "data",
        "--seed",
        "7",
        "--infer-schema-length",
        "0",
        "--report",
        "run.json",
    ]);

    let config = cli.combine_config();

    assert_eq!(config.input_dir, PathBuf::from("data"));
    assert_eq!(config.output, PathBuf::from("data").join(DEFAULT_OUTPUT_NAME));
    assert_eq!(config.seed, 7);
    assert_eq!(config.infer_schema_length, 0);
    assert_eq!(config.report, Some(PathBuf::from("run.json")));
}

#[test]
fn test_inspect_subcommand() {
    let cli = Cli::parse_from(["mindmerge", "inspect", "-d", "surveys"]);

    match cli.command {
        Some(Commands::Inspect { input_dir, files }) => {
            assert_eq!(input_dir, PathBuf::from("surveys"));
            assert!(files.is_empty());
        }
        None => panic!("expected inspect subcommand"),
    }
}

#[test]
fn test_invalid_seed_rejected() {
    let result = Cli::try_parse_from(["mindmerge", "--seed", "not-a-number"]);

    assert!(result.is_err());
}
