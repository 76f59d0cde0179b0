//! Tests for the run subcommand and global flags.

use super::{parse, parse_cli};
use crate::cli::{Cli, CliCommand};
use clap::Parser;
use std::path::{Path, PathBuf};

#[test]
fn cli_parse_run_defaults() {
    match parse(&["hlsq", "run"]) {
        CliCommand::Run(args) => {
            assert!(args.jobs.is_none());
            assert!(args.threads.is_none());
            assert!(args.scratch_dir.is_none());
            assert!(args.target_dir.is_none());
            assert!(!args.copy);
            assert!(!args.no_prompt);
        }
        _ => panic!("expected Run"),
    }
}

#[test]
fn cli_parse_run_all_flags() {
    match parse(&[
        "hlsq",
        "run",
        "--jobs",
        "3",
        "--threads",
        "8",
        "--scratch-dir",
        "/tmp/scratch",
        "--target-dir",
        "/mnt/rclone",
        "--copy",
        "--no-prompt",
    ]) {
        CliCommand::Run(args) => {
            assert_eq!(args.jobs, Some(3));
            assert_eq!(args.threads.as_deref(), Some("8"));
            assert_eq!(args.scratch_dir.as_deref(), Some(Path::new("/tmp/scratch")));
            assert_eq!(args.target_dir.as_deref(), Some(Path::new("/mnt/rclone")));
            assert!(args.copy);
            assert!(args.no_prompt);
        }
        _ => panic!("expected Run with flags"),
    }
}

#[test]
fn cli_parse_run_short_jobs_and_negative() {
    match parse(&["hlsq", "run", "-j", "-2"]) {
        CliCommand::Run(args) => assert_eq!(args.jobs, Some(-2)),
        _ => panic!("expected Run with -j"),
    }
}

#[test]
fn run_overrides_map_flags() {
    match parse(&["hlsq", "run", "-j", "4", "--copy"]) {
        CliCommand::Run(args) => {
            let o = args.overrides();
            assert_eq!(o.concurrency, Some(4));
            assert!(o.force_copy);
            assert!(o.thread_hint.is_none());
            assert!(o.queue_file.is_none());
        }
        _ => panic!("expected Run"),
    }
}

#[test]
fn cli_parse_global_flags_after_subcommand() {
    let cli = parse_cli(&[
        "hlsq",
        "run",
        "--config",
        "/etc/hlsq.toml",
        "--queue-file",
        "links.txt",
    ]);
    assert_eq!(cli.config, Some(PathBuf::from("/etc/hlsq.toml")));
    assert_eq!(cli.queue_file, Some(PathBuf::from("links.txt")));
    assert!(matches!(cli.command, CliCommand::Run(_)));
}

#[test]
fn cli_rejects_non_numeric_jobs() {
    assert!(Cli::try_parse_from(["hlsq", "run", "--jobs", "many"]).is_err());
}
