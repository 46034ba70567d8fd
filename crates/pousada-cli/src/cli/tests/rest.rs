//! Tests for backoff, config and completions subcommands, and retry flag merging.

use super::parse;
use crate::cli::{CliCommand, RetryArgs};
use clap_complete::Shell;
use pousada_core::config::PousadaConfig;
use std::time::Duration;

#[test]
fn cli_parse_backoff() {
    match parse(&[
        "pousada",
        "backoff",
        "--max-retries",
        "3",
        "--base-delay-ms",
        "1000",
        "--max-delay-ms",
        "2000",
        "--factor",
        "4",
    ]) {
        CliCommand::Backoff { retry } => {
            assert_eq!(retry.max_retries, Some(3));
            assert_eq!(retry.max_delay_ms, Some(2000));
            assert_eq!(retry.factor, Some(4.0));
        }
        _ => panic!("expected Backoff"),
    }
}

#[test]
fn cli_parse_config() {
    assert!(matches!(parse(&["pousada", "config"]), CliCommand::Config));
}

#[test]
fn cli_parse_completions() {
    match parse(&["pousada", "completions", "bash"]) {
        CliCommand::Completions { shell } => assert_eq!(shell, Shell::Bash),
        _ => panic!("expected Completions"),
    }
}

#[test]
fn retry_args_override_config() {
    let cfg = PousadaConfig::default();
    let args = RetryArgs {
        max_retries: Some(1),
        max_delay_ms: Some(1500),
        ..RetryArgs::default()
    };
    let policy = args.policy(&cfg).unwrap();
    assert_eq!(policy.max_retries, 1);
    assert_eq!(policy.base_delay, Duration::from_millis(1000));
    assert_eq!(policy.max_delay, Duration::from_millis(1500));
    assert_eq!(policy.backoff_factor, 2.0);
}

#[test]
fn retry_args_validated() {
    let args = RetryArgs {
        factor: Some(0.5),
        ..RetryArgs::default()
    };
    assert!(args.policy(&PousadaConfig::default()).is_err());
}
