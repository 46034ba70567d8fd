//! Tests for the fetch subcommand.

use super::parse;
use crate::cli::{Cli, CliCommand, RetryArgs};
use clap::Parser;
use pousada_core::http::Method;

#[test]
fn cli_parse_fetch_defaults() {
    match parse(&["pousada", "fetch", "https://api.pousada.test/rest/v1/posts"]) {
        CliCommand::Fetch {
            url,
            method,
            headers,
            data,
            retry,
        } => {
            assert_eq!(url, "https://api.pousada.test/rest/v1/posts");
            assert_eq!(method, Method::Get);
            assert!(headers.is_empty());
            assert!(data.is_none());
            assert_eq!(retry, RetryArgs::default());
        }
        _ => panic!("expected Fetch"),
    }
}

#[test]
fn cli_parse_fetch_full() {
    match parse(&[
        "pousada",
        "fetch",
        "https://api.pousada.test/rest/v1/reservations",
        "-X",
        "post",
        "-H",
        "apikey: anon-key",
        "--header",
        "Prefer:return=representation",
        "-d",
        r#"{"room_id":2}"#,
        "--max-retries",
        "5",
        "--base-delay-ms",
        "200",
    ]) {
        CliCommand::Fetch {
            method,
            headers,
            data,
            retry,
            ..
        } => {
            assert_eq!(method, Method::Post);
            assert_eq!(
                headers,
                vec![
                    ("apikey".to_string(), "anon-key".to_string()),
                    ("Prefer".to_string(), "return=representation".to_string()),
                ]
            );
            assert_eq!(data.as_deref(), Some(r#"{"room_id":2}"#));
            assert_eq!(retry.max_retries, Some(5));
            assert_eq!(retry.base_delay_ms, Some(200));
            assert!(retry.factor.is_none());
        }
        _ => panic!("expected Fetch"),
    }
}

#[test]
fn cli_parse_fetch_rejects_bad_header() {
    assert!(Cli::try_parse_from(["pousada", "fetch", "https://x.test", "-H", "no-colon"]).is_err());
}

#[test]
fn cli_parse_fetch_rejects_bad_method() {
    assert!(Cli::try_parse_from(["pousada", "fetch", "https://x.test", "-X", "BREW"]).is_err());
}
