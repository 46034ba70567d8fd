//! CLI for the pousada retry executor.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use pousada_core::config::{self, PousadaConfig};
use pousada_core::http::Method;
use pousada_core::retry::RetryPolicy;
use std::time::Duration;

use commands::{run_backoff, run_completions, run_config, run_fetch};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "pousada")]
#[command(about = "Retry-with-backoff HTTP and backend calls for the pousada site", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

/// Per-invocation overrides merged over the `[retry]` config section.
#[derive(Debug, Clone, Default, PartialEq, Args)]
pub struct RetryArgs {
    /// Retries after the first attempt.
    #[arg(long, value_name = "N")]
    pub max_retries: Option<u32>,
    /// Delay before the first retry, in milliseconds.
    #[arg(long, value_name = "MS")]
    pub base_delay_ms: Option<u64>,
    /// Cap on any single delay, in milliseconds.
    #[arg(long, value_name = "MS")]
    pub max_delay_ms: Option<u64>,
    /// Multiplier applied to the delay after each retry.
    #[arg(long, value_name = "F")]
    pub factor: Option<f64>,
}

impl RetryArgs {
    /// Config policy with any flags given on the command line applied on top.
    pub fn policy(&self, cfg: &PousadaConfig) -> Result<RetryPolicy> {
        let mut policy = cfg.retry_policy()?;
        if let Some(n) = self.max_retries {
            policy = policy.with_max_retries(n);
        }
        if let Some(ms) = self.base_delay_ms {
            policy = policy.with_base_delay(Duration::from_millis(ms));
        }
        if let Some(ms) = self.max_delay_ms {
            policy = policy.with_max_delay(Duration::from_millis(ms));
        }
        if let Some(f) = self.factor {
            policy = policy.with_backoff_factor(f);
        }
        policy.validate()?;
        Ok(policy)
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Fetch a JSON endpoint, retrying transient failures, and print the body.
    Fetch {
        /// HTTP/HTTPS URL to call.
        url: String,
        /// Request method.
        #[arg(long, short = 'X', default_value = "GET")]
        method: Method,
        /// Extra header as "Name: value" (repeatable).
        #[arg(long = "header", short = 'H', value_name = "NAME: VALUE", value_parser = parse_header)]
        headers: Vec<(String, String)>,
        /// JSON request body.
        #[arg(long, short = 'd')]
        data: Option<String>,
        #[command(flatten)]
        retry: RetryArgs,
    },

    /// Print the delay before every attempt the retry policy allows.
    Backoff {
        #[command(flatten)]
        retry: RetryArgs,
    },

    /// Show the config file path and effective settings.
    Config,

    /// Print a shell completion script to stdout.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

/// Parse a `Name: value` header argument.
fn parse_header(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once(':')
        .ok_or_else(|| format!("expected \"Name: value\", got {:?}", s))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("empty header name in {:?}", s));
    }
    Ok((name.to_string(), value.trim().to_string()))
}

fn load_config() -> Result<PousadaConfig> {
    let cfg = config::load_or_init()?;
    tracing::debug!("loaded config: {:?}", cfg);
    Ok(cfg)
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Fetch {
                url,
                method,
                headers,
                data,
                retry,
            } => {
                let cfg = load_config()?;
                let policy = retry.policy(&cfg)?;
                run_fetch(&cfg, policy, &url, method, headers, data.as_deref()).await?;
            }
            CliCommand::Backoff { retry } => run_backoff(&retry.policy(&load_config()?)?),
            CliCommand::Config => run_config(&load_config()?)?,
            CliCommand::Completions { shell } => run_completions(shell),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
