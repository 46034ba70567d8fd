use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::retry::{PolicyError, RetryPolicy};

/// Retry policy parameters (`[retry]` in config.toml). Missing keys take the
/// built-in defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Delay before the first retry, in milliseconds.
    pub base_delay_ms: u64,
    /// Upper bound on any backoff delay, in milliseconds.
    pub max_delay_ms: u64,
    /// Multiplier applied to the delay after each retry.
    pub backoff_factor: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        let p = RetryPolicy::default();
        Self {
            max_retries: p.max_retries,
            base_delay_ms: p.base_delay.as_millis() as u64,
            max_delay_ms: p.max_delay.as_millis() as u64,
            backoff_factor: p.backoff_factor,
        }
    }
}

impl TryFrom<&RetryConfig> for RetryPolicy {
    type Error = PolicyError;

    fn try_from(cfg: &RetryConfig) -> Result<Self, Self::Error> {
        let policy = RetryPolicy {
            max_retries: cfg.max_retries,
            base_delay: Duration::from_millis(cfg.base_delay_ms),
            max_delay: Duration::from_millis(cfg.max_delay_ms),
            backoff_factor: cfg.backoff_factor,
        };
        policy.validate()?;
        Ok(policy)
    }
}

/// HTTP transport settings (`[http]` in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Connect timeout per attempt, in seconds.
    pub connect_timeout_secs: u64,
    /// Whole-transfer timeout per attempt, in seconds.
    pub timeout_secs: u64,
    /// Optional User-Agent header.
    pub user_agent: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 10,
            timeout_secs: 30,
            user_agent: None,
        }
    }
}

/// Global configuration loaded from `~/.config/pousada/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PousadaConfig {
    #[serde(default)]
    pub retry: RetryConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

impl PousadaConfig {
    /// Validated retry policy from the `[retry]` section.
    pub fn retry_policy(&self) -> Result<RetryPolicy> {
        RetryPolicy::try_from(&self.retry).context("invalid [retry] section")
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("pousada")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<PousadaConfig> {
    load_or_init_at(&config_path()?)
}

/// Like [`load_or_init`] with an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<PousadaConfig> {
    if !path.exists() {
        let default_cfg = PousadaConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml).with_context(|| format!("write {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: PousadaConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = PousadaConfig::default();
        assert_eq!(cfg.retry.max_retries, 3);
        assert_eq!(cfg.retry.base_delay_ms, 1000);
        assert_eq!(cfg.retry.max_delay_ms, 10_000);
        assert_eq!(cfg.retry.backoff_factor, 2.0);
        assert_eq!(cfg.http.timeout_secs, 30);
        assert_eq!(cfg.retry_policy().unwrap(), RetryPolicy::default());
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = PousadaConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: PousadaConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn partial_retry_section_merges_over_defaults() {
        let toml = r#"
            [retry]
            max_retries = 5
            base_delay_ms = 250
        "#;
        let cfg: PousadaConfig = toml::from_str(toml).unwrap();
        let policy = cfg.retry_policy().unwrap();
        assert_eq!(policy.max_retries, 5);
        assert_eq!(policy.base_delay, Duration::from_millis(250));
        assert_eq!(policy.max_delay, Duration::from_millis(10_000));
        assert_eq!(policy.backoff_factor, 2.0);
        assert_eq!(cfg.http, HttpConfig::default());
    }

    #[test]
    fn invalid_retry_section_rejected() {
        let toml = r#"
            [retry]
            base_delay_ms = 5000
            max_delay_ms = 100
        "#;
        let cfg: PousadaConfig = toml::from_str(toml).unwrap();
        assert!(cfg.retry_policy().is_err());
    }

    #[test]
    fn http_section() {
        let toml = r#"
            [http]
            timeout_secs = 5
            user_agent = "pousada-admin/1.0"
        "#;
        let cfg: PousadaConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.http.timeout_secs, 5);
        assert_eq!(cfg.http.connect_timeout_secs, 10);
        assert_eq!(cfg.http.user_agent.as_deref(), Some("pousada-admin/1.0"));
    }

    #[test]
    fn load_or_init_creates_then_reads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let created = load_or_init_at(&path).unwrap();
        assert!(path.exists());
        assert_eq!(created, PousadaConfig::default());

        fs::write(&path, "[retry]\nmax_retries = 0\n").unwrap();
        let loaded = load_or_init_at(&path).unwrap();
        assert_eq!(loaded.retry.max_retries, 0);
    }
}
