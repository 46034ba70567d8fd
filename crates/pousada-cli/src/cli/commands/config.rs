//! `pousada config` – show where the config lives and what it resolves to.

use anyhow::Result;
use pousada_core::config::{self, PousadaConfig};

pub fn run_config(cfg: &PousadaConfig) -> Result<()> {
    println!("config: {}", config::config_path()?.display());
    println!("[retry]");
    println!("  max_retries    = {}", cfg.retry.max_retries);
    println!("  base_delay_ms  = {}", cfg.retry.base_delay_ms);
    println!("  max_delay_ms   = {}", cfg.retry.max_delay_ms);
    println!("  backoff_factor = {}", cfg.retry.backoff_factor);
    println!("[http]");
    println!("  connect_timeout_secs = {}", cfg.http.connect_timeout_secs);
    println!("  timeout_secs         = {}", cfg.http.timeout_secs);
    println!(
        "  user_agent           = {}",
        cfg.http.user_agent.as_deref().unwrap_or("(curl default)")
    );
    if let Err(e) = cfg.retry_policy() {
        println!("warning: {:#}", e);
    }
    Ok(())
}
