//! CLI command handlers, one per file.

mod backoff;
mod completions;
mod config;
mod fetch;

pub use backoff::run_backoff;
pub use completions::run_completions;
pub use config::run_config;
pub use fetch::run_fetch;
