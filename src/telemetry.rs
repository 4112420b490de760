//! Tracing subscriber setup.

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Installs the global subscriber.
///
/// `RUST_LOG` directives take precedence over `config.log_level`. `LOG_FORMAT=json`
/// switches to one JSON object per line.
///
/// # Errors
///
/// Returns an error if the filter cannot be parsed or a subscriber is already set.
pub fn init(config: &Config) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .with_context(|| format!("Invalid log filter '{}'", config.log_level))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true);

    let result = if config.log_format == "json" {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result
        .map_err(|e| anyhow::anyhow!(e))
        .context("Failed to install tracing subscriber")
}
