//! Tracing setup for the profilectl CLI
//!
//! Usage:
//!   profilectl --debug ...                        # Debug logging
//!   RUST_LOG=profilectl_store=debug profilectl    # Fine-grained log control
//!
//! Logs go to stderr so stdout stays clean for `--json` output.

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Tracing configuration options
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Enable debug logging (unless RUST_LOG is explicitly set)
    pub debug: bool,
    /// Filter used when neither RUST_LOG nor --debug is given
    pub default_level: String,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            debug: false,
            default_level: "info".to_string(),
        }
    }
}

impl TracingConfig {
    fn fallback_directive(&self) -> &str {
        if self.debug {
            "debug"
        } else {
            &self.default_level
        }
    }
}

/// Initialize console tracing
pub fn init(config: &TracingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.fallback_directive()))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.debug) // Show targets in debug mode
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}
