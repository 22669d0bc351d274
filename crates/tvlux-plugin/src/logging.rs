//! Logging init: structured logs on stderr.
//!
//! stdout belongs to the host protocol, so nothing may be logged there.

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset
const DEFAULT_FILTER: &str = "info,tvlux_core=debug,tvlux_plugin=debug";

/// Initialize the global tracing subscriber writing to stderr.
pub fn init_logging() -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!("failed to initialize logging: {}", e))?;

    tracing::debug!("tvlux-plugin logging initialized");
    Ok(())
}
