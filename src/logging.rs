//! Diagnostic logging setup for host binaries and tests.
//!
//! The engine itself only emits `tracing` events; installing a subscriber is
//! the host's choice. `RUST_LOG` overrides the level passed here.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Install a global fmt subscriber with env-filter support.
///
/// Safe to call once per process; a second call reports the underlying
/// subscriber error.
pub fn init_logging(default_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;

    Ok(())
}
