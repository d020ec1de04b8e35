// src/logging.rs
// =============================================================================
// Diagnostics setup.
//
// Logs go to stderr through a tracing-subscriber fmt layer so that JSON
// printed to stdout (--json) stays machine-readable.
//
// Filtering:
// - RUST_LOG wins when set (e.g. RUST_LOG=layer_crawler=trace)
// - otherwise this crate logs at info (debug with --verbose), others at warn
// =============================================================================

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

pub fn init(verbose: bool) -> Result<()> {
    let default_directives = if verbose {
        "layer_crawler=debug,warn"
    } else {
        "layer_crawler=info,warn"
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directives))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("Failed to install log subscriber: {e}"))
}
