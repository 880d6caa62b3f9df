//! Tracing subscriber setup for the CLI.

use std::io;

use tracing_subscriber::{filter::EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::GlobalArgs;

/// Crates whose events are shown by default.
const CRATES: &[&str] = &["ember", "ember_cache", "ember_common", "ember_config", "ember_net"];

/// Returns the default level implied by `--quiet` and `--verbose`.
pub fn default_level(global: &GlobalArgs) -> &'static str {
    if global.quiet {
        "error"
    } else if global.verbose {
        "debug"
    } else {
        "warn"
    }
}

/// Builds the filter directive for our crates at `level`.
pub fn directive(level: &str) -> String {
    CRATES
        .iter()
        .map(|c| format!("{c}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Installs a compact stderr subscriber. `RUST_LOG` overrides the flags.
pub fn init(global: &GlobalArgs) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(directive(default_level(global))))?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(io::stderr)
                .with_target(false),
        )
        .try_init()?;
    Ok(())
}
