//! Log subscriber setup for the binary.
//!
//! Library crates only emit `tracing` events; this is the one place a
//! subscriber gets installed. `RUST_LOG` wins over the `--log-level` flag.

use anyhow::Context;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Filter from `RUST_LOG`, falling back to `level`.
pub fn env_filter(level: &str) -> anyhow::Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(level).with_context(|| format!("invalid log level '{level}'")),
    }
}

/// Install a compact stderr subscriber. Stdout stays free for the summary.
pub fn init(level: &str) -> anyhow::Result<()> {
    Registry::default()
        .with(env_filter(level)?)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .compact(),
        )
        .try_init()
        .context("failed to install log subscriber")
}
