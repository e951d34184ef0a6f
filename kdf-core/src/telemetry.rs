//! Logging initialization.
//!
//! Library code only emits `tracing` events; binaries call [`init_logging`]
//! once to print them on stderr.

use crate::error::{KdfError, KdfResult};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Build the event filter. `RUST_LOG` wins over `default_level` when set.
pub fn env_filter(default_level: &str) -> KdfResult<EnvFilter> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| KdfError::Config(format!("invalid log filter '{}': {}", default_level, e)))
}

/// Install a stderr subscriber filtered at `default_level`.
pub fn init_logging(default_level: &str) -> KdfResult<()> {
    let filter = env_filter(default_level)?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init()
        .map_err(|e| KdfError::Config(e.to_string()))
}
