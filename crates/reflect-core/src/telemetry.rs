//! Log subscriber setup.

use tracing_subscriber::EnvFilter;

use crate::storage::LoggingConfig;

/// Install a global fmt subscriber.
///
/// `RUST_LOG` overrides `config.filter`; an unparsable filter falls back to
/// `info`. Returns `false` if a subscriber was already installed.
pub fn init(config: &LoggingConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}
