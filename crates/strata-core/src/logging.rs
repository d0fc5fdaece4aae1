use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Filter applied when neither `RUST_LOG` nor a [`Config`] overrides it.
pub const DEFAULT_FILTER: &str = "info,strata_geometry=debug";

/// Install the global fmt subscriber with [`DEFAULT_FILTER`].
///
/// Panics if a global subscriber is already set.
pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(DEFAULT_FILTER))
        .init();
}

/// Install the global fmt subscriber using the filter from `config`.
///
/// Returns `false` if a subscriber was already installed, which makes it
/// safe to call from every test.
pub fn try_init(config: &Config) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(&config.log_filter))
        .with_test_writer()
        .try_init()
        .is_ok()
}

fn env_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}
