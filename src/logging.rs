// src/logging.rs
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "polls_forms=info,tower_http=info";

/// Installs the global subscriber. `RUST_LOG` overrides the default filter.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // A second call (tests, embedding) keeps the first subscriber.
    let _ = fmt().with_env_filter(filter).with_target(true).try_init();
}
