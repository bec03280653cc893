//! Structured logging setup.
//!
//! Thin initializer over `tracing-subscriber`. The `TREESUM_LOG` environment
//! variable takes precedence over the level passed by the caller and accepts
//! full `EnvFilter` directives (e.g. `treesum::pool=trace`).

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Initialize the global tracing subscriber.
///
/// Idempotent: a second call is a no-op, so tests and embedding callers can
/// both invoke it safely.
pub fn init(default_level: &str) {
    let filter = EnvFilter::try_from_env("TREESUM_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = Registry::default()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .try_init();
}
