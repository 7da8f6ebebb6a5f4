//! Tracing subscriber setup.
//!
//! The crate logs through `tracing` macros everywhere; installing a
//! subscriber is the embedder's choice. Hosts that want the built-in one
//! call [`init_tracing`] once at startup and get level-filtered, formatted
//! output on stderr. Hosts with their own subscriber simply skip this
//! module and the crate's spans flow into theirs.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::Config;

/// Installs a formatted stderr subscriber filtered by `config.trace_level`.
///
/// The level falls back to `"info"` when unset; the string accepts full
/// `EnvFilter` directives, so `"trailhead=trace"` works too. Idempotent:
/// a second call (or a subscriber installed by the embedder first) leaves
/// the existing subscriber in place.
///
/// # Example
///
/// ```
/// use trailhead::observability::init_tracing;
/// use trailhead::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config
        .trace_level
        .clone()
        .unwrap_or_else(|| "info".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    let _ = subscriber.try_init();
}
