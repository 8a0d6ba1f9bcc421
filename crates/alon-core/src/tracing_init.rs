//! Tracing/logging initialisation for the Alon binaries.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter for the server when `RUST_LOG` is unset.
pub const DEFAULT_SERVER_FILTER: &str = "alon_server=info,alon_core=info,tower_http=info";

/// Initialise the global tracing subscriber.
///
/// * `default_filter` -- used when `RUST_LOG` is unset or unparsable.
/// * `log_json` -- emit one JSON object per event instead of the
///   human-readable format.
///
/// Calling this twice is harmless; the second subscriber is discarded.
pub fn init_tracing(default_filter: &str, log_json: bool) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let registry = tracing_subscriber::registry().with(env_filter);
    let result = if log_json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_current_span(true))
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .try_init()
    };
    if let Err(e) = result {
        tracing::debug!(error = %e, "Tracing subscriber already installed");
    }
}
