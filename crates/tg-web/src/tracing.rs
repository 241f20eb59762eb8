//! Tracing and logging configuration.
//!
//! Development gets human-readable output, production gets flattened JSON
//! lines. `RUST_LOG` overrides the default filter in both.

use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Environment;

const DEVELOPMENT_FILTER: &str = "debug,tg_web=debug,tg_flickr=debug,tower_http=debug,hyper=info,reqwest=info";
const PRODUCTION_FILTER: &str = "info,tower_http=info,hyper=warn,reqwest=warn";

/// Install the global subscriber for `env`.
///
/// # Development Mode
/// - Pretty-printed logs with file locations and line numbers
/// - Default level: DEBUG, including both workspace crates
///
/// # Production Mode
/// - One flattened JSON object per line
/// - Default level: INFO; `hyper` and `reqwest` only at WARN
/// - Events carry the enclosing span list, so fetch logs include the
///   `request_id` of the page view that started them
///
/// # Environment Variables
/// - `RUST_LOG`: overrides the default filter (e.g. `RUST_LOG=info,tg_flickr=debug`)
///
/// Panics if a global subscriber is already set.
pub fn init_tracing(env: &Environment) {
    if env.is_development() {
        init_development_tracing();
    } else {
        init_production_tracing();
    }
}

fn filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Pretty, human-readable output
fn init_development_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_line_number(true)
                .with_file(true)
                .pretty()
                .with_filter(filter(DEVELOPMENT_FILTER)),
        )
        .init();

    tracing::info!("Tracing initialized in development mode");
}

/// JSON output for log aggregation
fn init_production_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .flatten_event(true)
                .with_target(true)
                .with_filter(filter(PRODUCTION_FILTER)),
        )
        .init();

    tracing::info!("Tracing initialized in production mode");
}
