//! Structured logging setup on `tracing-subscriber`.
//!
//! Filtering follows `RUST_LOG` and defaults to `info`. Output is either JSON
//! lines (for log shippers) or the human-readable formatter.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Log format: JSON for production, pretty-print for development
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber.
///
/// Returns `false` if a subscriber was already installed (e.g. by a test
/// harness); the existing one is kept.
pub fn init_logging(format: LogFormat) -> bool {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_target(false);
    let result = match format {
        LogFormat::Json => builder.json().with_current_span(false).try_init(),
        LogFormat::Pretty => builder.compact().try_init(),
    };
    result.is_ok()
}
