use std::io;
use tracing_subscriber::{fmt, EnvFilter};

fn env_filter_or(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter))
}

/// Initialize tracing subscriber with sensible defaults and stdout writer.
/// - Respects `RUST_LOG` if set
/// - Falls back to `info,tower_http=info,axum=info`
/// - Writes to stdout to improve visibility in environments that hide stderr
pub fn init_logging_default() {
    let _ = fmt()
        .with_env_filter(env_filter_or("info,tower_http=info,axum=info"))
        .with_target(false)
        .compact()
        .with_writer(io::stdout)
        .try_init();
}

/// Compact logging to stderr with a caller-chosen fallback filter.
///
/// Command-line tools print their results on stdout, so logs must not mix in.
pub fn init_logging_with(default_filter: &str) {
    let _ = fmt()
        .with_env_filter(env_filter_or(default_filter))
        .with_target(false)
        .compact()
        .with_writer(io::stderr)
        .try_init();
}

/// Initialize tracing subscriber with JSON structured output.
/// - Respects `RUST_LOG` if set, defaults to `info`
/// - Emits structured JSON logs for better machine parsing
/// - Writes to stdout for consistent container logging behavior
pub fn init_logging_json() {
    // store mutations log at debug: RUST_LOG=info,service::storage=debug
    let _ = fmt()
        .with_env_filter(env_filter_or("info"))
        .with_target(true)
        .json()
        .with_writer(io::stdout)
        .try_init();
}

/// JSON output when `LOG_FORMAT=json`, compact otherwise.
pub fn init_logging_from_env() {
    match std::env::var("LOG_FORMAT") {
        Ok(format) if format.eq_ignore_ascii_case("json") => init_logging_json(),
        _ => init_logging_default(),
    }
}
