//! Logging for the quill session
//!
//! Two sinks:
//! - stderr, filtered by `RUST_LOG` (default `warn`), so log lines stay out of
//!   the session output on stdout. `RUST_LOG=quill::update=debug` shows why a
//!   late result was dropped.
//! - a daily file under the logs dir (see `config_paths`), always at debug.
//!
//! If the logs dir cannot be created the session runs with stderr only.

use ::tracing::Subscriber;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, registry::LookupSpan, util::SubscriberInitExt, EnvFilter, Layer,
};

use crate::config_paths;

const DEFAULT_CONSOLE_FILTER: &str = "warn";
const FILE_FILTER: &str = "debug";

/// Install the global subscriber. Call once, before the session starts.
pub fn init() {
    tracing_subscriber::registry()
        .with(console_layer())
        .with(file_layer())
        .init();
}

fn console_layer<S>() -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_CONSOLE_FILTER));
    fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(filter)
}

fn file_layer<S>() -> Option<impl Layer<S>>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let logs_dir = match config_paths::ensure_logs_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("warning: file logging disabled: {}", e);
            return None;
        }
    };
    let appender = tracing_appender::rolling::daily(logs_dir, config_paths::LOG_FILE_PREFIX);
    Some(
        fmt::layer()
            .with_writer(appender)
            .with_ansi(false)
            .with_target(true)
            .with_line_number(true)
            .with_filter(EnvFilter::new(FILE_FILTER)),
    )
}
