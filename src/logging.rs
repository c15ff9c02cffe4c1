//! Tracing setup for the command line tool.
//!
//! Logging is opt-in: the subscriber is only installed when
//! `PHPANTOM_LOG` or `RUST_LOG` is set.  Both take the usual filter
//! syntax (`debug`, `phpantom_stubgen::alias=trace`); `PHPANTOM_LOG`
//! wins when both are present.  Output always goes to stderr so a helper
//! file piped to stdout is never mixed with log lines.

use tracing_subscriber::EnvFilter;

/// Environment variable read before `RUST_LOG`.
pub const LOG_ENV: &str = "PHPANTOM_LOG";

fn build_filter() -> Option<EnvFilter> {
    if let Ok(val) = std::env::var(LOG_ENV) {
        return Some(EnvFilter::builder().parse_lossy(val));
    }
    std::env::var("RUST_LOG")
        .is_ok()
        .then(EnvFilter::from_default_env)
}

/// Install the global subscriber, if logging was requested.
pub fn init() {
    let Some(filter) = build_filter() else {
        return;
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}
