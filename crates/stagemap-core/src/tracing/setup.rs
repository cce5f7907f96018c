//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding the filter directives.
pub const LOG_ENV_VAR: &str = "STAGEMAP_LOG";

/// Initialize the stagemap tracing/logging system.
///
/// Reads `STAGEMAP_LOG` for per-module log levels.
/// Format: `STAGEMAP_LOG=stagemap_analysis::scanner=debug,stagemap_analysis::layout=info`
///
/// Falls back to `stagemap=info` if `STAGEMAP_LOG` is not set or is invalid.
/// Safe to call more than once; only the first call installs a subscriber.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new("stagemap=info"));

        let installed = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();

        // Host process already owns a global subscriber.
        if installed.is_err() {
            tracing::debug!("global tracing subscriber already set");
        }
    });
}
