//! Tracing initialization.

use std::sync::Once;

use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub const LOG_ENV: &str = "VOYAGE_LOG";
pub const DEFAULT_LOG_FILTER: &str = "voyage_estimator=info";

static INIT: Once = Once::new();

/// Install the global subscriber. Reads `VOYAGE_LOG` (e.g.
/// `voyage_estimator=debug,voyage_estimator::crew=trace`) and falls back to
/// `voyage_estimator=info`. Events go to stderr so command output on stdout
/// stays machine-readable. Safe to call more than once.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

        let installed = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(true),
            )
            .with(filter)
            .try_init();
        if let Err(err) = installed {
            debug!(error = %err, "global tracing subscriber already set");
        }
    });
}
