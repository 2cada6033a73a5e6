//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Initialize the Ripple tracing/logging system.
///
/// Reads the `RIPPLE_LOG` environment variable for per-target log levels,
/// e.g. `RIPPLE_LOG=ripple_inspect=debug,ripple_analysis=warn`.
/// Falls back to `ripple=info` if `RIPPLE_LOG` is unset or invalid.
///
/// Idempotent. A subscriber installed by the host process wins.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("RIPPLE_LOG")
            .unwrap_or_else(|_| EnvFilter::new("ripple=info"));

        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}
