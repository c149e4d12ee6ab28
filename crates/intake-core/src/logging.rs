//! Logging bootstrap
//!
//! The engine only emits `tracing` events; binaries and test suites that want to see
//! them install a subscriber through this module.

use tracing_subscriber::{fmt, EnvFilter};

/// Install the process-wide subscriber.
///
/// Honours `RUST_LOG` (for example `RUST_LOG=intake_rules=debug`) and falls back to `info`.
/// Returns `false` when a subscriber was already installed.
pub fn init() -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .try_init()
        .is_ok()
}

/// Subscriber for test suites: `debug` level, captured by the test harness.
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_repeatable() {
        init();
        assert!(!init());
        init_test();
        tracing::info!("subscriber installed");
    }
}
