//! Optional log output for the dashboard binary and embedding hosts.
//!
//! The library only emits `tracing` events. Installing a subscriber is left to
//! the process; this module offers a stderr default behind the `telemetry` feature.

/// Filter used when `RUST_LOG` is unset or unparsable.
#[cfg(feature = "telemetry")]
const DEFAULT_DIRECTIVE: &str = "info";

/// Installs a compact stderr subscriber filtered by `RUST_LOG`.
///
/// Returns `false` without the `telemetry` feature, or when the process
/// already has a global subscriber.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
