//! Tracing setup for hosts embedding `magic-circle`.
//!
//! Setup is opt-in. Hosts either call `init_default_tracing` or install
//! their own `tracing` subscriber; composition stage skips are logged at
//! `trace`, composed summaries at `debug`.

/// Installs a compact `tracing` subscriber when the `telemetry` feature is on.
///
/// Honors `RUST_LOG`, defaulting to `info`. Returns `false` when the feature
/// is disabled or the host already set a global subscriber.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
