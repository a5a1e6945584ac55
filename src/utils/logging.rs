//! Logging setup for the binaries.
//!
//! Library code only emits `tracing` events; installing a subscriber is the
//! executable's job. Filtering follows `RUST_LOG`, defaulting to `info`.

use tracing_subscriber::EnvFilter;

/// Installs a formatted stderr subscriber. Safe to call more than once; only
/// the first call has an effect.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::init_logging;

    #[test]
    fn repeated_initialisation_is_harmless() {
        init_logging();
        init_logging();
        tracing::info!("logging initialised twice");
    }
}
