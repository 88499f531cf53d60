//! Diagnostic logging
//!
//! Structured `tracing` output on stderr, separate from the coloured
//! human-facing lines the commands print. The filter comes from
//! `ADDRESSOR_LOG`, then `RUST_LOG`, then the verbosity flag.

use tracing_subscriber::EnvFilter;

/// Environment variable checked before `RUST_LOG`
pub const LOG_ENV: &str = "ADDRESSOR_LOG";

/// Default filter directive for a verbosity count
#[must_use]
pub const fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info,addressor=debug",
        _ => "debug,addressor=trace",
    }
}

/// Install the global subscriber
///
/// Calling it twice is harmless; the second call keeps the first subscriber.
pub fn init_logging(verbose: u8) {
    let env_filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
