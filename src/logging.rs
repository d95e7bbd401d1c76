//! Tracing subscriber setup for the binary.

use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the verbosity flags, e.g. `DOC_DOCTOR_LOG=doc_doctor=trace`.
pub const LOG_ENV_VAR: &str = "DOC_DOCTOR_LOG";

/// Filter directive for a `-v` count: 0 warn, 1 debug, 2+ trace.
/// `quiet` lowers the default to errors only.
#[must_use]
pub const fn default_directive(verbose: u8, quiet: bool) -> &'static str {
    match (verbose, quiet) {
        (0, true) => "error",
        (0, false) => "warn",
        (1, _) => "debug",
        _ => "trace",
    }
}

/// Build the filter, preferring `DOC_DOCTOR_LOG` when it is set and valid.
#[must_use]
pub fn env_filter(verbose: u8, quiet: bool) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)))
}

/// Install the global subscriber. Events go to stderr so stdout stays
/// reserved for reports.
///
/// Calling this twice is harmless; the second call is ignored.
pub fn init(verbose: u8, quiet: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose, quiet))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
