//! Tracing subscriber setup.
//!
//! Logs always go to stderr so that stdout carries only the success line.

use tracing_subscriber::EnvFilter;

/// Filter used when nothing else is configured.
pub const DEFAULT_FILTER: &str = "warn";

/// Pick the filter directive: `RUST_LOG`, then `-v` count, then the
/// configured filter, then [`DEFAULT_FILTER`].
pub fn filter_directive(env: Option<String>, verbose: u8, configured: Option<&str>) -> String {
    if let Some(directive) = env.filter(|d| !d.trim().is_empty()) {
        return directive;
    }
    match verbose {
        0 => configured.unwrap_or(DEFAULT_FILTER).to_string(),
        1 => "info".to_string(),
        2 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

/// Install the global subscriber.
pub fn init(verbose: u8, configured: Option<&str>) {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let directive = filter_directive(env, verbose, configured);

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directive))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
