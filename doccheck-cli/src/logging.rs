use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the `-v` derived log filter.
pub const LOG_ENV: &str = "DOCCHECK_LOG";

/// Filter directive for a `-v` count: warnings only by default, then
/// info, debug and trace.
#[must_use]
pub fn level_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the stderr subscriber.
///
/// `DOCCHECK_LOG` wins over `verbose` when it holds a valid filter. Calling
/// this twice is harmless; the second subscriber is ignored.
pub fn init(verbose: u8) {
    let filter = std::env::var(LOG_ENV)
        .ok()
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .unwrap_or_else(|| EnvFilter::new(format!("doccheck={}", level_for(verbose))));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
