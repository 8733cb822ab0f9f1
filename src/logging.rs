use anyhow::{anyhow, Result};
use std::path::Path;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Log file written inside the data directory
pub const LOG_FILE_NAME: &str = "studycal.log";

/// Filter level for a `-v` count when RUST_LOG is not set
pub fn default_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Send tracing output to `<dir>/studycal.log`. The terminal belongs to the
/// TUI, so nothing is written to stdout/stderr.
pub fn init_tracing(dir: &Path, verbose: u8) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level(verbose)))
        .map_err(|e| anyhow!("invalid RUST_LOG / log filter: {e}"))?;

    let appender = tracing_appender::rolling::never(dir, LOG_FILE_NAME);

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(appender)
        .with_target(true)
        .with_ansi(false)
        .try_init();

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }

    Ok(())
}
