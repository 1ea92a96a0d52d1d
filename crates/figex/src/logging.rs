use tracing_subscriber::EnvFilter;

use crate::config::Verbosity;

/// Install the global stderr subscriber. `RUST_LOG`, when set, wins over
/// `verbosity`.
pub fn init(verbosity: Verbosity) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(verbosity.filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(console::colors_enabled_stderr())
        .with_target(false)
        .without_time()
        .try_init()
}
