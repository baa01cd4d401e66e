//! Diagnostic logging setup.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the filter directive (`debug`, `agendavet=trace`, ...).
pub const LOG_ENV_VAR: &str = "AGENDAVET_LOG";
const DEFAULT_DIRECTIVE: &str = "warn";

/// Filter from [`LOG_ENV_VAR`], or `warn` when unset or unparsable.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Install the global subscriber, writing to stderr.
pub fn setup(ansi: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_ansi(ansi)
        .with_target(false)
        .compact()
        .try_init()
}
