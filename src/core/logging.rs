//! Tracing setup
//!
//! Logs go to stderr so stdout stays reserved for command output and the
//! MCP stdio transport.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding the log filter (e.g. `coursetag=debug`)
pub const LOG_ENV: &str = "COURSETAG_LOG";

pub fn init(verbose: bool) {
    let default_level = if verbose { "coursetag=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}
