//! Logging configuration using tracing

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

pub const ENV_LOG_FORMAT: &str = "DONPAPI_LOG_FORMAT";

/// Initialize the logging system.
///
/// Everything goes to stderr: stdout carries the MCP stdio transport.
pub fn init(json: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_ansi(false)
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    }

    Ok(())
}

/// Whether `DONPAPI_LOG_FORMAT` asks for JSON lines
pub fn json_requested() -> bool {
    std::env::var(ENV_LOG_FORMAT).is_ok_and(|v| v.trim().eq_ignore_ascii_case("json"))
}
