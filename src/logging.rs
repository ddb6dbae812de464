//! Structured logging setup for the CLI.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable holding an `EnvFilter` directive that overrides `-v`.
pub const LOG_ENV: &str = "GROVE_LOG";

/// Maps the `-v` count to a filter directive for this crate.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "grove=warn",
        1 => "grove=info",
        2 => "grove=debug",
        _ => "grove=trace",
    }
}

/// Installs the global subscriber. Logs go to stderr so stdout stays
/// parseable.
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init(verbosity: u8) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .try_init()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_level() {
        assert_eq!(default_directive(0), "grove=warn");
        assert_eq!(default_directive(1), "grove=info");
        assert_eq!(default_directive(2), "grove=debug");
        assert_eq!(default_directive(3), "grove=trace");
        assert_eq!(default_directive(9), "grove=trace");
    }
}
