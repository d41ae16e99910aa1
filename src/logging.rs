//! Logging initialization
//!
//! Discovery warnings and the resolved-application summary go through
//! `tracing`. The binary installs a stderr subscriber; library users bring
//! their own.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter when `RUST_LOG` is not set
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose { "relasm=debug" } else { "relasm=warn" }
}

/// Install the global subscriber
///
/// `RUST_LOG` takes precedence over `--verbose`. `NO_COLOR` disables ANSI
/// colors. Calling this twice is a no-op.
pub fn init_logging(verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_ansi(std::env::var_os("NO_COLOR").is_none()),
        )
        .with(env_filter)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        assert_eq!(default_filter(false), "relasm=warn");
        assert_eq!(default_filter(true), "relasm=debug");
    }

    #[test]
    fn test_init_logging_twice_is_harmless() {
        init_logging(false);
        init_logging(true);
    }
}
