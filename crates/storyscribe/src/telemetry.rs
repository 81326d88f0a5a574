//! Logging setup for the binary.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter when `RUST_LOG` is unset.
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "info,storyscribe=debug"
    } else {
        "warn"
    }
}

/// Initialize console logging on stderr.
///
/// `RUST_LOG` takes precedence over the verbosity flag.
pub fn init_console_telemetry(verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_enables_debug_for_workspace_crates() {
        assert_eq!(default_filter(true), "info,storyscribe=debug");
        assert_eq!(default_filter(false), "warn");
    }

    #[test]
    fn test_default_filters_parse() {
        for verbose in [true, false] {
            assert!(EnvFilter::try_new(default_filter(verbose)).is_ok());
        }
    }
}
