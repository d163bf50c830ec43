//! Tracing subscriber setup for applications using the search client.

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Default filter directive for the given logging configuration.
pub fn default_filter(logging: &LoggingConfig) -> &'static str {
    if logging.debug {
        "debug"
    } else {
        "info"
    }
}

/// Install a stdout `fmt` subscriber.
///
/// `RUST_LOG` takes precedence over the level derived from `logging`.
/// Returns `false` if a global subscriber was already installed.
pub fn init_tracing(logging: &LoggingConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(logging)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stdout)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        assert_eq!(default_filter(&LoggingConfig::disabled()), "info");
        assert_eq!(default_filter(&LoggingConfig::from_verbosity(4)), "debug");
    }

    #[test]
    fn test_init_tracing_only_once() {
        let logging = LoggingConfig::disabled();
        let _ = init_tracing(&logging);
        assert!(!init_tracing(&logging));
    }
}
