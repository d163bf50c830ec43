//! Configuration types for the search client.
//!
//! A [`ClientConfig`] is assembled in one pass from the target address, the
//! insecure-TLS flag and a [`LoggingConfig`]. It is immutable once built and
//! consumed by [`SearchClient::from_config`](crate::SearchClient::from_config).

use std::env;
use std::time::Duration;

use crate::errors::ClientError;

/// Default search engine URL used when `SEARCH_URL` is not set.
pub const DEFAULT_SEARCH_URL: &str = "http://localhost:9200";

/// Verbosity at which debug logging is enabled.
pub const DEBUG_VERBOSITY: u8 = 4;

/// Verbosity at which request bodies are logged.
pub const REQUEST_BODY_VERBOSITY: u8 = 5;

/// Verbosity at which response bodies are logged.
pub const RESPONSE_BODY_VERBOSITY: u8 = 6;

/// Which diagnostics the client emits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Attach a request logger and emit per-request debug events.
    pub debug: bool,
    /// Include request bodies in the request log.
    pub request_bodies: bool,
    /// Include response bodies in the request log.
    pub response_bodies: bool,
}

impl LoggingConfig {
    /// No request logging.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Derive logging switches from a numeric verbosity level.
    ///
    /// Each switch turns on once the level reaches its threshold
    /// ([`DEBUG_VERBOSITY`], [`REQUEST_BODY_VERBOSITY`],
    /// [`RESPONSE_BODY_VERBOSITY`]). Body logging requires debug logging,
    /// which always holds since the thresholds are increasing.
    pub fn from_verbosity(level: u8) -> Self {
        Self {
            debug: level >= DEBUG_VERBOSITY,
            request_bodies: level >= REQUEST_BODY_VERBOSITY,
            response_bodies: level >= RESPONSE_BODY_VERBOSITY,
        }
    }
}

/// How the transport picks an HTTP proxy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProxyPolicy {
    /// Honour `HTTP_PROXY`, `HTTPS_PROXY` and `NO_PROXY`.
    #[default]
    FromEnvironment,
    /// Always connect directly.
    Disabled,
}

/// Transport profile used when certificate verification is skipped.
///
/// Only `accept_invalid_certs` reaches the opensearch transport, whose
/// builder does not expose pooling, keep-alive or timeouts. The other
/// fields describe the intended profile and are not applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportSettings {
    pub connect_timeout: Duration,
    pub keep_alive: Duration,
    pub force_http2: bool,
    pub max_idle_connections: usize,
    pub idle_connection_timeout: Duration,
    pub tls_handshake_timeout: Duration,
    pub expect_continue_timeout: Duration,
    /// Accept any server certificate.
    pub accept_invalid_certs: bool,
}

impl TransportSettings {
    /// Transport that skips certificate verification.
    pub fn insecure() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            keep_alive: Duration::from_secs(30),
            force_http2: true,
            max_idle_connections: 100,
            idle_connection_timeout: Duration::from_secs(90),
            tls_handshake_timeout: Duration::from_secs(10),
            expect_continue_timeout: Duration::from_secs(1),
            accept_invalid_certs: true,
        }
    }
}

/// Settings for the request text logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoggerSettings {
    pub request_bodies: bool,
    pub response_bodies: bool,
}

/// Complete configuration for one search client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    address: String,
    insecure_skip_verify: bool,
    metrics_enabled: bool,
    debug_logging: bool,
    transport: Option<TransportSettings>,
    logger: Option<LoggerSettings>,
    proxy: ProxyPolicy,
}

impl ClientConfig {
    /// Build the configuration for a single address.
    ///
    /// Metrics are always enabled. A transport override is present only when
    /// `insecure_skip_verify` is set, and a logger only when
    /// `logging.debug` is set.
    pub fn new(
        address: impl Into<String>,
        insecure_skip_verify: bool,
        logging: LoggingConfig,
    ) -> Self {
        Self {
            address: address.into(),
            insecure_skip_verify,
            metrics_enabled: true,
            debug_logging: logging.debug,
            transport: insecure_skip_verify.then(TransportSettings::insecure),
            logger: logging.debug.then_some(LoggerSettings {
                request_bodies: logging.request_bodies,
                response_bodies: logging.response_bodies,
            }),
            proxy: ProxyPolicy::default(),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `SEARCH_URL`: search engine URL (default: http://localhost:9200)
    /// - `SEARCH_INSECURE_SKIP_VERIFY`: skip certificate verification (default: false)
    /// - `SEARCH_LOG_VERBOSITY`: logging verbosity level (default: 0)
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ClientError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let address = lookup("SEARCH_URL").unwrap_or_else(|| DEFAULT_SEARCH_URL.to_string());

        let insecure = match lookup("SEARCH_INSECURE_SKIP_VERIFY") {
            Some(value) => parse_bool(&value).ok_or_else(|| {
                ClientError::config(format!("Invalid SEARCH_INSECURE_SKIP_VERIFY: {}", value))
            })?,
            None => false,
        };

        let verbosity = match lookup("SEARCH_LOG_VERBOSITY") {
            Some(value) => value.trim().parse::<u8>().map_err(|e| {
                ClientError::config(format!("Invalid SEARCH_LOG_VERBOSITY {:?}: {}", value, e))
            })?,
            None => 0,
        };

        Ok(Self::new(
            address,
            insecure,
            LoggingConfig::from_verbosity(verbosity),
        ))
    }

    /// Use a different proxy policy.
    pub fn with_proxy_policy(mut self, proxy: ProxyPolicy) -> Self {
        self.proxy = proxy;
        self
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn insecure_skip_verify(&self) -> bool {
        self.insecure_skip_verify
    }

    pub fn metrics_enabled(&self) -> bool {
        self.metrics_enabled
    }

    pub fn debug_logging(&self) -> bool {
        self.debug_logging
    }

    /// Transport override, present only for insecure clients.
    pub fn transport(&self) -> Option<&TransportSettings> {
        self.transport.as_ref()
    }

    /// Logger settings, present only when debug logging is on.
    pub fn logger(&self) -> Option<LoggerSettings> {
        self.logger
    }

    pub fn proxy_policy(&self) -> ProxyPolicy {
        self.proxy
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_verbosity_thresholds() {
        assert_eq!(LoggingConfig::from_verbosity(0), LoggingConfig::disabled());
        assert_eq!(LoggingConfig::from_verbosity(3), LoggingConfig::disabled());

        let v4 = LoggingConfig::from_verbosity(4);
        assert!(v4.debug);
        assert!(!v4.request_bodies);
        assert!(!v4.response_bodies);

        let v5 = LoggingConfig::from_verbosity(5);
        assert!(v5.debug && v5.request_bodies);
        assert!(!v5.response_bodies);

        let v6 = LoggingConfig::from_verbosity(6);
        assert!(v6.debug && v6.request_bodies && v6.response_bodies);
    }

    #[test]
    fn test_secure_config_has_no_transport_override() {
        let config =
            ClientConfig::new("https://es.example.com:9200", false, LoggingConfig::disabled());

        assert_eq!(config.address(), "https://es.example.com:9200");
        assert!(config.metrics_enabled());
        assert!(!config.debug_logging());
        assert!(config.transport().is_none());
        assert!(config.logger().is_none());
        assert_eq!(config.proxy_policy(), ProxyPolicy::FromEnvironment);
    }

    #[test]
    fn test_insecure_config_transport_values() {
        let config =
            ClientConfig::new("https://es.example.com:9200", true, LoggingConfig::disabled());
        let transport = config.transport().unwrap();

        assert!(transport.accept_invalid_certs);
        assert!(transport.force_http2);
        assert_eq!(transport.connect_timeout, Duration::from_secs(30));
        assert_eq!(transport.keep_alive, Duration::from_secs(30));
        assert_eq!(transport.max_idle_connections, 100);
        assert_eq!(transport.idle_connection_timeout, Duration::from_secs(90));
        assert_eq!(transport.tls_handshake_timeout, Duration::from_secs(10));
        assert_eq!(transport.expect_continue_timeout, Duration::from_secs(1));
    }

    #[test]
    fn test_logger_settings_follow_logging_config() {
        let config =
            ClientConfig::new("http://localhost:9200", false, LoggingConfig::from_verbosity(5));

        assert!(config.debug_logging());
        assert_eq!(
            config.logger(),
            Some(LoggerSettings {
                request_bodies: true,
                response_bodies: false,
            })
        );
    }

    #[test]
    fn test_from_lookup_defaults() {
        let config = ClientConfig::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.address(), DEFAULT_SEARCH_URL);
        assert!(!config.insecure_skip_verify());
        assert!(!config.debug_logging());
    }

    #[test]
    fn test_from_lookup_values() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            ("SEARCH_URL", "https://search.internal:9200"),
            ("SEARCH_INSECURE_SKIP_VERIFY", "TRUE"),
            ("SEARCH_LOG_VERBOSITY", "6"),
        ]))
        .unwrap();

        assert_eq!(config.address(), "https://search.internal:9200");
        assert!(config.insecure_skip_verify());
        assert!(config.transport().is_some());
        assert_eq!(
            config.logger(),
            Some(LoggerSettings {
                request_bodies: true,
                response_bodies: true,
            })
        );
    }

    #[test]
    fn test_from_lookup_rejects_invalid_values() {
        let err =
            ClientConfig::from_lookup(lookup_from(&[("SEARCH_INSECURE_SKIP_VERIFY", "maybe")]))
                .unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));

        let err = ClientConfig::from_lookup(lookup_from(&[("SEARCH_LOG_VERBOSITY", "loud")]))
            .unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }
}
