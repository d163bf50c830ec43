//! Search client handle and factory.
//!
//! This module provides [`create_client`] and the [`SearchClient`] handle it
//! returns, built on the OpenSearch Rust client.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use opensearch::http::headers::HeaderMap;
use opensearch::http::request::JsonBody;
use opensearch::http::Method;
use opensearch::OpenSearch;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::{ClientConfig, LoggingConfig};
use crate::errors::ClientError;
use crate::logger::{RequestLogger, RoundTrip, TextLogger};
use crate::metrics::{Metrics, MetricsSnapshot};
use crate::opensearch::transport::build_transport;
use crate::path::path_join;

/// Create a search client for a single address.
///
/// # Arguments
///
/// * `address` - The search engine URL (e.g., "https://es.example.com:9200")
/// * `insecure_skip_verify` - Skip TLS certificate verification
/// * `logging` - Which request diagnostics to emit
///
/// # Returns
///
/// * `Ok(SearchClient)` - A new, independent client
/// * `Err(ClientError::Construction)` - If the client cannot be built; the
///   error names `address`
///
/// # Example
///
/// ```ignore
/// use search_client::{create_client, LoggingConfig};
///
/// let client = create_client("https://es.example.com:9200", false, LoggingConfig::from_verbosity(4))?;
/// let reachable = client.ping().await?;
/// ```
pub fn create_client(
    address: &str,
    insecure_skip_verify: bool,
    logging: LoggingConfig,
) -> Result<SearchClient, ClientError> {
    SearchClient::from_config(ClientConfig::new(address, insecure_skip_verify, logging))
}

/// Response of a raw request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Deserialize the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ClientError> {
        serde_json::from_str(&self.body)
            .map_err(|e| ClientError::request(format!("Invalid JSON response: {}", e)))
    }
}

/// Client for one search engine node.
///
/// Each instance owns its transport, logger and metrics; nothing is shared
/// between clients.
pub struct SearchClient {
    client: OpenSearch,
    url: Url,
    config: ClientConfig,
    logger: Option<Arc<dyn RequestLogger>>,
    metrics: Metrics,
}

impl SearchClient {
    /// Build a client from a prepared configuration.
    ///
    /// A text logger writing to stdout is attached when the configuration
    /// carries logger settings.
    pub fn from_config(config: ClientConfig) -> Result<Self, ClientError> {
        let logger = config
            .logger()
            .map(|settings| Arc::new(TextLogger::stdout(settings)) as Arc<dyn RequestLogger>);
        Self::build(config, logger)
    }

    /// Build a client that reports every round trip to `logger`.
    pub fn with_logger(
        config: ClientConfig,
        logger: Arc<dyn RequestLogger>,
    ) -> Result<Self, ClientError> {
        Self::build(config, Some(logger))
    }

    fn build(
        config: ClientConfig,
        logger: Option<Arc<dyn RequestLogger>>,
    ) -> Result<Self, ClientError> {
        let url = Url::parse(config.address())
            .map_err(|e| ClientError::construction(config.address(), e))?;
        let transport = build_transport(&url, &config)
            .map_err(|e| ClientError::construction(config.address(), e))?;

        if config.insecure_skip_verify() {
            warn!(address = %config.address(), "TLS certificate verification is disabled");
        }

        info!(
            address = %config.address(),
            insecure_skip_verify = config.insecure_skip_verify(),
            debug_logging = config.debug_logging(),
            "Created search client"
        );

        Ok(Self {
            client: OpenSearch::new(transport),
            url,
            config,
            logger,
            metrics: Metrics::default(),
        })
    }

    /// The address this client was created for.
    pub fn address(&self) -> &str {
        self.config.address()
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Whether round trips are reported to a request logger.
    pub fn logs_requests(&self) -> bool {
        self.logger.is_some()
    }

    /// Current request counters.
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Send a request to `path`, relative to the client's address.
    ///
    /// Non-2xx statuses are returned as responses, not errors. Only
    /// transport failures produce `ClientError::Request`.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<RawResponse, ClientError> {
        let path = path_join("/", path);
        let url = path_join(self.url.as_str(), &path);
        let method_name = format!("{:?}", method).to_uppercase();

        let request_body = match &self.logger {
            Some(logger) if logger.request_bodies() => body.as_ref().map(Value::to_string),
            _ => None,
        };

        let started_at = Utc::now();
        let start = Instant::now();

        let result = self
            .client
            .send(
                method,
                &path,
                HeaderMap::new(),
                Option::<&()>::None,
                body.map(JsonBody::new),
                None,
            )
            .await;

        let outcome = match result {
            Ok(response) => {
                let status = response.status_code().as_u16();
                response.text().await.map(|text| (status, text))
            }
            Err(e) => Err(e),
        };
        let duration = start.elapsed();

        match &outcome {
            Ok((status, _)) => self.metrics.record_response(*status),
            Err(_) => self.metrics.record_failure(),
        }

        let error = outcome.as_ref().err().map(|e| e.to_string());

        if self.config.debug_logging() {
            debug!(
                method = %method_name,
                url = %url,
                status = outcome.as_ref().ok().map(|(status, _)| *status),
                elapsed_ms = duration.as_millis() as u64,
                error = error.as_deref(),
                "Search request finished"
            );
        }

        if let Some(logger) = &self.logger {
            let response_body = match &outcome {
                Ok((_, text)) if logger.response_bodies() => Some(text.as_str()),
                _ => None,
            };
            logger.log_round_trip(&RoundTrip {
                method: &method_name,
                url: &url,
                started_at,
                duration,
                status: outcome.as_ref().ok().map(|(status, _)| *status),
                request_body: request_body.as_deref(),
                response_body,
                error: error.as_deref(),
            });
        }

        let (status, body) = outcome.map_err(|e| ClientError::request(e.to_string()))?;
        Ok(RawResponse { status, body })
    }

    /// Check that the node answers `HEAD /` with a 2xx status.
    pub async fn ping(&self) -> Result<bool, ClientError> {
        let response = self.request(Method::Head, "/", None).await?;
        Ok(response.is_success())
    }
}
