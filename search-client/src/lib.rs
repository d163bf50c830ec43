//! # Search Client
//!
//! This crate bootstraps clients for OpenSearch and Elasticsearch-compatible
//! search engines. It builds a client for one endpoint address with optional
//! TLS verification bypass, request metrics and a verbosity-driven request
//! logger. It also provides [`path_join`] for gluing path segments.

pub mod config;
pub mod errors;
pub mod logger;
pub mod metrics;
pub mod opensearch;
pub mod path;
pub mod telemetry;

pub use config::{ClientConfig, LoggingConfig, ProxyPolicy, TransportSettings};
pub use errors::{ClientError, ConstructionError};
pub use logger::{RequestLogger, RoundTrip, TextLogger};
pub use metrics::MetricsSnapshot;
pub use self::opensearch::{create_client, RawResponse, SearchClient};
pub use path::path_join;
