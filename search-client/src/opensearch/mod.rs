//! OpenSearch-backed search client.
//!
//! This module builds the client handle on top of the OpenSearch Rust
//! client, which also speaks to Elasticsearch-compatible endpoints.

mod client;
mod transport;

pub use client::{create_client, RawResponse, SearchClient};
