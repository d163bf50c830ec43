//! Client error types.
//!
//! This module defines the errors returned while building a search client,
//! loading its configuration and sending requests through it.

use thiserror::Error;

/// Underlying cause of a failed client construction.
#[derive(Error, Debug)]
pub enum ConstructionError {
    /// The endpoint address is not a valid URL.
    #[error("invalid address: {0}")]
    InvalidAddress(#[from] url::ParseError),

    /// The HTTP transport could not be built.
    #[error("transport error: {0}")]
    Transport(String),
}

/// Errors that can occur while creating or using a search client.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Failed to construct a client for the given address.
    #[error("host={address}: {source}")]
    Construction {
        address: String,
        #[source]
        source: ConstructionError,
    },

    /// Sending a request to the search engine failed.
    #[error("Request error: {0}")]
    Request(String),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Wrap a construction failure with the address it was for.
    pub fn construction(address: impl Into<String>, source: impl Into<ConstructionError>) -> Self {
        Self::Construction {
            address: address.into(),
            source: source.into(),
        }
    }

    /// Create a request error.
    pub fn request(msg: impl Into<String>) -> Self {
        Self::Request(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// The address a construction error refers to, if any.
    pub fn address(&self) -> Option<&str> {
        match self {
            Self::Construction { address, .. } => Some(address),
            _ => None,
        }
    }
}
