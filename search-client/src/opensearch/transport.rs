//! HTTP transport construction.

use opensearch::cert::CertificateValidation;
use opensearch::http::transport::{SingleNodeConnectionPool, Transport, TransportBuilder};
use tracing::debug;
use url::Url;

use crate::config::{ClientConfig, ProxyPolicy};
use crate::errors::ConstructionError;

/// Build the transport for a single node.
///
/// Only proxy selection and certificate validation are overridden; the
/// opensearch builder leaves pooling, keep-alive and timeouts to the
/// underlying HTTP client.
pub(crate) fn build_transport(
    url: &Url,
    config: &ClientConfig,
) -> Result<Transport, ConstructionError> {
    let conn_pool = SingleNodeConnectionPool::new(url.clone());
    let mut builder = TransportBuilder::new(conn_pool);

    if config.proxy_policy() == ProxyPolicy::Disabled {
        builder = builder.disable_proxy();
    }

    if let Some(settings) = config.transport() {
        if settings.accept_invalid_certs {
            debug!(address = %url, "Disabling certificate validation");
            builder = builder.cert_validation(CertificateValidation::None);
        }
    }

    builder
        .build()
        .map_err(|e| ConstructionError::Transport(e.to_string()))
}
