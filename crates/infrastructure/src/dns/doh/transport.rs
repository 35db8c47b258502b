//! HTTP transport seam for DNS-over-HTTPS queries.
//!
//! The trait exists so the racing strategy can be exercised against mock
//! transports; production use goes through [`HttpTransport`], a thin layer
//! over a shared connection-pooled client.

use async_trait::async_trait;
use crawldns_domain::ResolveError;
use std::sync::LazyLock;
use std::time::Duration;

/// Shared HTTPS client with connection pooling, reused across every
/// endpoint and resolution.
static SHARED_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        .use_rustls_tls()
        .pool_max_idle_per_host(4)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
});

const DNS_JSON_CONTENT_TYPE: &str = "application/dns-json";

/// Raw outcome of one DoH HTTP round trip. Status interpretation is the
/// endpoint client's job, not the transport's.
#[derive(Debug, Clone)]
pub struct DohResponse {
    pub status: u16,
    pub body: String,
}

#[async_trait]
pub trait DohTransport: Send + Sync {
    /// One GET to `endpoint` with the given query parameters, bounded by
    /// `timeout` for the whole round trip.
    async fn get(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
        timeout: Duration,
    ) -> Result<DohResponse, ResolveError>;
}

#[derive(Default)]
pub struct HttpTransport;

impl HttpTransport {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DohTransport for HttpTransport {
    async fn get(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
        timeout: Duration,
    ) -> Result<DohResponse, ResolveError> {
        let response = SHARED_CLIENT
            .get(endpoint)
            .query(params)
            .header("accept", DNS_JSON_CONTENT_TYPE)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ResolveError::Timeout
                } else {
                    ResolveError::EndpointFailed {
                        endpoint: endpoint.to_string(),
                        detail: e.to_string(),
                    }
                }
            })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                ResolveError::Timeout
            } else {
                ResolveError::EndpointFailed {
                    endpoint: endpoint.to_string(),
                    detail: format!("failed to read body: {e}"),
                }
            }
        })?;

        Ok(DohResponse { status, body })
    }
}
