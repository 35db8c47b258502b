//! DNS-over-HTTPS resolution with endpoint racing.
//!
//! Every configured endpoint is queried concurrently and the FIRST task to
//! complete decides the outcome; the rest are aborted. The race is on
//! completion, not success: a first-completing failure surfaces as-is
//! rather than falling through to slower endpoints, since waiting on the
//! next completion would be a hidden retry and retry policy belongs to
//! the calling engine.

pub mod answer;
pub mod transport;

use crate::dns::cache::AddressCache;
use crawldns_application::ports::HostCache;
use crawldns_domain::{RecordFamily, ResolveError, ResolverConfig};
use futures::stream::FuturesUnordered;
use futures::StreamExt;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;
use self::transport::{DohTransport, HttpTransport};
use tracing::{debug, warn};

/// Per-request deadline used when neither the caller nor the
/// configuration supplies one.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

pub struct DohResolver {
    endpoints: Arc<[String]>,
    transport: Arc<dyn DohTransport>,
    cache: Arc<AddressCache>,
    family: RecordFamily,
    default_timeout: Duration,
}

impl DohResolver {
    pub fn new(config: &ResolverConfig, cache: Arc<AddressCache>) -> Self {
        Self::with_transport(config, cache, Arc::new(HttpTransport::new()))
    }

    /// Construction with an explicit transport, used by tests to
    /// instrument call counts and completion timing.
    pub fn with_transport(
        config: &ResolverConfig,
        cache: Arc<AddressCache>,
        transport: Arc<dyn DohTransport>,
    ) -> Self {
        let default_timeout = if config.query_timeout_ms == 0 {
            DEFAULT_REQUEST_TIMEOUT
        } else {
            Duration::from_millis(config.query_timeout_ms)
        };
        Self {
            endpoints: config.endpoints().into(),
            transport,
            cache,
            family: config.family,
            default_timeout,
        }
    }

    /// Resolve `hostname` by racing all endpoints, cache first.
    pub async fn resolve(
        &self,
        hostname: &str,
        timeout: Option<Duration>,
    ) -> Result<IpAddr, ResolveError> {
        if let Some(address) = self.cache.lookup(hostname) {
            debug!(%hostname, %address, "cache hit");
            return Ok(address);
        }

        if self.endpoints.is_empty() {
            return Err(ResolveError::ConfigError(
                "no DoH endpoints configured".to_string(),
            ));
        }

        let timeout = timeout.unwrap_or(self.default_timeout);
        debug!(%hostname, endpoints = self.endpoints.len(), ?timeout, "racing DoH endpoints");

        let mut abort_handles = Vec::with_capacity(self.endpoints.len());
        let mut in_flight = FuturesUnordered::new();
        for endpoint in self.endpoints.iter() {
            let handle = tokio::spawn(query_endpoint(
                Arc::clone(&self.transport),
                endpoint.clone(),
                hostname.to_string(),
                self.family,
                timeout,
            ));
            abort_handles.push(handle.abort_handle());
            in_flight.push(handle);
        }

        // First completion decides; the timeout is per endpoint, so the
        // race itself needs no extra deadline.
        let first = in_flight.next().await;

        // Losing tasks are aborted best-effort and never awaited further;
        // their cancellation outcomes are discarded with `in_flight`.
        for handle in &abort_handles {
            handle.abort();
        }
        drop(in_flight);

        let addresses = match first {
            Some(Ok(result)) => result?,
            Some(Err(join_err)) => {
                warn!(%hostname, error = %join_err, "resolution task failed");
                return Err(ResolveError::ResolutionFailed(format!(
                    "resolution task failed: {join_err}"
                )));
            }
            None => unreachable!("endpoint list checked non-empty above"),
        };

        let address = addresses.first().copied().ok_or_else(|| {
            ResolveError::ResolutionFailed(format!("no usable address for {hostname}"))
        })?;

        self.cache.insert(hostname, address);
        debug!(%hostname, %address, "resolved via DoH");
        Ok(address)
    }
}

/// One GET against one endpoint, parsed into the answered addresses.
async fn query_endpoint(
    transport: Arc<dyn DohTransport>,
    endpoint: String,
    hostname: String,
    family: RecordFamily,
    timeout: Duration,
) -> Result<Vec<IpAddr>, ResolveError> {
    let params = [
        ("name", hostname.as_str()),
        ("type", family.record_type()),
        ("do", "false"),
        ("cd", "false"),
    ];

    let response = transport.get(&endpoint, &params, timeout).await?;

    if response.status != 200 {
        debug!(%endpoint, status = response.status, "endpoint returned non-200");
        return Err(ResolveError::EndpointFailed {
            endpoint,
            detail: format!("HTTP status {}", response.status),
        });
    }

    answer::parse_answers(&hostname, &response.body, family)
}
