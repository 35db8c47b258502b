use async_trait::async_trait;
use crawldns_domain::ResolveError;
use std::net::IpAddr;
use std::time::Duration;

/// Entry point the crawling engine's connection layer calls for every
/// hostname needing connection establishment.
///
/// Exactly one address per successful resolution; failures surface as-is
/// with no retry (retry/backoff belongs to the engine).
#[async_trait]
pub trait AddressResolver: Send + Sync {
    /// Resolve `hostname` to a single address. `timeout` bounds one
    /// attempt; `None` falls back to the configured default.
    async fn resolve(
        &self,
        hostname: &str,
        timeout: Option<Duration>,
    ) -> Result<IpAddr, ResolveError>;
}
