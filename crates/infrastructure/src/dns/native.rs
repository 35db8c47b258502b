//! Native (UDP/TCP) resolution through hickory's async resolver.
//!
//! One cache check, then exactly one lookup attempt bounded by the caller's
//! timeout. A deadline elapse surfaces as `ResolveError::Timeout` and is
//! never folded into `ResolutionFailed`, so the engine's retry layer can
//! tell the two apart.

use crate::dns::cache::AddressCache;
use crawldns_application::ports::HostCache;
use crawldns_domain::{RecordFamily, ResolveError, ResolverConfig};
use hickory_resolver::config::{NameServerConfigGroup, ResolverConfig as HickoryConfig, ResolverOpts};
use hickory_resolver::name_server::TokioConnectionProvider;
use hickory_resolver::TokioResolver;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Per-attempt timer handed to hickory. The outer per-call timeout is the
/// only deadline that may fire: hickory's own timer is pushed far past any
/// sane per-call value, so its elapse can never masquerade as a lookup
/// failure.
const ATTEMPT_TIMEOUT_CEILING: Duration = Duration::from_secs(3600);

pub struct NativeResolver {
    resolver: TokioResolver,
    cache: Arc<AddressCache>,
    family: RecordFamily,
    default_timeout: Duration,
}

impl NativeResolver {
    pub fn new(config: &ResolverConfig, cache: Arc<AddressCache>) -> Result<Self, ResolveError> {
        let default_timeout = Duration::from_millis(config.query_timeout_ms);

        // Single attempt: the caller's timeout bounds one query, and retry
        // policy belongs to the engine, not this layer. ndots 0 keeps the
        // hostname exactly as supplied (no search-domain expansion).
        let mut opts = ResolverOpts::default();
        opts.timeout = ATTEMPT_TIMEOUT_CEILING;
        opts.attempts = 1;
        opts.ndots = 0;

        let resolver = if config.nameservers.is_empty() {
            TokioResolver::builder_tokio()
                .map_err(|e| ResolveError::ConfigError(format!("system resolver config: {e}")))?
                .with_options(opts)
                .build()
        } else {
            let ips = config
                .nameservers
                .iter()
                .map(|raw| {
                    raw.parse::<IpAddr>().map_err(|_| {
                        ResolveError::ConfigError(format!("invalid nameserver address: {raw}"))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            let group = NameServerConfigGroup::from_ips_clear(&ips, 53, true);
            let hickory_config = HickoryConfig::from_parts(None, vec![], group);
            TokioResolver::builder_with_config(hickory_config, TokioConnectionProvider::default())
                .with_options(opts)
                .build()
        };

        Ok(Self {
            resolver,
            cache,
            family: config.family,
            default_timeout,
        })
    }

    /// Resolve `hostname` to a single address, cache first.
    pub async fn resolve(
        &self,
        hostname: &str,
        timeout: Option<Duration>,
    ) -> Result<IpAddr, ResolveError> {
        if let Some(address) = self.cache.lookup(hostname) {
            debug!(%hostname, %address, "cache hit");
            return Ok(address);
        }

        let timeout = timeout.unwrap_or(self.default_timeout);
        debug!(%hostname, family = %self.family, ?timeout, "native lookup");

        let address = tokio::time::timeout(timeout, self.lookup(hostname))
            .await
            .map_err(|_| ResolveError::Timeout)??;

        self.cache.insert(hostname, address);
        Ok(address)
    }

    async fn lookup(&self, hostname: &str) -> Result<IpAddr, ResolveError> {
        let first = match self.family {
            RecordFamily::Ipv4 => self
                .resolver
                .ipv4_lookup(hostname)
                .await
                .map_err(|e| ResolveError::ResolutionFailed(e.to_string()))?
                .iter()
                .next()
                .map(|a| IpAddr::V4(a.0)),
            RecordFamily::Ipv6 => self
                .resolver
                .ipv6_lookup(hostname)
                .await
                .map_err(|e| ResolveError::ResolutionFailed(e.to_string()))?
                .iter()
                .next()
                .map(|aaaa| IpAddr::V6(aaaa.0)),
        };

        first.ok_or_else(|| ResolveError::ResolutionFailed(format!("no addresses for {hostname}")))
    }
}
