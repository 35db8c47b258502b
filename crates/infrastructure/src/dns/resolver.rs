//! Resolver facade consumed by the crawling engine.
//!
//! The strategy is a construction-time choice: one resolver instance runs
//! either the native path or the DoH race for its whole lifetime. The
//! address cache is injected so multiple resolver instances (and the
//! engine's own bookkeeping) can share one process-wide cache.

use crate::dns::cache::AddressCache;
use crate::dns::doh::DohResolver;
use crate::dns::native::NativeResolver;
use async_trait::async_trait;
use crawldns_application::ports::AddressResolver;
use crawldns_domain::{ResolveError, ResolverConfig, ResolverMode};
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub enum Strategy {
    Native(NativeResolver),
    DohRace(DohResolver),
}

impl Strategy {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Native(_) => "native",
            Self::DohRace(_) => "doh",
        }
    }
}

pub struct Resolver {
    strategy: Strategy,
    cache: Arc<AddressCache>,
}

impl Resolver {
    /// Build a resolver and a fresh cache from configuration. A disabled
    /// cache flag becomes capacity 0, so every call does network I/O.
    pub fn from_config(config: &ResolverConfig) -> Result<Self, ResolveError> {
        let cache = Arc::new(AddressCache::new(config.effective_cache_size()));
        Self::with_cache(config, cache)
    }

    /// Build a resolver around an existing shared cache.
    pub fn with_cache(
        config: &ResolverConfig,
        cache: Arc<AddressCache>,
    ) -> Result<Self, ResolveError> {
        let strategy = match config.mode {
            ResolverMode::Native => {
                Strategy::Native(NativeResolver::new(config, Arc::clone(&cache))?)
            }
            ResolverMode::Doh => Strategy::DohRace(DohResolver::new(config, Arc::clone(&cache))),
        };
        Ok(Self::new(strategy, cache))
    }

    pub fn new(strategy: Strategy, cache: Arc<AddressCache>) -> Self {
        info!(
            strategy = strategy.name(),
            cache_enabled = cache.is_enabled(),
            "resolver created"
        );
        Self { strategy, cache }
    }

    pub fn cache(&self) -> &Arc<AddressCache> {
        &self.cache
    }

    /// Resolve `hostname` to one address. Failures surface unmodified;
    /// there is no retry at this layer.
    pub async fn get_address(
        &self,
        hostname: &str,
        timeout: Option<Duration>,
    ) -> Result<IpAddr, ResolveError> {
        match &self.strategy {
            Strategy::Native(resolver) => resolver.resolve(hostname, timeout).await,
            Strategy::DohRace(resolver) => resolver.resolve(hostname, timeout).await,
        }
    }
}

#[async_trait]
impl AddressResolver for Resolver {
    async fn resolve(
        &self,
        hostname: &str,
        timeout: Option<Duration>,
    ) -> Result<IpAddr, ResolveError> {
        self.get_address(hostname, timeout).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crawldns_application::ports::HostCache;
    use std::net::Ipv4Addr;

    #[tokio::test]
    async fn strategy_follows_config_mode() {
        let native = Resolver::from_config(&ResolverConfig::default()).unwrap();
        assert_eq!(native.strategy.name(), "native");

        let doh_config = ResolverConfig::default().with_mode(ResolverMode::Doh);
        let doh = Resolver::from_config(&doh_config).unwrap();
        assert_eq!(doh.strategy.name(), "doh");
    }

    #[tokio::test]
    async fn cache_disabled_by_config() {
        let mut config = ResolverConfig::default();
        config.cache_enabled = false;
        let resolver = Resolver::from_config(&config).unwrap();
        assert!(!resolver.cache().is_enabled());
    }

    #[tokio::test]
    async fn resolvers_can_share_one_cache() {
        let cache = Arc::new(AddressCache::new(64));
        let a = Resolver::with_cache(&ResolverConfig::default(), Arc::clone(&cache)).unwrap();
        let b = Resolver::with_cache(
            &ResolverConfig::default().with_mode(ResolverMode::Doh),
            Arc::clone(&cache),
        )
        .unwrap();

        cache.insert("example.com", IpAddr::V4(Ipv4Addr::new(93, 184, 216, 34)));
        assert!(Arc::ptr_eq(a.cache(), b.cache()));
        assert_eq!(b.cache().len(), 1);
    }

    #[tokio::test]
    async fn cached_entry_answers_without_network() {
        // Blackhole nameserver: any real query would hang until timeout.
        let config = ResolverConfig::default()
            .with_nameservers(vec!["192.0.2.1".to_string()])
            .with_timeout_ms(50);
        let resolver = Resolver::from_config(&config).unwrap();
        let addr = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 7));
        resolver.cache().insert("cached.example", addr);

        let got = resolver.get_address("cached.example", None).await.unwrap();
        assert_eq!(got, addr);
    }

    #[tokio::test]
    async fn invalid_nameserver_is_config_error() {
        let config = ResolverConfig::default().with_nameservers(vec!["not-an-ip".to_string()]);
        assert!(matches!(
            Resolver::from_config(&config),
            Err(ResolveError::ConfigError(_))
        ));
    }
}
