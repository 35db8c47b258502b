use crate::errors::ResolveError;
use crate::record_family::RecordFamily;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub resolver: ResolverConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Which resolution strategy a resolver instance runs. Fixed at
/// construction, never per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolverMode {
    #[default]
    Native,
    Doh,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    #[serde(default)]
    pub mode: ResolverMode,

    #[serde(default = "default_true")]
    pub cache_enabled: bool,

    #[serde(default = "default_cache_size")]
    pub cache_size: usize,

    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,

    /// Nameserver override for the native path. Empty means system
    /// configuration (resolv.conf).
    #[serde(default)]
    pub nameservers: Vec<String>,

    /// DoH endpoint override. Empty means the built-in provider set.
    #[serde(default)]
    pub doh_endpoints: Vec<String>,

    #[serde(default)]
    pub family: RecordFamily,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_true() -> bool {
    true
}

fn default_cache_size() -> usize {
    10_000
}

fn default_query_timeout_ms() -> u64 {
    5_000
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Well-known DoH providers used when no endpoint override is configured.
pub const DEFAULT_DOH_ENDPOINTS: [&str; 5] = [
    "https://1.0.0.1/dns-query",
    "https://1.1.1.1/dns-query",
    "https://[2606:4700:4700::1001]/dns-query",
    "https://[2606:4700:4700::1111]/dns-query",
    "https://cloudflare-dns.com/dns-query",
];

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            mode: ResolverMode::default(),
            cache_enabled: true,
            cache_size: default_cache_size(),
            query_timeout_ms: default_query_timeout_ms(),
            nameservers: vec![],
            doh_endpoints: vec![],
            family: RecordFamily::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl ResolverConfig {
    /// Cache capacity after applying the enable flag: disabled caching is
    /// expressed as size 0, which turns every lookup into a miss.
    pub fn effective_cache_size(&self) -> usize {
        if self.cache_enabled {
            self.cache_size
        } else {
            0
        }
    }

    /// Endpoint list with the built-in providers as fallback.
    pub fn endpoints(&self) -> Vec<String> {
        if self.doh_endpoints.is_empty() {
            DEFAULT_DOH_ENDPOINTS.iter().map(|s| s.to_string()).collect()
        } else {
            self.doh_endpoints.clone()
        }
    }

    pub fn with_mode(mut self, mode: ResolverMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_cache_size(mut self, size: usize) -> Self {
        self.cache_size = size;
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.query_timeout_ms = timeout_ms;
        self
    }

    pub fn with_nameservers(mut self, nameservers: Vec<String>) -> Self {
        self.nameservers = nameservers;
        self
    }

    pub fn with_endpoints(mut self, endpoints: Vec<String>) -> Self {
        self.doh_endpoints = endpoints;
        self
    }

    pub fn with_family(mut self, family: RecordFamily) -> Self {
        self.family = family;
        self
    }
}

impl Config {
    pub fn from_toml_str(raw: &str) -> Result<Self, ResolveError> {
        toml::from_str(raw).map_err(|e| ResolveError::ConfigError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ResolverConfig::default();
        assert_eq!(config.mode, ResolverMode::Native);
        assert!(config.cache_enabled);
        assert_eq!(config.cache_size, 10_000);
        assert_eq!(config.query_timeout_ms, 5_000);
        assert_eq!(config.effective_cache_size(), 10_000);
        assert_eq!(config.endpoints().len(), 5);
    }

    #[test]
    fn cache_disabled_means_size_zero() {
        let mut config = ResolverConfig::default();
        config.cache_enabled = false;
        assert_eq!(config.effective_cache_size(), 0);
    }

    #[test]
    fn parse_toml() {
        let raw = r#"
            [resolver]
            mode = "doh"
            cache_size = 512
            query_timeout_ms = 2000
            doh_endpoints = ["https://dns.example/dns-query"]
            family = "ipv6"

            [logging]
            level = "debug"
        "#;
        let config = Config::from_toml_str(raw).unwrap();
        assert_eq!(config.resolver.mode, ResolverMode::Doh);
        assert_eq!(config.resolver.cache_size, 512);
        assert_eq!(config.resolver.endpoints(), vec!["https://dns.example/dns-query"]);
        assert_eq!(config.resolver.family, crate::RecordFamily::Ipv6);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn parse_toml_rejects_garbage() {
        let err = Config::from_toml_str("mode = [").unwrap_err();
        assert!(matches!(err, ResolveError::ConfigError(_)));
    }
}
