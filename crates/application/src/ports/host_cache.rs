use std::net::IpAddr;

/// Shared hostname-to-address cache port.
///
/// Pure key-value semantics: no TTL, entries inserted only on successful
/// resolution. One cache instance is shared across all resolvers and
/// in-flight resolutions, so implementations must tolerate concurrent
/// lookups and inserts without exposing partial entries.
pub trait HostCache: Send + Sync {
    fn lookup(&self, hostname: &str) -> Option<IpAddr>;

    fn insert(&self, hostname: &str, address: IpAddr);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn clear(&self);
}
