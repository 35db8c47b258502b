//! Process-wide hostname-to-address cache.
//!
//! One instance is shared (`Arc`) by every resolver and every in-flight
//! resolution. Entries carry no TTL: a hostname stays mapped until the LRU
//! bound displaces it or the process ends. Failed resolutions are never
//! inserted, so a miss always triggers a fresh attempt.

use compact_str::CompactString;
use crawldns_application::ports::HostCache;
use lru::LruCache;
use rustc_hash::FxBuildHasher;
use std::net::IpAddr;
use std::num::NonZeroUsize;
use std::sync::{Mutex, PoisonError};
use tracing::debug;

type Entries = Mutex<LruCache<CompactString, IpAddr, FxBuildHasher>>;

pub struct AddressCache {
    /// `None` when caching is disabled (size 0): every lookup misses and
    /// inserts are dropped.
    entries: Option<Entries>,
}

impl AddressCache {
    pub fn new(size: usize) -> Self {
        let entries = NonZeroUsize::new(size)
            .map(|cap| Mutex::new(LruCache::with_hasher(cap, FxBuildHasher)));
        Self { entries }
    }

    pub fn disabled() -> Self {
        Self::new(0)
    }

    pub fn is_enabled(&self) -> bool {
        self.entries.is_some()
    }

    fn lock(entries: &Entries) -> std::sync::MutexGuard<'_, LruCache<CompactString, IpAddr, FxBuildHasher>> {
        entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl HostCache for AddressCache {
    fn lookup(&self, hostname: &str) -> Option<IpAddr> {
        let entries = self.entries.as_ref()?;
        Self::lock(entries).get(hostname).copied()
    }

    fn insert(&self, hostname: &str, address: IpAddr) {
        let Some(entries) = self.entries.as_ref() else {
            return;
        };
        let displaced = Self::lock(entries).push(CompactString::from(hostname), address);
        if let Some((old_host, _)) = displaced {
            if old_host != hostname {
                debug!(hostname = %old_host, "cache entry displaced");
            }
        }
    }

    fn len(&self) -> usize {
        self.entries.as_ref().map_or(0, |e| Self::lock(e).len())
    }

    fn clear(&self) {
        if let Some(entries) = self.entries.as_ref() {
            Self::lock(entries).clear();
        }
    }
}
