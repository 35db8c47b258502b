pub mod address_resolver;
pub mod host_cache;

pub use address_resolver::AddressResolver;
pub use host_cache::HostCache;
