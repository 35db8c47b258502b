//! Crawldns Application Layer
pub mod ports;

pub use ports::{AddressResolver, HostCache};
