//! Crawldns Infrastructure Layer
pub mod dns;

pub use dns::cache::AddressCache;
pub use dns::doh::transport::{DohTransport, HttpTransport};
pub use dns::doh::DohResolver;
pub use dns::native::NativeResolver;
pub use dns::resolver::{Resolver, Strategy};
