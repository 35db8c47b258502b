//! Crawldns Domain Layer
pub mod config;
pub mod errors;
pub mod record_family;

pub use config::{Config, LoggingConfig, ResolverConfig, ResolverMode};
pub use errors::ResolveError;
pub use record_family::RecordFamily;
