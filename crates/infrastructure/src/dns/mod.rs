pub mod cache;
pub mod doh;
pub mod native;
pub mod resolver;
