use thiserror::Error;

/// Failure taxonomy for one resolution attempt.
///
/// The three network kinds are deliberately distinct: the engine's retry
/// middleware dispatches on the variant, so a timeout must never be folded
/// into a lookup failure. None of them is ever written to the cache.
#[derive(Error, Debug, Clone)]
pub enum ResolveError {
    #[error("DNS query timed out")]
    Timeout,

    #[error("Failed to resolve: {0}")]
    ResolutionFailed(String),

    #[error("DoH endpoint {endpoint} failed: {detail}")]
    EndpointFailed { endpoint: String, detail: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl ResolveError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }
}
