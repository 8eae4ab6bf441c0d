//! The failure taxonomy shared by every adapter.

use thiserror::Error;

/// Errors raised while activating or executing knowledge objects.
///
/// Callers care about three tiers: configuration problems (fix the
/// request or the registry), unavailability (the runtime cannot be
/// reached at all), and remote verdicts (the runtime answered and
/// either rejected the request or faulted on it). Rejections and
/// faults stay distinct variants so callers can tell whose bug it is.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum AdapterError {
    /// The request or the registry wiring is wrong: no engine named,
    /// no runtime registered under that name, malformed descriptor.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The runtime could not be reached at all: failed health probe,
    /// refused connection, or a timed-out call.
    #[error("runtime \"{engine}\" at {address} is unavailable: {detail}")]
    RemoteUnavailable {
        /// Engine name the runtime registered under.
        engine: String,
        /// Base address of the runtime.
        address: String,
        /// What went wrong.
        detail: String,
    },

    /// The runtime rejected the request (HTTP 4xx).
    #[error("remote {address} rejected the request: {detail}")]
    Client {
        /// Address of the call that was rejected.
        address: String,
        /// Rejection detail reported by the runtime.
        detail: String,
    },

    /// The runtime faulted while handling the request (HTTP 5xx), or
    /// the connection broke once execution was already underway.
    #[error("remote {address} failed: {detail}")]
    Server {
        /// Address of the call that failed.
        address: String,
        /// Failure detail.
        detail: String,
    },

    /// The artifact bytes could not be fetched.
    #[error("artifact not found: {0}")]
    ArtifactNotFound(String),

    /// The artifact failed to compile, or its entry function is missing.
    #[error("compilation failed: {0}")]
    Compilation(String),

    /// The object raised an error at call time.
    #[error("execution failed: {0}")]
    Execution(String),

    /// Catch-all. Include context.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl AdapterError {
    /// Whether retrying the same call might succeed.
    ///
    /// True for unavailability and remote faults. Configuration errors
    /// and rejections need a changed request, not a retry.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RemoteUnavailable { .. } | Self::Server { .. }
        )
    }
}
