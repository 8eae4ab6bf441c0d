//! Collaborator seams: artifact bytes in, refresh signals out.

use crate::error::AdapterError;
use async_trait::async_trait;

/// Resolves logical artifact paths to raw bytes.
///
/// The proxy serves these bytes back to runtimes over its artifact
/// surface; the script adapter compiles them in-process. Paths are
/// shelf-relative (`{location}/{artifact}`).
#[async_trait]
pub trait ArtifactSource: Send + Sync {
    /// Fetch the bytes at `path`.
    ///
    /// Missing artifacts surface as [`AdapterError::ArtifactNotFound`].
    async fn fetch(&self, path: &str) -> Result<Vec<u8>, AdapterError>;
}

/// Receives advisory signals that a runtime re-registered and that
/// executors activated against its old address should be rebuilt.
///
/// Delivery is fire-and-forget: registration never waits on, and never
/// fails because of, a reactivation.
#[async_trait]
pub trait Reactivator: Send + Sync {
    /// A runtime for `engine` registered over an existing record, or
    /// asked for a refresh outright.
    async fn reactivate(&self, engine: &str);
}
