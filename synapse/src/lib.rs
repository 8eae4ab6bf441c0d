#![deny(missing_docs)]
//! # synapse — umbrella crate
//!
//! A single import surface for the synapse activation proxy. Re-exports
//! the member crates behind feature flags, plus a `prelude` for the
//! happy path.

#[cfg(feature = "core")]
pub use synapse_api;
#[cfg(feature = "proxy")]
pub use synapse_client;
#[cfg(feature = "http")]
pub use synapse_http;
#[cfg(feature = "proxy")]
pub use synapse_proxy;
#[cfg(feature = "proxy")]
pub use synapse_registry;
#[cfg(feature = "script")]
pub use synapse_script;

/// Happy-path imports for wiring an activation proxy.
pub mod prelude {
    #[cfg(feature = "core")]
    pub use synapse_api::{
        Adapter, AdapterError, AdapterStatus, ArtifactSource, ClientRequest, DeploymentSpec,
        Executor, ExecutorResponse, Reactivator,
    };

    #[cfg(feature = "proxy")]
    pub use synapse_client::RemoteClient;

    #[cfg(feature = "proxy")]
    pub use synapse_proxy::{ProxyAdapter, ProxyConfig, RemoteExecutor};

    #[cfg(feature = "proxy")]
    pub use synapse_registry::{Registration, RuntimeRecord, RuntimeRegistry, RuntimeStatus};

    #[cfg(feature = "script")]
    pub use synapse_script::{ScriptAdapter, ScriptExecutor};

    #[cfg(feature = "http")]
    pub use synapse_http::{AppState, build_router};
}
