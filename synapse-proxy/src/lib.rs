//! # synapse-proxy — remote activation and execution
//!
//! The remote strategy for running knowledge objects: hand the
//! deployment descriptor to a registered runtime service over HTTP and
//! get back an address to call. Four steps per activation, terminal on
//! a bound executor or a typed error:
//!
//! 1. resolve the descriptor's engine against the registry;
//! 2. gate on a live health probe — a runtime that is not up is never
//!    sent an activation;
//! 3. rewrite the descriptor (a pure copy) so the runtime can fetch
//!    artifacts back from this service;
//! 4. POST it to `{runtime}/endpoints` and resolve the returned
//!    locator into the executor's bound URL.
//!
//! The returned [`RemoteExecutor`] is bound once: re-registering the
//! engine later does not rebind it, callers re-activate to pick up a
//! new address.

#![deny(missing_docs)]

mod adapter;
mod config;
mod executor;
mod rewrite;

pub use adapter::ProxyAdapter;
pub use config::ProxyConfig;
pub use executor::RemoteExecutor;
pub use rewrite::rewrite_for_runtime;
