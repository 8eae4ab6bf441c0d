//! # synapse-api — Protocol types for knowledge object activation
//!
//! This crate defines the shared vocabulary of the activation protocol:
//! the traits adapters and executors implement, the envelopes calls
//! travel in, and the error taxonomy every failure maps into.
//!
//! ## The Pieces
//!
//! | Piece | Types | What it does |
//! |-------|-------|-------------|
//! | Executor | [`Executor`], [`ClientRequest`], [`ExecutorResponse`] | One activated endpoint, ready to call |
//! | Adapter | [`Adapter`], [`AdapterStatus`] | Turns deployment descriptors into executors |
//! | Descriptor | [`DeploymentSpec`], [`ArtifactRef`] | What to activate, with what, and how |
//! | Seams | [`ArtifactSource`], [`Reactivator`] | Artifact bytes in, refresh signals out |
//! | Errors | [`AdapterError`] | The shared failure taxonomy |
//!
//! ## Design Principle
//!
//! Every trait is operation-defined, not mechanism-defined.
//! [`Adapter::activate`] means "make this endpoint callable" — not
//! "POST to a runtime" or "compile a script." That is what makes
//! implementations swappable: a remote runtime proxy and an embedded
//! script engine implement the same two traits, and callers cannot
//! tell them apart.
//!
//! ## Dependency Notes
//!
//! Payloads are `serde_json::Value`: knowledge objects declare their own
//! input and output shapes, so the protocol layer treats them as opaque
//! JSON and leaves interpretation to the object and its caller.

#![deny(missing_docs)]

pub mod adapter;
pub mod artifact;
pub mod error;
pub mod executor;
pub mod request;
pub mod spec;

#[cfg(feature = "test-utils")]
pub mod test_utils;

// Re-exports for convenience
pub use adapter::{Adapter, AdapterStatus};
pub use artifact::{ArtifactSource, Reactivator};
pub use error::AdapterError;
pub use executor::Executor;
pub use request::{ClientRequest, ExecutorResponse};
pub use spec::{ArtifactRef, DeploymentSpec};
