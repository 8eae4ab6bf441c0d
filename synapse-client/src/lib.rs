//! # synapse-client — HTTP plumbing for runtime calls
//!
//! One thin client shared by the registry (health probes), the proxy
//! adapter (activations) and remote executors (calls). Two things set
//! it apart from using `reqwest` directly:
//!
//! - every request carries a bounded timeout, so a stuck runtime can
//!   never hang an activation or an execution indefinitely;
//! - HTTP verdicts are data, not errors. [`RemoteClient`] returns an
//!   [`HttpReply`] for *any* status code and reserves `Err` for
//!   transport failures. Deciding what a 400 or a 503 means is the
//!   caller's business, via the translators in [`error`].

#![deny(missing_docs)]

pub mod client;
pub mod error;

pub use client::{HttpReply, RemoteClient};
pub use error::{
    activation_status_error, activation_transport_error, execution_status_error,
    execution_transport_error,
};
