//! The adapter contract — turn deployment descriptors into executors.

use crate::error::AdapterError;
use crate::executor::Executor;
use crate::spec::DeploymentSpec;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Coarse adapter health, reported to operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdapterStatus {
    /// Ready to activate.
    Up,
    /// Not ready: missing backend, failed initialization.
    Down,
}

impl fmt::Display for AdapterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdapterStatus::Up => f.write_str("up"),
            AdapterStatus::Down => f.write_str("down"),
        }
    }
}

/// Turns deployment descriptors into live [`Executor`] handles.
///
/// Backend selection happens exactly once, here. The returned executor
/// is bound to whatever backend served the activation and never
/// re-resolves it on later calls; re-registering a runtime affects new
/// activations only.
#[async_trait]
pub trait Adapter: Send + Sync {
    /// Engine names this adapter currently serves. For registry-backed
    /// adapters the list changes as runtimes register.
    async fn engines(&self) -> Vec<String>;

    /// Current adapter health.
    fn status(&self) -> AdapterStatus;

    /// Activate one endpoint of a knowledge object.
    ///
    /// `location` is where the object's artifacts live, relative to the
    /// shelf root. `endpoint` names the endpoint within the object.
    /// `spec` is the deployment descriptor for that endpoint.
    async fn activate(
        &self,
        location: &str,
        endpoint: &str,
        spec: &DeploymentSpec,
    ) -> Result<Arc<dyn Executor>, AdapterError>;
}
