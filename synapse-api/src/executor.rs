//! The executor contract — one activated endpoint, ready to call.

use crate::error::AdapterError;
use crate::request::{ClientRequest, ExecutorResponse};
use async_trait::async_trait;
use serde_json::Value;
use std::fmt;

/// A handle to one activated endpoint of a knowledge object.
///
/// Executors are bound to a single backend at activation time and hold
/// everything needed to call it. They carry no per-call state: any
/// number of tasks may share one executor and call it concurrently.
#[async_trait]
pub trait Executor: Send + Sync {
    /// Execute the endpoint with one request.
    async fn execute(&self, request: ClientRequest) -> Result<ExecutorResponse, AdapterError>;

    /// Execute from a bare payload and content type.
    ///
    /// Compatibility wrapper over [`Executor::execute`] for call sites
    /// that predate [`ClientRequest`].
    #[deprecated(note = "build a ClientRequest and call execute")]
    async fn execute_legacy(
        &self,
        body: Value,
        content_type: &str,
    ) -> Result<ExecutorResponse, AdapterError> {
        self.execute(ClientRequest::new(body).content_type(content_type))
            .await
    }
}

impl fmt::Debug for dyn Executor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("dyn Executor")
    }
}
