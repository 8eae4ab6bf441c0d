//! The remote execution handle.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use synapse_api::{AdapterError, ClientRequest, Executor, ExecutorResponse};
use synapse_client::{execution_status_error, execution_transport_error, RemoteClient};
use url::Url;

/// A callable handle to one activated remote endpoint.
///
/// Holds the resolved URL, the headers every call carries, and the
/// shared client — nothing else. Stateless across calls, so one
/// executor can serve any number of concurrent callers.
pub struct RemoteExecutor {
    engine: String,
    url: Url,
    default_headers: HashMap<String, String>,
    client: RemoteClient,
}

impl RemoteExecutor {
    /// A handle bound to `url`, attributed to `engine` in errors and
    /// logs.
    #[must_use]
    pub fn new(engine: impl Into<String>, url: Url, client: RemoteClient) -> Self {
        Self {
            engine: engine.into(),
            url,
            default_headers: HashMap::new(),
            client,
        }
    }

    /// Attach a header sent with every call. Per-call headers win on
    /// conflict.
    #[must_use]
    pub fn default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(name.into(), value.into());
        self
    }

    /// The bound endpoint URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The engine this executor was activated against.
    pub fn engine(&self) -> &str {
        &self.engine
    }
}

#[async_trait]
impl Executor for RemoteExecutor {
    /// POST the request to the bound URL and unwrap the result.
    ///
    /// Response handling tolerates both wrapped and bare shapes: a JSON
    /// object with a `result` field yields that field's value, any
    /// other JSON body is returned whole, and a body that is not JSON
    /// comes back as literal text.
    async fn execute(&self, request: ClientRequest) -> Result<ExecutorResponse, AdapterError> {
        let target = match &request.url {
            Some(url) => url.clone(),
            None => self.url.to_string(),
        };

        let mut headers = self.default_headers.clone();
        headers.extend(request.headers.clone());

        let sent = if request.is_json() {
            self.client.post_json(&target, &request.body, &headers).await
        } else {
            let text = match &request.body {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            self.client
                .post_text(&target, text, &request.content_type, &headers)
                .await
        };

        let reply = match sent {
            Ok(reply) => reply,
            Err(err) => return Err(execution_transport_error(&err, &self.engine, &target)),
        };
        if !reply.is_success() {
            return Err(execution_status_error(reply.status, &reply.body, &target));
        }

        let body = match reply.json() {
            Some(Value::Object(mut map)) => match map.remove("result") {
                Some(result) => result,
                None => Value::Object(map),
            },
            Some(value) => value,
            None => Value::String(reply.body.clone()),
        };

        tracing::debug!(engine = %self.engine, url = %target, "executed remote endpoint");

        let mut response = ExecutorResponse::new(body);
        if let Some(content_type) = reply.headers.get("content-type") {
            response = response.header("content-type", content_type);
        }
        Ok(response)
    }
}
