//! Request and response envelopes for executor calls.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Default MIME type for request payloads.
const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// One call to an activated knowledge object.
///
/// Built with a consuming builder and immutable once handed to an
/// executor:
///
/// ```
/// use synapse_api::ClientRequest;
/// use serde_json::json;
///
/// let request = ClientRequest::new(json!({"name": "Bob"}))
///     .header("x-request-id", "42");
/// assert_eq!(request.content_type, "application/json");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientRequest {
    /// Input payload handed to the object. Opaque to the proxy.
    pub body: Value,
    /// MIME type of the payload.
    pub content_type: String,
    /// Explicit target URL, overriding the one the executor was
    /// activated with. Rarely set outside tests and re-dispatch.
    pub url: Option<String>,
    /// Extra headers forwarded with the call.
    pub headers: HashMap<String, String>,
}

impl ClientRequest {
    /// Start a request carrying `body` as `application/json`.
    #[must_use]
    pub fn new(body: Value) -> Self {
        Self {
            body,
            content_type: DEFAULT_CONTENT_TYPE.to_owned(),
            url: None,
            headers: HashMap::new(),
        }
    }

    /// Override the content type.
    #[must_use]
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// Set an explicit target URL.
    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Add one forwarded header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Whether the payload is JSON-typed.
    pub fn is_json(&self) -> bool {
        self.content_type
            .split(';')
            .next()
            .is_some_and(|t| t.trim().eq_ignore_ascii_case(DEFAULT_CONTENT_TYPE))
    }
}

/// What an executor hands back to its caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutorResponse {
    /// Result payload. For remote calls this is the unwrapped result,
    /// not the runtime's transport envelope.
    pub body: Value,
    /// Response headers worth surfacing to the caller.
    pub headers: HashMap<String, String>,
}

impl ExecutorResponse {
    /// Wrap a bare result value with no headers.
    #[must_use]
    pub fn new(body: Value) -> Self {
        Self {
            body,
            headers: HashMap::new(),
        }
    }

    /// Attach one response header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_request_defaults_to_json() {
        let request = ClientRequest::new(json!({"a": 1}));
        assert_eq!(request.content_type, "application/json");
        assert!(request.url.is_none());
        assert!(request.headers.is_empty());
    }

    #[test]
    fn builder_overrides_content_type() {
        let request = ClientRequest::new(json!("raw")).content_type("text/plain");
        assert_eq!(request.content_type, "text/plain");
    }

    #[test]
    fn builder_collects_headers() {
        let request = ClientRequest::new(json!({}))
            .header("x-one", "1")
            .header("x-two", "2");
        assert_eq!(request.headers.len(), 2);
        assert_eq!(request.headers["x-one"], "1");
    }

    #[test]
    fn is_json_ignores_charset_parameter() {
        let request = ClientRequest::new(json!({})).content_type("application/json; charset=utf-8");
        assert!(request.is_json());
    }

    #[test]
    fn is_json_rejects_text_plain() {
        let request = ClientRequest::new(json!("hi")).content_type("text/plain");
        assert!(!request.is_json());
    }
}
