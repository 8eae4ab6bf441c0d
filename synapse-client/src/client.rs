//! The shared HTTP client struct and builder.

use serde::Serialize;
use std::collections::HashMap;
use std::time::Duration;

/// Default per-request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// An HTTP response read to completion, whatever its status.
#[derive(Debug, Clone)]
pub struct HttpReply {
    /// Response status code.
    pub status: reqwest::StatusCode,
    /// Response body as text.
    pub body: String,
    /// Response headers with UTF-8 values, lowercase names.
    pub headers: HashMap<String, String>,
}

impl HttpReply {
    /// Whether the status is 2xx.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// The body parsed as JSON, if it parses.
    pub fn json(&self) -> Option<serde_json::Value> {
        serde_json::from_str(&self.body).ok()
    }
}

/// HTTP client for runtime control and execution calls.
///
/// Cheap to clone; clones share the underlying connection pool.
///
/// # Example
///
/// ```no_run
/// use synapse_client::RemoteClient;
/// use std::time::Duration;
///
/// let client = RemoteClient::new().with_timeout(Duration::from_secs(5));
/// ```
#[derive(Clone)]
pub struct RemoteClient {
    /// Shared HTTP client.
    pub(crate) http: reqwest::Client,
    /// Applied to every request.
    pub(crate) timeout: Duration,
}

impl RemoteClient {
    /// Create a new client with the default 30 second timeout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The configured per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// GET `url`, expecting (but not requiring) a JSON body.
    ///
    /// `Err` means the request never completed: refused connection, DNS
    /// failure, timeout. A 500 with a body is an `Ok` reply.
    pub async fn get_json(&self, url: &str) -> Result<HttpReply, reqwest::Error> {
        tracing::debug!(url = %url, "GET");
        let response = self
            .http
            .get(url)
            .header("accept", "application/json")
            .timeout(self.timeout)
            .send()
            .await?;
        Self::read_reply(response).await
    }

    /// POST a JSON body to `url` with extra headers.
    ///
    /// The content type is `application/json` unless `headers` says
    /// otherwise.
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &T,
        headers: &HashMap<String, String>,
    ) -> Result<HttpReply, reqwest::Error> {
        tracing::debug!(url = %url, "POST json");
        let mut request = self.http.post(url).timeout(self.timeout);
        for (name, value) in headers {
            request = request.header(name, value);
        }
        // reqwest only fills in content-type when the caller has not.
        let response = request.json(body).send().await?;
        Self::read_reply(response).await
    }

    /// POST a raw text body to `url` under an explicit content type.
    ///
    /// Used for payloads that are not JSON. The `content_type` argument
    /// is authoritative; a conflicting entry in `headers` is dropped.
    pub async fn post_text(
        &self,
        url: &str,
        body: String,
        content_type: &str,
        headers: &HashMap<String, String>,
    ) -> Result<HttpReply, reqwest::Error> {
        tracing::debug!(url = %url, content_type = %content_type, "POST text");
        let mut request = self
            .http
            .post(url)
            .timeout(self.timeout)
            .header("content-type", content_type);
        for (name, value) in headers {
            if name.eq_ignore_ascii_case("content-type") {
                continue;
            }
            request = request.header(name, value);
        }
        let response = request.body(body).send().await?;
        Self::read_reply(response).await
    }

    async fn read_reply(response: reqwest::Response) -> Result<HttpReply, reqwest::Error> {
        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_owned(), v.to_owned()))
            })
            .collect();
        let body = response.text().await?;
        Ok(HttpReply {
            status,
            body,
            headers,
        })
    }
}

impl Default for RemoteClient {
    fn default() -> Self {
        Self::new()
    }
}
