//! The activation protocol.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use synapse_api::{Adapter, AdapterError, AdapterStatus, DeploymentSpec, Executor};
use synapse_client::{activation_status_error, activation_transport_error, RemoteClient};
use synapse_registry::RuntimeRegistry;
use url::Url;

use crate::config::ProxyConfig;
use crate::executor::RemoteExecutor;
use crate::rewrite::rewrite_for_runtime;

/// Activates knowledge objects on registered remote runtimes.
///
/// Owns no state of its own: the registry is injected and shared with
/// whatever else reads it (typically the HTTP surface), and the client
/// is the same bounded-timeout client the executors inherit.
pub struct ProxyAdapter {
    registry: Arc<RuntimeRegistry>,
    client: RemoteClient,
    config: ProxyConfig,
}

impl ProxyAdapter {
    /// A proxy adapter over `registry`, calling out through `client`.
    #[must_use]
    pub fn new(registry: Arc<RuntimeRegistry>, client: RemoteClient, config: ProxyConfig) -> Self {
        Self {
            registry,
            client,
            config,
        }
    }
}

#[async_trait]
impl Adapter for ProxyAdapter {
    /// Whatever engines have runtimes registered right now.
    async fn engines(&self) -> Vec<String> {
        self.registry
            .list()
            .await
            .into_iter()
            .map(|record| record.engine)
            .collect()
    }

    /// A constructed adapter is wired; per-runtime health is the
    /// registry's business, asked at activation time.
    fn status(&self) -> AdapterStatus {
        AdapterStatus::Up
    }

    async fn activate(
        &self,
        location: &str,
        endpoint: &str,
        spec: &DeploymentSpec,
    ) -> Result<Arc<dyn Executor>, AdapterError> {
        // Engine resolution. Unknown or unnamed engines are caller
        // problems, not runtime problems.
        let engine = spec.engine().ok_or_else(|| {
            AdapterError::Configuration("deployment spec names no engine".to_owned())
        })?;
        let record = self.registry.refresh_status(engine).await.ok_or_else(|| {
            AdapterError::Configuration(format!(
                "no runtime registered for engine \"{engine}\""
            ))
        })?;

        // Health gate. A runtime that did not just report itself up is
        // never sent an activation.
        if !record.is_up() {
            return Err(AdapterError::RemoteUnavailable {
                engine: engine.to_owned(),
                address: record.url.clone(),
                detail: record.status_detail.clone().unwrap_or_else(|| {
                    format!("probe reported status \"{}\"", record.status)
                }),
            });
        }

        let rewritten = rewrite_for_runtime(spec, &self.config.callback_base, location, endpoint);

        let activation_url = format!("{}/endpoints", record.url.trim_end_matches('/'));
        tracing::info!(
            engine = %engine,
            endpoint = %endpoint,
            url = %activation_url,
            "activating endpoint on remote runtime"
        );

        let reply = self
            .client
            .post_json(&activation_url, &rewritten, &HashMap::new())
            .await
            .map_err(|err| activation_transport_error(&err, engine, &activation_url))?;
        if !reply.is_success() {
            return Err(activation_status_error(reply.status, &reply.body, &activation_url));
        }

        // Endpoint resolution. `endpoint` is the current locator field;
        // older runtimes still send `uri`.
        let body = reply.json().ok_or_else(|| AdapterError::RemoteUnavailable {
            engine: engine.to_owned(),
            address: activation_url.clone(),
            detail: format!("activation response was not JSON: {}", reply.body),
        })?;
        let locator = body
            .get("endpoint")
            .or_else(|| body.get("uri"))
            .and_then(Value::as_str)
            .ok_or_else(|| AdapterError::RemoteUnavailable {
                engine: engine.to_owned(),
                address: activation_url.clone(),
                detail: "activation response carried no endpoint locator".to_owned(),
            })?;
        let base = body
            .get("baseUrl")
            .and_then(Value::as_str)
            .unwrap_or(&record.url);
        let resolved = resolve_endpoint(base, locator).map_err(|detail| {
            AdapterError::RemoteUnavailable {
                engine: engine.to_owned(),
                address: activation_url.clone(),
                detail,
            }
        })?;

        tracing::info!(
            engine = %engine,
            endpoint = %endpoint,
            url = %resolved,
            "bound remote endpoint"
        );
        Ok(Arc::new(RemoteExecutor::new(
            engine,
            resolved,
            self.client.clone(),
        )))
    }
}

/// Resolve the callable URL from a base address and a locator.
///
/// RFC 3986 resolution, not string concatenation: absolute locators
/// win outright, leading-slash locators replace the base's path, bare
/// ones resolve against it.
fn resolve_endpoint(base: &str, locator: &str) -> Result<Url, String> {
    let base_url =
        Url::parse(base).map_err(|e| format!("invalid runtime base URL \"{base}\": {e}"))?;
    base_url
        .join(locator)
        .map_err(|e| format!("invalid endpoint locator \"{locator}\": {e}"))
}
