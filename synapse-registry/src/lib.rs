//! # synapse-registry — who runs what, and is it alive right now
//!
//! An in-memory, engine-keyed registry of runtime services. Runtimes
//! announce themselves with an engine name and a base URL; the registry
//! stores the record and nothing more. Health is established lazily, by
//! probing `GET {url}/info` when somebody actually asks — there is no
//! background monitor, no heartbeat, no TTL.
//!
//! Probe results are written back to the record as a courtesy cache:
//! useful for listings, never a substitute for asking again before an
//! activation.

#![deny(missing_docs)]

mod record;

pub use record::{RuntimeRecord, RuntimeStatus};

use std::collections::HashMap;

use synapse_client::RemoteClient;
use tokio::sync::RwLock;

/// Outcome of a [`RuntimeRegistry::register`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    /// No runtime was registered under this engine before.
    Created,
    /// An existing record was replaced wholesale.
    Replaced {
        /// URL of the record that was overwritten.
        previous_url: String,
    },
}

/// Engine-keyed store of runtime records with lazy health probing.
///
/// Construct one explicitly and share it (`Arc<RuntimeRegistry>`)
/// between whatever needs it — the proxy adapter, the HTTP surface,
/// tests. There is no global instance.
pub struct RuntimeRegistry {
    records: RwLock<HashMap<String, RuntimeRecord>>,
    client: RemoteClient,
}

impl RuntimeRegistry {
    /// Create an empty registry probing through `client`.
    pub fn new(client: RemoteClient) -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            client,
        }
    }

    /// Register a runtime under `engine`, replacing any existing record.
    ///
    /// Registration is a pure upsert: it stores what it was told, resets
    /// status to [`RuntimeStatus::Unknown`], and never checks that the
    /// URL answers. A runtime that registers and immediately dies is
    /// discovered by the next probe, not here.
    pub async fn register(
        &self,
        engine: impl Into<String>,
        url: impl Into<String>,
        version: Option<String>,
    ) -> Registration {
        let engine = engine.into();
        let url = url.into();
        let record = RuntimeRecord::new(engine.clone(), url, version);

        let mut records = self.records.write().await;
        match records.insert(engine.clone(), record) {
            Some(previous) => {
                tracing::info!(
                    engine = %engine,
                    previous_url = %previous.url,
                    "overwriting runtime registration"
                );
                Registration::Replaced {
                    previous_url: previous.url,
                }
            }
            None => {
                tracing::info!(engine = %engine, "adding runtime registration");
                Registration::Created
            }
        }
    }

    /// The stored record for `engine`, as last cached. No probe.
    pub async fn get(&self, engine: &str) -> Option<RuntimeRecord> {
        self.records.read().await.get(engine).cloned()
    }

    /// All stored records, sorted by engine name. No probes.
    pub async fn list(&self) -> Vec<RuntimeRecord> {
        let records = self.records.read().await;
        let mut all: Vec<_> = records.values().cloned().collect();
        all.sort_by(|a, b| a.engine.cmp(&b.engine));
        all
    }

    /// Probe `engine`'s runtime now and return the fresh record.
    ///
    /// Returns `None` for engines nobody registered. The probe result
    /// is also written back to the stored record, unless the runtime
    /// re-registered at a different URL while the probe was in flight.
    pub async fn refresh_status(&self, engine: &str) -> Option<RuntimeRecord> {
        let url = {
            let records = self.records.read().await;
            records.get(engine)?.url.clone()
        };

        let (status, detail) = self.probe(engine, &url).await;
        tracing::debug!(engine = %engine, url = %url, status = %status, "probed runtime");

        let mut records = self.records.write().await;
        let record = records.get_mut(engine)?;
        if record.url == url {
            record.status = status;
            record.status_detail = detail.clone();
            Some(record.clone())
        } else {
            // The record was replaced mid-probe; report what we saw
            // without stomping the new registration.
            let mut probed = record.clone();
            probed.url = url;
            probed.status = status;
            probed.status_detail = detail;
            Some(probed)
        }
    }

    /// Probe every registered runtime and return the fresh records,
    /// sorted by engine name.
    pub async fn refresh_all(&self) -> Vec<RuntimeRecord> {
        let engines: Vec<String> = {
            let records = self.records.read().await;
            records.keys().cloned().collect()
        };

        let mut all = Vec::with_capacity(engines.len());
        for engine in engines {
            if let Some(record) = self.refresh_status(&engine).await {
                all.push(record);
            }
        }
        all.sort_by(|a, b| a.engine.cmp(&b.engine));
        all
    }

    /// Probe `engine` now: is it registered and reporting itself up?
    pub async fn is_healthy(&self, engine: &str) -> bool {
        matches!(
            self.refresh_status(engine).await,
            Some(record) if record.is_up()
        )
    }

    /// The last recorded diagnostic for `engine`, for building
    /// unavailability errors.
    pub async fn status_diagnostic(&self, engine: &str) -> Option<String> {
        self.records
            .read()
            .await
            .get(engine)
            .and_then(|record| record.status_detail.clone())
    }

    /// One probe: `GET {url}/info`, expecting a JSON body whose
    /// `status` field equals `"up"` in any case.
    async fn probe(&self, engine: &str, url: &str) -> (RuntimeStatus, Option<String>) {
        let info_url = format!("{}/info", url.trim_end_matches('/'));
        match self.client.get_json(&info_url).await {
            Ok(reply) if reply.is_success() => {
                let status_field = reply.json().and_then(|body| {
                    body.get("status")
                        .and_then(serde_json::Value::as_str)
                        .map(str::to_owned)
                });
                match status_field {
                    Some(s) if s.eq_ignore_ascii_case("up") => (RuntimeStatus::Up, None),
                    Some(s) => (
                        RuntimeStatus::Down,
                        Some(format!("runtime reported status \"{s}\"")),
                    ),
                    None => (
                        RuntimeStatus::Down,
                        Some(format!("info response had no status field: {}", reply.body)),
                    ),
                }
            }
            Ok(reply) => (
                RuntimeStatus::Down,
                Some(format!("info probe returned HTTP {}", reply.status)),
            ),
            Err(err) => {
                tracing::warn!(engine = %engine, url = %url, error = %err, "runtime probe failed");
                (RuntimeStatus::Error, Some(err.to_string()))
            }
        }
    }
}
