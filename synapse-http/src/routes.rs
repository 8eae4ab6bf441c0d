//! Handlers for the proxy surface.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use synapse_api::AdapterError;
use synapse_registry::{Registration, RuntimeRecord};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Serialize)]
pub(crate) struct Health {
    status: &'static str,
}

pub(crate) async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Body of `POST /environments`, as runtimes send it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Engine name to register under.
    #[serde(default)]
    pub engine: String,
    /// Base URL of the runtime's control endpoint.
    #[serde(default)]
    pub url: String,
    /// Runtime version, informational.
    #[serde(default)]
    pub version: Option<String>,
    /// Ask for a reactivation sweep even on a first registration.
    #[serde(default)]
    pub force_update: bool,
}

pub(crate) async fn register_runtime(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<RuntimeRecord>, ApiError> {
    let engine = req.engine.trim();
    let url = req.url.trim();
    if engine.is_empty() {
        return Err(ApiError::BadRequest("engine is required".into()));
    }
    if url.is_empty() {
        return Err(ApiError::BadRequest("url is required".into()));
    }

    let registration = state.registry.register(engine, url, req.version).await;

    // Fire-and-forget: registration answers before any reactivation
    // sweep runs.
    let replaced = matches!(registration, Registration::Replaced { .. });
    if replaced || req.force_update {
        if let Some(reactivator) = state.reactivator.clone() {
            let engine = engine.to_string();
            tokio::spawn(async move {
                reactivator.reactivate(&engine).await;
            });
        }
    }

    match state.registry.get(engine).await {
        Some(record) => Ok(Json(record)),
        None => Err(ApiError::Internal(format!(
            "record for \"{engine}\" vanished after registration"
        ))),
    }
}

pub(crate) async fn list_runtimes(
    State(state): State<Arc<AppState>>,
) -> Json<Vec<RuntimeRecord>> {
    Json(state.registry.refresh_all().await)
}

pub(crate) async fn get_runtime(
    State(state): State<Arc<AppState>>,
    Path(engine): Path<String>,
) -> Result<Json<RuntimeRecord>, ApiError> {
    match state.registry.refresh_status(&engine).await {
        Some(record) => Ok(Json(record)),
        None => Err(ApiError::NotFound(format!(
            "no runtime registered for engine \"{engine}\""
        ))),
    }
}

pub(crate) async fn get_artifact(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    match state.artifacts.fetch(&path).await {
        Ok(bytes) => Ok((
            [(header::CONTENT_TYPE, "application/octet-stream")],
            bytes,
        )),
        Err(AdapterError::ArtifactNotFound(path)) => {
            Err(ApiError::NotFound(format!("no artifact at \"{path}\"")))
        }
        Err(e) => Err(ApiError::Internal(e.to_string())),
    }
}
