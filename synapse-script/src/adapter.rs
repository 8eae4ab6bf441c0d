//! Activation for rhai artifacts: fetch, compile, verify, bind.

use std::sync::Arc;

use async_trait::async_trait;
use rhai::Engine;
use synapse_api::{
    Adapter, AdapterError, AdapterStatus, ArtifactSource, DeploymentSpec, Executor,
};

use crate::executor::ScriptExecutor;

/// Activates knowledge objects on an embedded [rhai](https://rhai.rs)
/// engine.
///
/// The engine is built once and shared by every executor this adapter
/// hands out; artifacts come from the injected [`ArtifactSource`].
pub struct ScriptAdapter {
    engine: Arc<Engine>,
    artifacts: Arc<dyn ArtifactSource>,
}

impl ScriptAdapter {
    /// Build an adapter reading artifacts from `artifacts`.
    pub fn new(artifacts: Arc<dyn ArtifactSource>) -> Self {
        Self {
            engine: Arc::new(Engine::new()),
            artifacts,
        }
    }

    /// Compile the artifact at `path` and bind `entry` as the function
    /// to call.
    ///
    /// Everything that can be checked without running the script is
    /// checked here: the artifact must exist, decode as UTF-8, compile,
    /// and define a function named `entry`. Call-time failures are the
    /// script's own errors only.
    pub async fn activate_artifact(
        &self,
        path: &str,
        entry: &str,
    ) -> Result<ScriptExecutor, AdapterError> {
        let bytes = self.artifacts.fetch(path).await?;
        let source = String::from_utf8(bytes).map_err(|e| {
            AdapterError::Compilation(format!("artifact {path} is not valid UTF-8: {e}"))
        })?;

        tracing::debug!(path = %path, entry = %entry, "compiling script artifact");
        let ast = self
            .engine
            .compile(&source)
            .map_err(|e| AdapterError::Compilation(format!("cannot compile {path}: {e}")))?;

        if !ast.iter_functions().any(|f| f.name == entry) {
            return Err(AdapterError::Compilation(format!(
                "artifact {path} defines no function named \"{entry}\""
            )));
        }

        Ok(ScriptExecutor::new(
            self.engine.clone(),
            ast,
            entry,
            path,
        ))
    }
}

#[async_trait]
impl Adapter for ScriptAdapter {
    async fn engines(&self) -> Vec<String> {
        vec!["rhai".to_string()]
    }

    fn status(&self) -> AdapterStatus {
        AdapterStatus::Up
    }

    async fn activate(
        &self,
        location: &str,
        endpoint: &str,
        spec: &DeploymentSpec,
    ) -> Result<Arc<dyn Executor>, AdapterError> {
        let artifact = spec.primary_artifact().ok_or_else(|| {
            AdapterError::Configuration(format!(
                "deployment spec for endpoint \"{endpoint}\" names no artifact"
            ))
        })?;
        let entry = spec.entry_function().ok_or_else(|| {
            AdapterError::Configuration(format!(
                "deployment spec for endpoint \"{endpoint}\" names no entry function"
            ))
        })?;

        let path = join_shelf_path(location, artifact);
        let executor = self.activate_artifact(&path, entry).await?;
        Ok(Arc::new(executor))
    }
}

/// Join an object location and an artifact path into one shelf path.
fn join_shelf_path(location: &str, artifact: &str) -> String {
    let location = location.trim_end_matches('/');
    let artifact = artifact.trim_start_matches('/');
    if location.is_empty() {
        artifact.to_string()
    } else {
        format!("{location}/{artifact}")
    }
}
