//! Deployment spec rewriting for remote activation.

use serde_json::Value;
use synapse_api::DeploymentSpec;

/// Copy `spec` with the callback fields a remote runtime needs.
///
/// Injects `baseUrl` — `{callback_base}/artifacts/{location}`, the
/// address the runtime pulls artifact bytes from — and `uri`, the
/// endpoint identity it should report back under. The input spec is
/// never touched; both fields overwrite any value the object packaged,
/// since only the activator knows its own address.
pub fn rewrite_for_runtime(
    spec: &DeploymentSpec,
    callback_base: &str,
    location: &str,
    endpoint: &str,
) -> DeploymentSpec {
    let mut rewritten = spec.clone();
    let base_url = format!(
        "{}/artifacts/{}",
        callback_base.trim_end_matches('/'),
        location.trim_matches('/')
    );
    rewritten
        .extra
        .insert("baseUrl".to_owned(), Value::String(base_url));
    rewritten
        .extra
        .insert("uri".to_owned(), Value::String(endpoint.to_owned()));
    rewritten
}
