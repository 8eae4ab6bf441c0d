//! Translate HTTP verdicts and transport failures into [`AdapterError`].
//!
//! Activation and execution read failures differently, so each phase
//! gets its own pair of translators. The asymmetries are deliberate:
//! before an endpoint is live, any 4xx means the deployment was
//! rejected; once it is live, only an outright 400 blames the caller,
//! and a broken connection mid-call counts as a remote fault rather
//! than unavailability.

use reqwest::StatusCode;
use synapse_api::AdapterError;

/// Pull the runtime's own description out of an error body.
///
/// Runtimes report failures as `{"description": "..."}`; anything else
/// is passed through raw, with the status line standing in for an
/// empty body.
fn failure_detail(status: StatusCode, body: &str) -> String {
    if let Some(description) = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .as_ref()
        .and_then(|v| v.get("description"))
        .and_then(|d| d.as_str())
    {
        return description.to_owned();
    }
    if body.trim().is_empty() {
        format!("HTTP {status}")
    } else {
        body.to_owned()
    }
}

/// Classify a non-success response to an activation call.
///
/// 4xx: the runtime looked at the deployment and rejected it.
/// Everything else: the runtime faulted while provisioning.
pub fn activation_status_error(status: StatusCode, body: &str, address: &str) -> AdapterError {
    let detail = failure_detail(status, body);
    if status.is_client_error() {
        AdapterError::Client {
            address: address.to_owned(),
            detail,
        }
    } else {
        AdapterError::Server {
            address: address.to_owned(),
            detail,
        }
    }
}

/// Classify a non-success response to an execution call.
///
/// Only an outright 400 blames the caller's input; any other verdict
/// is the runtime's fault. Bodies pass through raw — execution errors
/// are the object's own output, not a runtime envelope.
pub fn execution_status_error(status: StatusCode, body: &str, address: &str) -> AdapterError {
    let detail = if body.trim().is_empty() {
        format!("HTTP {status}")
    } else {
        body.to_owned()
    };
    if status == StatusCode::BAD_REQUEST {
        AdapterError::Client {
            address: address.to_owned(),
            detail,
        }
    } else {
        AdapterError::Server {
            address: address.to_owned(),
            detail,
        }
    }
}

/// Classify a transport failure during probing or activation.
///
/// Whatever the mechanics (refused connection, DNS, timeout), the
/// runtime could not be reached before any endpoint went live.
pub fn activation_transport_error(
    err: &reqwest::Error,
    engine: &str,
    address: &str,
) -> AdapterError {
    AdapterError::RemoteUnavailable {
        engine: engine.to_owned(),
        address: address.to_owned(),
        detail: err.to_string(),
    }
}

/// Classify a transport failure during execution.
///
/// A timeout means the runtime is unavailable; anything else broke a
/// connection that was already carrying the call.
pub fn execution_transport_error(
    err: &reqwest::Error,
    engine: &str,
    address: &str,
) -> AdapterError {
    if err.is_timeout() {
        AdapterError::RemoteUnavailable {
            engine: engine.to_owned(),
            address: address.to_owned(),
            detail: err.to_string(),
        }
    } else {
        AdapterError::Server {
            address: address.to_owned(),
            detail: format!("could not reach runtime: {err}"),
        }
    }
}
