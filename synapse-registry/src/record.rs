//! Runtime records and their probe-derived status.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Health of a registered runtime, as last probed.
///
/// `Down` means the runtime answered but did not report itself up;
/// `Error` means the probe never got an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeStatus {
    /// Never probed since (re)registration.
    Unknown,
    /// Probe succeeded and the runtime reported "up".
    Up,
    /// The runtime answered, but not with "up": wrong status value,
    /// non-2xx, or a body the probe could not read.
    Down,
    /// The probe failed at the transport level.
    Error,
}

impl fmt::Display for RuntimeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeStatus::Unknown => f.write_str("unknown"),
            RuntimeStatus::Up => f.write_str("up"),
            RuntimeStatus::Down => f.write_str("down"),
            RuntimeStatus::Error => f.write_str("error"),
        }
    }
}

/// One registered runtime service.
///
/// Serializes to the environment payload callers see:
/// `{engine, version?, url, status, error_details?}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuntimeRecord {
    /// Engine name the runtime serves. Registry key.
    pub engine: String,
    /// Runtime-reported version, when it sent one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Base URL the runtime is reachable at.
    pub url: String,
    /// Status as of the last probe.
    pub status: RuntimeStatus,
    /// Diagnostic for the last non-up probe result.
    #[serde(rename = "error_details", skip_serializing_if = "Option::is_none")]
    pub status_detail: Option<String>,
}

impl RuntimeRecord {
    /// A freshly registered record. Status starts at `Unknown`; nothing
    /// is known about reachability until somebody asks.
    pub fn new(
        engine: impl Into<String>,
        url: impl Into<String>,
        version: Option<String>,
    ) -> Self {
        Self {
            engine: engine.into(),
            version,
            url: url.into(),
            status: RuntimeStatus::Unknown,
            status_detail: None,
        }
    }

    /// Whether the last probe saw the runtime up.
    pub fn is_up(&self) -> bool {
        self.status == RuntimeStatus::Up
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_records_start_unknown() {
        let record = RuntimeRecord::new("node", "http://runtime:3000", None);
        assert_eq!(record.status, RuntimeStatus::Unknown);
        assert!(!record.is_up());
    }

    #[test]
    fn serializes_to_the_environment_payload() {
        let record = RuntimeRecord {
            engine: "node".into(),
            version: Some("1.2.0".into()),
            url: "http://runtime:3000".into(),
            status: RuntimeStatus::Up,
            status_detail: None,
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({
                "engine": "node",
                "version": "1.2.0",
                "url": "http://runtime:3000",
                "status": "up",
            })
        );
    }

    #[test]
    fn probe_diagnostics_serialize_as_error_details() {
        let record = RuntimeRecord {
            engine: "node".into(),
            version: None,
            url: "http://runtime:3000".into(),
            status: RuntimeStatus::Error,
            status_detail: Some("connection refused".into()),
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["status"], "error");
        assert_eq!(value["error_details"], "connection refused");
        assert!(value.get("version").is_none());
    }

    #[test]
    fn status_displays_lowercase() {
        assert_eq!(RuntimeStatus::Unknown.to_string(), "unknown");
        assert_eq!(RuntimeStatus::Error.to_string(), "error");
    }
}
