//! Deployment descriptors — what to activate, with what, and how.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One or many artifact paths.
///
/// Descriptors in the wild carry either a bare string or a list, so
/// both deserialize transparently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArtifactRef {
    /// A single artifact path.
    One(String),
    /// Several artifact paths.
    Many(Vec<String>),
}

/// The deployment descriptor for one endpoint of a knowledge object.
///
/// Only the fields the proxy itself reads are modeled. Everything else
/// rides along in `extra` and survives round-trips untouched, so a
/// runtime sees whatever the object packaged plus the fields the proxy
/// injects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeploymentSpec {
    /// Engine the endpoint wants to run on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,
    /// Adapter family hint. Informational at this layer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adapter: Option<String>,
    /// Artifact path(s) for the endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact: Option<ArtifactRef>,
    /// Entry point, in older descriptors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<String>,
    /// Entry function name. Newer descriptors; wins over `entry`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
    /// Every other descriptor field, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DeploymentSpec {
    /// Parse a descriptor from a JSON value.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// Engine name, treating blank as absent.
    pub fn engine(&self) -> Option<&str> {
        self.engine
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
    }

    /// Entry function name: `function` wins, `entry` is the fallback.
    pub fn entry_function(&self) -> Option<&str> {
        self.function.as_deref().or(self.entry.as_deref())
    }

    /// The artifact to activate.
    ///
    /// A bare path is taken as-is. For a list, the element matching
    /// `entry` wins, otherwise the first element.
    pub fn primary_artifact(&self) -> Option<&str> {
        match self.artifact.as_ref()? {
            ArtifactRef::One(path) => Some(path),
            ArtifactRef::Many(paths) => self
                .entry
                .as_deref()
                .and_then(|entry| paths.iter().find(|p| p.as_str() == entry))
                .or_else(|| paths.first())
                .map(String::as_str),
        }
    }
}
