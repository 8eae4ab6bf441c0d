//! MemoryArtifacts — HashMap-backed ArtifactSource for testing.

use crate::artifact::ArtifactSource;
use crate::error::AdapterError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory artifact store backed by a `HashMap` behind a `RwLock`.
pub struct MemoryArtifacts {
    files: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryArtifacts {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            files: RwLock::new(HashMap::new()),
        }
    }

    /// Add or replace one artifact.
    pub fn insert(&self, path: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.files
            .write()
            .expect("artifact store lock poisoned")
            .insert(path.into(), bytes.into());
    }
}

impl Default for MemoryArtifacts {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ArtifactSource for MemoryArtifacts {
    async fn fetch(&self, path: &str) -> Result<Vec<u8>, AdapterError> {
        let files = self
            .files
            .read()
            .map_err(|e| AdapterError::Other(e.to_string().into()))?;
        files
            .get(path)
            .cloned()
            .ok_or_else(|| AdapterError::ArtifactNotFound(path.to_owned()))
    }
}
