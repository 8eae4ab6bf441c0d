//! Filesystem-backed artifact shelf.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use synapse_api::{AdapterError, ArtifactSource};

/// Serves artifact bytes from a directory tree.
pub struct FsShelf {
    root: PathBuf,
}

impl FsShelf {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Shelf paths come off the wire. Only plain relative components
    /// are resolved; anything else stays inside the root by refusal.
    fn resolve(&self, path: &str) -> Option<PathBuf> {
        let relative = Path::new(path);
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return None;
        }
        Some(self.root.join(relative))
    }
}

#[async_trait]
impl ArtifactSource for FsShelf {
    async fn fetch(&self, path: &str) -> Result<Vec<u8>, AdapterError> {
        let Some(full) = self.resolve(path) else {
            return Err(AdapterError::ArtifactNotFound(path.to_owned()));
        };
        match tokio::fs::read(&full).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(AdapterError::ArtifactNotFound(path.to_owned()))
            }
            Err(e) => Err(AdapterError::Other(Box::new(e))),
        }
    }
}
