use async_trait::async_trait;
use std::path::PathBuf;

use super::{DataSource, LoadError};

/// Reads resources from a local directory.
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl DataSource for DirSource {
    async fn load_bytes(&self, name: &str) -> Result<Vec<u8>, LoadError> {
        let path = self.root.join(name);
        tokio::fs::read(&path).await.map_err(|e| LoadError::Io {
            resource: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}
