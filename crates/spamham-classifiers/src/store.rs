//! Artifact stores: where fitted vectorizers and classifiers live
//!
//! Stores only resolve a locator to bytes. Decoding is the loader's job.

use crate::locator::{Locator, Version};
use async_trait::async_trait;
use spamham_core::{Error, Result};
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default artifact file inside a registry version directory
pub const DEFAULT_ARTIFACT_FILE: &str = "model.json";

/// Read-only source of artifact bytes
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Resolve a locator and return the artifact bytes
    async fn fetch(&self, locator: &Locator) -> Result<Vec<u8>>;

    /// Human-readable description for logs
    fn describe(&self) -> String;
}

/// Registry laid out on disk as `<root>/<name>/<version>/<artifact file>`
#[derive(Debug, Clone)]
pub struct FileSystemStore {
    root: PathBuf,
    artifact_file: String,
}

impl FileSystemStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            artifact_file: DEFAULT_ARTIFACT_FILE.to_string(),
        }
    }

    /// Override the file name looked up inside version directories
    pub fn with_artifact_file(mut self, name: impl Into<String>) -> Self {
        self.artifact_file = name.into();
        self
    }

    /// Turn a locator into the file that holds it
    pub async fn resolve(&self, locator: &Locator) -> Result<PathBuf> {
        if !tokio::fs::metadata(&self.root)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false)
        {
            return Err(Error::unreachable(format!(
                "store root {} is not a directory",
                self.root.display()
            )));
        }

        match locator {
            Locator::Path(path) => Ok(self.root.join(path)),
            Locator::Registry { name, version } => {
                let model_dir = self.root.join(name);
                let version_dir = match version {
                    Version::Number(n) => model_dir.join(n.to_string()),
                    Version::Latest => {
                        let latest = latest_version(&model_dir)
                            .await?
                            .ok_or_else(|| Error::missing(locator.to_string()))?;
                        debug!("Resolved {} to version {}", locator, latest);
                        model_dir.join(latest.to_string())
                    }
                };
                Ok(version_dir.join(&self.artifact_file))
            }
        }
    }
}

/// Highest positive numeric subdirectory of a model directory
async fn latest_version(model_dir: &Path) -> Result<Option<u64>> {
    let mut entries = match tokio::fs::read_dir(model_dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let mut latest = None;
    while let Some(entry) = entries.next_entry().await? {
        if !entry.file_type().await?.is_dir() {
            continue;
        }
        let version = entry
            .file_name()
            .to_str()
            .and_then(|name| name.parse::<u64>().ok())
            .filter(|&v| v > 0);
        if let Some(v) = version {
            latest = latest.max(Some(v));
        }
    }
    Ok(latest)
}

#[async_trait]
impl ArtifactStore for FileSystemStore {
    async fn fetch(&self, locator: &Locator) -> Result<Vec<u8>> {
        let path = self.resolve(locator).await?;
        debug!("Reading artifact {} from {}", locator, path.display());

        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(Error::missing(format!(
                "{} ({})",
                locator,
                path.display()
            ))),
            Err(e) => Err(e.into()),
        }
    }

    fn describe(&self) -> String {
        format!("filesystem:{}", self.root.display())
    }
}

/// Store backed by a map of locator strings, for tests and embedding
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    artifacts: HashMap<String, Vec<u8>>,
    offline: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that fails every fetch as unreachable
    pub fn offline() -> Self {
        Self {
            artifacts: HashMap::new(),
            offline: true,
        }
    }

    pub fn insert(&mut self, locator: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.artifacts.insert(locator.into(), bytes.into());
    }

    pub fn with_artifact(mut self, locator: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(locator, bytes);
        self
    }

    /// Store a serializable value as JSON bytes
    pub fn with_json<T: serde::Serialize>(self, locator: impl Into<String>, value: &T) -> Result<Self> {
        let bytes = serde_json::to_vec(value)?;
        Ok(self.with_artifact(locator, bytes))
    }
}

#[async_trait]
impl ArtifactStore for InMemoryStore {
    async fn fetch(&self, locator: &Locator) -> Result<Vec<u8>> {
        if self.offline {
            return Err(Error::unreachable("in-memory store is offline"));
        }
        self.artifacts
            .get(&locator.to_string())
            .cloned()
            .ok_or_else(|| Error::missing(locator.to_string()))
    }

    fn describe(&self) -> String {
        format!("memory:{} artifacts", self.artifacts.len())
    }
}
