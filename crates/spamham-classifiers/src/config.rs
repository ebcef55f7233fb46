//! Configuration for artifact stores and model locators

use crate::http_store::HttpStore;
use crate::locator::Locator;
use crate::store::{ArtifactStore, FileSystemStore, DEFAULT_ARTIFACT_FILE};
use serde::{Deserialize, Serialize};
use spamham_core::{Error, ModelName, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Where artifacts come from and which ones to load
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactsConfig {
    /// Artifact store backend
    #[serde(default)]
    pub store: StoreConfig,

    /// Vectorizer locator
    #[serde(default = "default_vectorizer")]
    pub vectorizer: String,

    /// Model display name to locator
    #[serde(default = "default_models")]
    pub models: BTreeMap<ModelName, String>,

    /// Check that every classifier matches the vectorizer's feature count
    #[serde(default = "default_true")]
    pub verify_dimensions: bool,
}

/// Store backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StoreConfig {
    /// Registry directory on local disk
    Filesystem {
        #[serde(default = "default_models_dir")]
        root: PathBuf,

        #[serde(default = "default_artifact_file")]
        artifact_file: String,
    },

    /// Registry behind an HTTP endpoint
    Http {
        base_url: String,

        #[serde(default)]
        timeout_secs: Option<u64>,
    },
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::Filesystem {
            root: default_models_dir(),
            artifact_file: default_artifact_file(),
        }
    }
}

fn default_models_dir() -> PathBuf {
    PathBuf::from("./models")
}

fn default_artifact_file() -> String {
    DEFAULT_ARTIFACT_FILE.to_string()
}

fn default_vectorizer() -> String {
    "vectorizer.json".to_string()
}

fn default_models() -> BTreeMap<ModelName, String> {
    ModelName::ALL
        .into_iter()
        .map(|name| (name, name.default_locator()))
        .collect()
}

fn default_true() -> bool {
    true
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            vectorizer: default_vectorizer(),
            models: default_models(),
            verify_dimensions: true,
        }
    }
}

/// Parsed locators to load: one vectorizer, one per model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactManifest {
    pub vectorizer: Locator,
    pub models: BTreeMap<ModelName, Locator>,
}

impl ArtifactManifest {
    pub fn new(vectorizer: Locator) -> Self {
        Self {
            vectorizer,
            models: BTreeMap::new(),
        }
    }

    pub fn with_model(mut self, name: ModelName, locator: Locator) -> Self {
        self.models.insert(name, locator);
        self
    }
}

impl Default for ArtifactManifest {
    fn default() -> Self {
        ArtifactsConfig::default().manifest()
    }
}

impl ArtifactsConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&contents)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.models.is_empty() {
            return Err(Error::config("no models configured"));
        }
        if self.vectorizer.is_empty() {
            return Err(Error::config("vectorizer locator is empty"));
        }
        if let StoreConfig::Http { base_url, .. } = &self.store {
            if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
                return Err(Error::config(format!(
                    "store base_url must be an http(s) URL, got '{}'",
                    base_url
                )));
            }
        }
        Ok(())
    }

    pub fn manifest(&self) -> ArtifactManifest {
        ArtifactManifest {
            vectorizer: Locator::parse(&self.vectorizer),
            models: self
                .models
                .iter()
                .map(|(name, raw)| (*name, Locator::parse(raw)))
                .collect(),
        }
    }

    /// Instantiate the configured store
    pub fn build_store(&self) -> Result<Arc<dyn ArtifactStore>> {
        Ok(match &self.store {
            StoreConfig::Filesystem {
                root,
                artifact_file,
            } => Arc::new(FileSystemStore::new(root).with_artifact_file(artifact_file)),
            StoreConfig::Http {
                base_url,
                timeout_secs,
            } => Arc::new(HttpStore::with_timeout(
                base_url.clone(),
                timeout_secs.map(Duration::from_secs),
            )?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_all_models() {
        let config = ArtifactsConfig::default();
        assert_eq!(config.models.len(), 3);
        assert_eq!(
            config.models[&ModelName::SupportVectorMachine],
            "models:/Support Vector Machine/latest"
        );

        let manifest = config.manifest();
        assert_eq!(manifest.vectorizer, Locator::Path("vectorizer.json".to_string()));
        assert_eq!(manifest.models.len(), 3);
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
store:
  type: http
  base_url: http://127.0.0.1:5000/artifacts
  timeout_secs: 5
vectorizer: models:/vectorizer/latest
models:
  Logistic Regression: models:/Logistic Regression/2
  Naive Bayes: models:/Naive Bayes/latest
verify_dimensions: false
"#;
        let config = ArtifactsConfig::from_yaml(yaml).unwrap();
        assert!(matches!(config.store, StoreConfig::Http { timeout_secs: Some(5), .. }));
        assert_eq!(config.models.len(), 2);
        assert!(!config.verify_dimensions);
    }

    #[test]
    fn test_empty_yaml_is_defaults() {
        let config = ArtifactsConfig::from_yaml("{}").unwrap();
        assert!(matches!(config.store, StoreConfig::Filesystem { .. }));
        assert_eq!(config.models.len(), 3);
        assert!(config.verify_dimensions);
    }

    #[test]
    fn test_unknown_model_name_is_config_error() {
        let yaml = r#"
models:
  Random Forest: models:/Random Forest/latest
"#;
        assert!(matches!(ArtifactsConfig::from_yaml(yaml), Err(Error::Config(_))));
    }

    #[test]
    fn test_validation() {
        assert!(ArtifactsConfig::from_yaml("models: {}").is_err());
        let yaml = "store:\n  type: http\n  base_url: ftp://example.com\n";
        assert!(ArtifactsConfig::from_yaml(yaml).is_err());
    }
}
