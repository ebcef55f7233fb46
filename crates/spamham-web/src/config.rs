//! Service configuration
//!
//! Artifact settings live at the top level of the YAML file next to a
//! `server` section. A missing file means defaults.

use crate::cli::Cli;
use serde::{Deserialize, Serialize};
use spamham_classifiers::{ArtifactsConfig, StoreConfig};
use std::path::Path;

/// Complete service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Store, vectorizer and model locators
    #[serde(flatten)]
    pub artifacts: ArtifactsConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

/// Listen settings for `serve`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_address")]
    pub address: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            port: default_port(),
        }
    }
}

fn default_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8501
}

impl AppConfig {
    /// Load configuration from file and CLI overrides
    pub fn load(config_path: &Path, cli: &Cli) -> anyhow::Result<Self> {
        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            Self::from_yaml(&content)?
        } else {
            tracing::debug!(
                "No config file at {}, using defaults",
                config_path.display()
            );
            Self::default()
        };

        config.apply_overrides(cli);
        config.artifacts.validate()?;
        Ok(config)
    }

    pub fn from_yaml(yaml: &str) -> spamham_core::Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(root) = &cli.models_dir {
            self.artifacts.store = StoreConfig::Filesystem {
                root: root.clone(),
                artifact_file: match &self.artifacts.store {
                    StoreConfig::Filesystem { artifact_file, .. } => artifact_file.clone(),
                    StoreConfig::Http { .. } => {
                        spamham_classifiers::store::DEFAULT_ARTIFACT_FILE.to_string()
                    }
                },
            };
        }

        if let Some(base_url) = &cli.store_url {
            self.artifacts.store = StoreConfig::Http {
                base_url: base_url.clone(),
                timeout_secs: match &self.artifacts.store {
                    StoreConfig::Http { timeout_secs, .. } => *timeout_secs,
                    StoreConfig::Filesystem { .. } => None,
                },
            };
        }

        if cli.no_verify_dimensions {
            self.artifacts.verify_dimensions = false;
        }
    }
}
