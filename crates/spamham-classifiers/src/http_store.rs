//! Artifact store served over HTTP
//!
//! Registry locators map to `GET <base_url>/<name>/<version>`; the server
//! resolves `latest`. Plain locators map to `GET <base_url>/<path>`.

use crate::locator::Locator;
use crate::store::ArtifactStore;
use async_trait::async_trait;
use reqwest::StatusCode;
use spamham_core::{Error, Result};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct HttpStore {
    base_url: String,
    client: reqwest::Client,
}

impl HttpStore {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, None)
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    /// URL an artifact is fetched from
    pub fn url_for(&self, locator: &Locator) -> String {
        match locator {
            Locator::Registry { name, version } => {
                format!("{}/{}/{}", self.base_url, name, version)
            }
            Locator::Path(path) => format!("{}/{}", self.base_url, path.trim_start_matches('/')),
        }
    }
}

#[async_trait]
impl ArtifactStore for HttpStore {
    async fn fetch(&self, locator: &Locator) -> Result<Vec<u8>> {
        let url = self.url_for(locator);
        debug!("Fetching artifact {} from {}", locator, url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::unreachable(format!("{}: {}", url, e)))?;

        match response.status() {
            status if status.is_success() => {
                let bytes = response
                    .bytes()
                    .await
                    .map_err(|e| Error::unreachable(format!("{}: {}", url, e)))?;
                Ok(bytes.to_vec())
            }
            StatusCode::NOT_FOUND | StatusCode::GONE => Err(Error::missing(locator.to_string())),
            status => Err(Error::unreachable(format!("{} returned {}", url, status))),
        }
    }

    fn describe(&self) -> String {
        format!("http:{}", self.base_url)
    }
}
