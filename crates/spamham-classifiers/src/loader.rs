//! Startup artifact loading
//!
//! Resolves the vectorizer and every configured classifier before anything is
//! served. There is no partial result: one failure fails the whole load.

use crate::classifier::{Classifier, LabelPredictor};
use crate::config::ArtifactManifest;
use crate::handler::PredictionHandler;
use crate::locator::Locator;
use crate::store::ArtifactStore;
use crate::vectorizer::{TextVectorizer, Vectorizer};
use spamham_core::{Error, ModelName, Result};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

/// Everything needed to serve predictions, fully materialized
#[derive(Debug)]
pub struct LoadedArtifacts {
    pub vectorizer: Vectorizer,
    pub models: BTreeMap<ModelName, Classifier>,
}

impl LoadedArtifacts {
    /// Models that loaded, in display order
    pub fn model_names(&self) -> Vec<ModelName> {
        self.models.keys().copied().collect()
    }

    pub fn into_handler(self) -> PredictionHandler {
        PredictionHandler::new(self.vectorizer, self.models)
    }
}

/// Loads a manifest's artifacts from a store
pub struct ArtifactLoader {
    store: Arc<dyn ArtifactStore>,
    verify_dimensions: bool,
}

impl ArtifactLoader {
    pub fn new(store: Arc<dyn ArtifactStore>) -> Self {
        Self {
            store,
            verify_dimensions: true,
        }
    }

    /// Toggle the classifier/vectorizer feature-count check
    pub fn with_verify_dimensions(mut self, verify: bool) -> Self {
        self.verify_dimensions = verify;
        self
    }

    /// Load the vectorizer and all classifiers named in the manifest
    pub async fn load(&self, manifest: &ArtifactManifest) -> Result<LoadedArtifacts> {
        let start = Instant::now();
        info!(
            "Loading {} models from {}",
            manifest.models.len(),
            self.store.describe()
        );

        if manifest.models.is_empty() {
            return Err(Error::config("manifest names no models"));
        }

        let vectorizer = self
            .load_vectorizer(&manifest.vectorizer)
            .await
            .map_err(|e| {
                error!("✗ Failed to load vectorizer {}: {}", manifest.vectorizer, e);
                e
            })?;
        info!(
            "✓ Loaded vectorizer {} ({} features)",
            manifest.vectorizer,
            vectorizer.n_features()
        );

        let mut models = BTreeMap::new();
        for (name, locator) in &manifest.models {
            let classifier = self
                .load_classifier(*name, locator, &vectorizer)
                .await
                .map_err(|e| {
                    error!("✗ Failed to load model {}: {}", name, e);
                    e
                })?;
            info!("✓ Loaded model {} ({}) from {}", name, classifier.kind(), locator);
            models.insert(*name, classifier);
        }

        info!(
            "Loaded {} models in {}ms",
            models.len(),
            start.elapsed().as_millis()
        );

        Ok(LoadedArtifacts { vectorizer, models })
    }

    async fn load_vectorizer(&self, locator: &Locator) -> Result<Vectorizer> {
        let bytes = self.store.fetch(locator).await?;
        Vectorizer::from_json(&bytes).map_err(|e| e.at(locator.to_string()))
    }

    async fn load_classifier(
        &self,
        name: ModelName,
        locator: &Locator,
        vectorizer: &Vectorizer,
    ) -> Result<Classifier> {
        let bytes = self.store.fetch(locator).await?;
        let classifier = Classifier::from_json(&bytes).map_err(|e| e.at(locator.to_string()))?;

        if self.verify_dimensions && classifier.n_features() != vectorizer.n_features() {
            return Err(Error::incompatible(format!(
                "{} expects {} features but the vectorizer produces {}",
                name,
                classifier.n_features(),
                vectorizer.n_features()
            )));
        }

        Ok(classifier)
    }
}
