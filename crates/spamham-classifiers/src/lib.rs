//! Spamham Classifiers
//!
//! Loads fitted spam classifiers and the text vectorizer they were trained
//! with, then serves Spam/Ham predictions.
//!
//! - [`store`] / [`http_store`]: artifact stores resolving locators to bytes
//! - [`loader`]: all-or-nothing startup loading from a store
//! - [`vectorizer`]: bag-of-words / TF-IDF feature extraction into `ndarray` rows
//! - [`classifier`]: linfa logistic regression, linear SVM and multinomial naive Bayes
//! - [`handler`]: the per-request predict operation
//!
//! Loaded artifacts are immutable and shared through `Arc`, so a handler can be
//! cloned into any number of request tasks.

pub mod artifact;
pub mod classifier;
pub mod config;
pub mod handler;
pub mod http_store;
pub mod linear;
pub mod loader;
pub mod locator;
pub mod naive_bayes;
pub mod store;
pub mod vectorizer;

pub use artifact::DecodeError;
pub use classifier::{Classifier, ClassifierKind, LabelPredictor};
pub use config::{ArtifactManifest, ArtifactsConfig, StoreConfig};
pub use handler::PredictionHandler;
pub use http_store::HttpStore;
pub use loader::{ArtifactLoader, LoadedArtifacts};
pub use locator::{Locator, Version};
pub use store::{ArtifactStore, FileSystemStore, InMemoryStore};
pub use vectorizer::{TextVectorizer, Vectorizer, VectorizerSpec};

/// Load everything a config names, failing on the first problem
pub async fn load_from_config(config: &ArtifactsConfig) -> spamham_core::Result<LoadedArtifacts> {
    config.validate()?;
    let store = config.build_store()?;
    ArtifactLoader::new(store)
        .with_verify_dimensions(config.verify_dimensions)
        .load(&config.manifest())
        .await
}

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::classifier::{Classifier, LabelPredictor};
    pub use crate::config::{ArtifactManifest, ArtifactsConfig};
    pub use crate::handler::PredictionHandler;
    pub use crate::loader::{ArtifactLoader, LoadedArtifacts};
    pub use crate::store::{ArtifactStore, FileSystemStore, InMemoryStore};
    pub use crate::vectorizer::{TextVectorizer, Vectorizer};
}
