//! Classifier trait and the fitted model variants

use crate::artifact::DecodeError;
use crate::linear::LinearModel;
use crate::naive_bayes::NaiveBayesModel;
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use spamham_core::{Error, Result};

/// Anything that maps a feature row to a raw label
pub trait LabelPredictor: Send + Sync {
    /// Predict the raw label for a single row
    fn predict(&self, features: &Array1<f64>) -> Result<i64>;

    /// Number of feature columns the model was trained on
    fn n_features(&self) -> usize;

    /// Short model family name for logs
    fn kind(&self) -> &str;
}

impl<T: LabelPredictor + ?Sized> LabelPredictor for std::sync::Arc<T> {
    fn predict(&self, features: &Array1<f64>) -> Result<i64> {
        (**self).predict(features)
    }

    fn n_features(&self) -> usize {
        (**self).n_features()
    }

    fn kind(&self) -> &str {
        (**self).kind()
    }
}

/// Model family named by an artifact's `kind` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierKind {
    LogisticRegression,
    LinearSvc,
    MultinomialNb,
}

#[derive(Deserialize)]
struct ArtifactHeader {
    kind: ClassifierKind,
}

/// A fitted binary classifier
#[derive(Debug)]
pub enum Classifier {
    LogisticRegression(LinearModel),
    LinearSvc(LinearModel),
    MultinomialNb(NaiveBayesModel),
}

impl Classifier {
    /// Decode a JSON artifact: a `kind` tag next to the serialized linfa model
    pub fn from_json(bytes: &[u8]) -> std::result::Result<Self, DecodeError> {
        let header: ArtifactHeader = serde_json::from_slice(bytes)?;
        Ok(match header.kind {
            ClassifierKind::LogisticRegression => {
                Self::LogisticRegression(LinearModel::from_json(bytes)?)
            }
            ClassifierKind::LinearSvc => Self::LinearSvc(LinearModel::from_json(bytes)?),
            ClassifierKind::MultinomialNb => {
                Self::MultinomialNb(NaiveBayesModel::from_json(bytes)?)
            }
        })
    }
}

impl LabelPredictor for Classifier {
    fn predict(&self, features: &Array1<f64>) -> Result<i64> {
        if features.len() != self.n_features() {
            return Err(Error::incompatible(format!(
                "{} expects {} features, got {}",
                self.kind(),
                self.n_features(),
                features.len()
            )));
        }

        let label = match self {
            Self::LogisticRegression(m) | Self::LinearSvc(m) => m.predict(features),
            Self::MultinomialNb(m) => m.predict(features),
        }
        .ok_or_else(|| Error::internal(format!("{} returned no label", self.kind())))?;

        i64::try_from(label)
            .map_err(|_| Error::internal(format!("label {label} does not fit in i64")))
    }

    fn n_features(&self) -> usize {
        match self {
            Self::LogisticRegression(m) | Self::LinearSvc(m) => m.n_features(),
            Self::MultinomialNb(m) => m.n_features(),
        }
    }

    fn kind(&self) -> &str {
        match self {
            Self::LogisticRegression(_) => "logistic_regression",
            Self::LinearSvc(_) => "linear_svc",
            Self::MultinomialNb(_) => "multinomial_nb",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::fixtures;
    use ndarray::array;
    use serde_json::json;

    #[test]
    fn test_decode_each_kind() {
        let artifacts = [
            (
                fixtures::linear("logistic_regression", &[1.0, -1.0], 0.0),
                "logistic_regression",
            ),
            (fixtures::linear("linear_svc", &[1.0, -1.0], -0.1), "linear_svc"),
            (
                fixtures::naive_bayes(&[0.5, 0.5], &[&[-2.3, -0.1], &[-0.1, -2.3]]),
                "multinomial_nb",
            ),
        ];

        for (artifact, kind) in artifacts {
            let bytes = serde_json::to_vec(&artifact).unwrap();
            let classifier = Classifier::from_json(&bytes).unwrap();
            assert_eq!(classifier.kind(), kind);
            assert_eq!(classifier.n_features(), 2);

            assert_eq!(classifier.predict(&array![1.0, 0.0]).unwrap(), 1);
            assert_eq!(classifier.predict(&array![0.0, 1.0]).unwrap(), 0);
        }
    }

    #[test]
    fn test_unknown_kind() {
        let bytes = serde_json::to_vec(&json!({ "kind": "random_forest", "trees": [] })).unwrap();
        assert!(matches!(Classifier::from_json(&bytes), Err(DecodeError::Json(_))));
    }

    #[test]
    fn test_kind_without_model_body() {
        let bytes = serde_json::to_vec(&json!({ "kind": "linear_svc", "coef": [1.0] })).unwrap();
        assert!(matches!(Classifier::from_json(&bytes), Err(DecodeError::Json(_))));
    }

    #[test]
    fn test_dimension_mismatch_is_error() {
        let artifact = fixtures::linear("linear_svc", &[1.0, 2.0, 3.0], 0.0);
        let classifier = Classifier::from_json(&serde_json::to_vec(&artifact).unwrap()).unwrap();
        let err = classifier.predict(&Array1::zeros(2)).unwrap_err();
        assert!(matches!(err, Error::Incompatible(_)));
    }
}
