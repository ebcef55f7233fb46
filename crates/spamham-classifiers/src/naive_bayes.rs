//! Multinomial naive Bayes over term features

use crate::artifact::{ensure_finite, DecodeError};
use linfa::traits::Predict;
use linfa_bayes::MultinomialNb;
use ndarray::{Array1, Axis};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Per-class parameters checked before the artifact reaches linfa
#[derive(Deserialize)]
struct ClassParams {
    prior: f64,
    feature_log_prob: Array1<f64>,
}

#[derive(Deserialize)]
struct NaiveBayesParams {
    class_info: BTreeMap<usize, ClassParams>,
}

#[derive(Debug)]
pub struct NaiveBayesModel {
    model: MultinomialNb<f64, usize>,
    n_features: usize,
}

impl NaiveBayesModel {
    /// Decode a serialized `MultinomialNb<f64, usize>`
    pub fn from_json(bytes: &[u8]) -> Result<Self, DecodeError> {
        let checked: NaiveBayesParams = serde_json::from_slice(bytes)?;
        let k = checked.class_info.len();
        if k < 2 {
            return Err(DecodeError::invalid(format!(
                "naive Bayes needs at least 2 classes, got {k}"
            )));
        }

        let mut n_features = None;
        for (class, info) in &checked.class_info {
            if !(info.prior > 0.0 && info.prior <= 1.0) {
                return Err(DecodeError::invalid(format!(
                    "class {class} has prior {}, expected a probability above 0",
                    info.prior
                )));
            }
            let width = info.feature_log_prob.len();
            match n_features {
                None if width == 0 => {
                    return Err(DecodeError::invalid("feature_log_prob is empty"));
                }
                None => n_features = Some(width),
                Some(n) if n != width => {
                    return Err(DecodeError::invalid(format!(
                        "class {class} has {width} feature columns, expected {n}"
                    )));
                }
                Some(_) => {}
            }
            ensure_finite(&format!("class {class} feature_log_prob"), &info.feature_log_prob)?;
        }

        Ok(Self {
            model: serde_json::from_slice(bytes)?,
            n_features: n_features.unwrap_or_default(),
        })
    }

    /// Raw label with the highest joint log likelihood
    pub fn predict(&self, x: &Array1<f64>) -> Option<usize> {
        let row = x.view().insert_axis(Axis(0));
        let labels: Array1<usize> = self.model.predict(&row);
        labels.get(0).copied()
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::fixtures;
    use ndarray::array;

    fn decode(artifact: serde_json::Value) -> Result<NaiveBayesModel, DecodeError> {
        NaiveBayesModel::from_json(&serde_json::to_vec(&artifact).unwrap())
    }

    fn spam_model() -> NaiveBayesModel {
        // Column 0 ("free") is likely under spam, column 1 ("meet") under ham
        decode(fixtures::naive_bayes(
            &[0.7, 0.3],
            &[&[0.1f64.ln(), 0.9f64.ln()], &[0.9f64.ln(), 0.1f64.ln()]],
        ))
        .unwrap()
    }

    #[test]
    fn test_predict() {
        let m = spam_model();
        assert_eq!(m.n_features(), 2);
        assert_eq!(m.predict(&array![3.0, 0.0]), Some(1));
        assert_eq!(m.predict(&array![0.0, 1.0]), Some(0));
        // Empty document falls back to the prior
        assert_eq!(m.predict(&array![0.0, 0.0]), Some(0));
    }

    #[test]
    fn test_rejects_inconsistent_classes() {
        let cases = [
            fixtures::naive_bayes(&[0.5, 0.5], &[&[-1.0, -1.0], &[-1.0]]),
            fixtures::naive_bayes(&[1.0], &[&[-1.0]]),
            fixtures::naive_bayes(&[0.0, 1.0], &[&[-1.0], &[-1.0]]),
            fixtures::naive_bayes(&[0.5, 0.5], &[&[], &[]]),
        ];
        for case in cases {
            assert!(
                matches!(decode(case.clone()), Err(DecodeError::Invalid(_))),
                "accepted {case}"
            );
        }
    }
}
