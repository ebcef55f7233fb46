//! Linear decision models (logistic regression, linear SVM)
//!
//! Both load as a fitted [`linfa_logistic`] model. At inference time the two
//! families make the same decision: the positive class when
//! `params · x + intercept` reaches the logistic threshold (0 for an SVM
//! exported with threshold 0.5).

use crate::artifact::{ensure_finite, DecodeError};
use linfa::traits::Predict;
use linfa_logistic::FittedLogisticRegression;
use ndarray::{Array1, Axis};
use serde::Deserialize;

/// The fields of a `FittedLogisticRegression` that are checked before linfa sees them
#[derive(Deserialize)]
struct LinearParams {
    threshold: f64,
    intercept: f64,
    params: Array1<f64>,
    labels: BinaryLabels,
}

#[derive(Deserialize)]
struct BinaryLabels {
    pos: ClassLabel,
    neg: ClassLabel,
}

#[derive(Deserialize)]
struct ClassLabel {
    class: usize,
}

#[derive(Debug)]
pub struct LinearModel {
    model: FittedLogisticRegression<f64, usize>,
    n_features: usize,
}

impl LinearModel {
    /// Decode a serialized `FittedLogisticRegression<f64, usize>`
    pub fn from_json(bytes: &[u8]) -> Result<Self, DecodeError> {
        let checked: LinearParams = serde_json::from_slice(bytes)?;
        if checked.params.is_empty() {
            return Err(DecodeError::invalid("params is empty"));
        }
        ensure_finite("params", &checked.params)?;
        ensure_finite("intercept", &[checked.intercept])?;
        if !(checked.threshold > 0.0 && checked.threshold < 1.0) {
            return Err(DecodeError::invalid(format!(
                "threshold {} is outside (0, 1)",
                checked.threshold
            )));
        }
        if checked.labels.pos.class == checked.labels.neg.class {
            return Err(DecodeError::invalid(format!(
                "positive and negative class are both {}",
                checked.labels.pos.class
            )));
        }

        Ok(Self {
            model: serde_json::from_slice(bytes)?,
            n_features: checked.params.len(),
        })
    }

    /// Raw label for one feature row
    pub fn predict(&self, x: &Array1<f64>) -> Option<usize> {
        let row = x.view().insert_axis(Axis(0));
        let labels: Array1<usize> = self.model.predict(&row);
        labels.get(0).copied()
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }
}
