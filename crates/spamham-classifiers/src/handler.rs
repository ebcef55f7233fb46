//! Prediction handler: text + model selection in, Spam/Ham out

use crate::classifier::{Classifier, LabelPredictor};
use crate::vectorizer::{TextVectorizer, Vectorizer};
use spamham_core::{Error, Label, ModelName, Prediction, PredictionRequest, Result};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Immutable, cheaply clonable handle over loaded artifacts
pub struct PredictionHandler<V = Vectorizer, C = Classifier> {
    vectorizer: Arc<V>,
    models: Arc<BTreeMap<ModelName, C>>,
}

impl<V, C> Clone for PredictionHandler<V, C> {
    fn clone(&self) -> Self {
        Self {
            vectorizer: Arc::clone(&self.vectorizer),
            models: Arc::clone(&self.models),
        }
    }
}

impl<V, C> PredictionHandler<V, C>
where
    V: TextVectorizer,
    C: LabelPredictor,
{
    pub fn new(vectorizer: V, models: BTreeMap<ModelName, C>) -> Self {
        Self {
            vectorizer: Arc::new(vectorizer),
            models: Arc::new(models),
        }
    }

    /// Models that can be selected, in display order
    pub fn available_models(&self) -> Vec<ModelName> {
        self.models.keys().copied().collect()
    }

    /// Predict from raw form values
    pub fn predict(&self, text: &str, model_name: &str) -> Result<Label> {
        let request = PredictionRequest::parse(text, model_name).map_err(|e| {
            record_rejection(&e);
            e
        })?;
        self.handle(&request).map(|p| p.label)
    }

    /// Run a validated request
    pub fn handle(&self, request: &PredictionRequest) -> Result<Prediction> {
        self.predict_with(&request.text, request.model)
    }

    /// Vectorize `text` and run the selected model
    pub fn predict_with(&self, text: &str, model: ModelName) -> Result<Prediction> {
        if text.is_empty() {
            record_rejection(&Error::EmptyInput);
            return Err(Error::EmptyInput);
        }
        let classifier = self.models.get(&model).ok_or_else(|| {
            let err = Error::invalid_model(model.display_name());
            record_rejection(&err);
            err
        })?;

        let start = Instant::now();
        let features = self.vectorizer.transform(text);
        let raw = classifier.predict(&features)?;
        let label = Label::from_raw(raw);
        let latency_us = start.elapsed().as_micros() as u64;

        debug!(
            model = model.display_name(),
            kind = classifier.kind(),
            raw,
            label = label.as_str(),
            latency_us,
            "Prediction complete"
        );
        metrics::counter!(
            "spamham_predictions_total",
            "model" => model.display_name(),
            "label" => label.as_str()
        )
        .increment(1);
        metrics::histogram!("spamham_prediction_latency_us").record(latency_us as f64);

        Ok(Prediction {
            model,
            label,
            raw,
            latency_us,
        })
    }
}

fn record_rejection(err: &Error) {
    let reason = match err {
        Error::EmptyInput => "empty_input",
        Error::InvalidModel(_) => "invalid_model",
        _ => "other",
    };
    debug!(reason, "Prediction request rejected");
    metrics::counter!("spamham_rejected_total", "reason" => reason).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::fixtures;
    use serde_json::json;

    fn handler() -> PredictionHandler {
        let vectorizer = Vectorizer::from_json(
            &serde_json::to_vec(&json!({
                "kind": "count",
                "vocabulary": { "free": 0, "money": 1, "meet": 2 }
            }))
            .unwrap(),
        )
        .unwrap();
        let classifier = Classifier::from_json(
            &serde_json::to_vec(&fixtures::linear("linear_svc", &[1.0, 1.0, -2.0], -0.5)).unwrap(),
        )
        .unwrap();

        let models = BTreeMap::from([(ModelName::SupportVectorMachine, classifier)]);
        PredictionHandler::new(vectorizer, models)
    }

    #[test]
    fn test_predict() {
        let h = handler();
        assert_eq!(h.predict("FREE money!!", "Support Vector Machine").unwrap(), Label::Spam);
        assert_eq!(h.predict("can we meet", "Support Vector Machine").unwrap(), Label::Ham);
        // Zero vector sits below the intercept
        assert_eq!(h.predict("hello", "Support Vector Machine").unwrap(), Label::Ham);
        // Whitespace is a message, not an empty field
        assert_eq!(h.predict(" ", "Support Vector Machine").unwrap(), Label::Ham);
    }

    #[test]
    fn test_model_not_loaded() {
        let h = handler();
        assert_eq!(h.available_models(), vec![ModelName::SupportVectorMachine]);
        assert!(matches!(
            h.predict("free money", "Naive Bayes"),
            Err(Error::InvalidModel(ref n)) if n == "Naive Bayes"
        ));
        assert!(matches!(
            h.predict("free money", "Gradient Boosting"),
            Err(Error::InvalidModel(_))
        ));
    }

    #[test]
    fn test_empty_text() {
        let h = handler();
        assert!(matches!(h.predict("", "Support Vector Machine"), Err(Error::EmptyInput)));
        assert!(matches!(
            h.predict_with("", ModelName::SupportVectorMachine),
            Err(Error::EmptyInput)
        ));
    }

    #[test]
    fn test_prediction_details() {
        let h = handler();
        let p = h.predict_with("free money", ModelName::SupportVectorMachine).unwrap();
        assert_eq!(p.raw, 1);
        assert_eq!(p.label, Label::Spam);
        assert_eq!(p.model, ModelName::SupportVectorMachine);

        // Clones share the same loaded state
        let clone = h.clone();
        let request = PredictionRequest::parse("free money", "Support Vector Machine").unwrap();
        let again = clone.handle(&request).unwrap();
        assert_eq!((again.label, again.raw), (p.label, p.raw));
    }
}
