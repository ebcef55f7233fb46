//! Core types for spamham

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The classifiers a user can pick from
///
/// Display names are the only accepted spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ModelName {
    #[serde(rename = "Logistic Regression")]
    LogisticRegression,
    #[serde(rename = "Naive Bayes")]
    NaiveBayes,
    #[serde(rename = "Support Vector Machine")]
    SupportVectorMachine,
}

impl ModelName {
    /// All model names, in the order they are offered to users
    pub const ALL: [ModelName; 3] = [
        ModelName::LogisticRegression,
        ModelName::NaiveBayes,
        ModelName::SupportVectorMachine,
    ];

    /// Human-readable name shown in the UI
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::LogisticRegression => "Logistic Regression",
            Self::NaiveBayes => "Naive Bayes",
            Self::SupportVectorMachine => "Support Vector Machine",
        }
    }

    /// Default registry locator (`models:/<name>/latest`)
    pub fn default_locator(&self) -> String {
        format!("models:/{}/latest", self.display_name())
    }
}

impl fmt::Display for ModelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for ModelName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|name| name.display_name() == s)
            .ok_or_else(|| Error::invalid_model(s))
    }
}

/// Display label for a prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    Spam,
    Ham,
}

impl Label {
    /// Raw classifier output that means spam
    pub const SPAM_RAW: i64 = 1;

    /// Map a raw classifier output: `1` is spam, anything else is ham
    pub fn from_raw(raw: i64) -> Self {
        if raw == Self::SPAM_RAW {
            Self::Spam
        } else {
            Self::Ham
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spam => "Spam",
            Self::Ham => "Ham",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single user interaction: message text plus the chosen model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionRequest {
    /// Raw message text
    pub text: String,

    /// Selected model
    pub model: ModelName,
}

impl PredictionRequest {
    /// Build a request from raw form values, rejecting empty text and
    /// unknown model names
    pub fn parse(text: impl Into<String>, model: &str) -> Result<Self> {
        let text = text.into();
        if text.is_empty() {
            return Err(Error::EmptyInput);
        }
        let model = model.parse()?;
        Ok(Self { text, model })
    }
}

/// Outcome of a prediction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    /// Model that produced the label
    pub model: ModelName,

    /// Display label
    pub label: Label,

    /// Raw classifier output the label was mapped from
    pub raw: i64,

    /// Time spent vectorizing and predicting, in microseconds
    pub latency_us: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_name_round_trip() {
        for name in ModelName::ALL {
            assert_eq!(name.display_name().parse::<ModelName>().unwrap(), name);
        }
    }

    #[test]
    fn test_unknown_model_name() {
        let err = "Random Forest".parse::<ModelName>().unwrap_err();
        assert!(matches!(err, Error::InvalidModel(ref n) if n == "Random Forest"));

        // Only the exact display spelling is accepted
        assert!("naive bayes".parse::<ModelName>().is_err());
        assert!("NaiveBayes".parse::<ModelName>().is_err());
    }

    #[test]
    fn test_model_name_serde() {
        let json = serde_json::to_string(&ModelName::SupportVectorMachine).unwrap();
        assert_eq!(json, "\"Support Vector Machine\"");

        let name: ModelName = serde_json::from_str("\"Naive Bayes\"").unwrap();
        assert_eq!(name, ModelName::NaiveBayes);
    }

    #[test]
    fn test_default_locator() {
        assert_eq!(
            ModelName::LogisticRegression.default_locator(),
            "models:/Logistic Regression/latest"
        );
    }

    #[test]
    fn test_label_mapping() {
        assert_eq!(Label::from_raw(1), Label::Spam);
        assert_eq!(Label::from_raw(0), Label::Ham);
        assert_eq!(Label::from_raw(-1), Label::Ham);
        assert_eq!(Label::from_raw(2), Label::Ham);
        assert_eq!(Label::Spam.to_string(), "Spam");
        assert_eq!(Label::Ham.to_string(), "Ham");
    }

    #[test]
    fn test_request_parse() {
        let req = PredictionRequest::parse("free money now", "Naive Bayes").unwrap();
        assert_eq!(req.model, ModelName::NaiveBayes);

        assert!(matches!(
            PredictionRequest::parse("", "Naive Bayes"),
            Err(Error::EmptyInput)
        ));
        // Only a truly empty field is rejected
        let req = PredictionRequest::parse(" ", "Naive Bayes").unwrap();
        assert_eq!(req.text, " ");
        assert!(matches!(
            PredictionRequest::parse("hello", "Decision Tree"),
            Err(Error::InvalidModel(_))
        ));
    }
}
