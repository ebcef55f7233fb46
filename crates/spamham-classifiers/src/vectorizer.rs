//! Fitted text vectorizer (bag of words / TF-IDF)
//!
//! The vectorizer is fit elsewhere and exported as JSON. Loading it here
//! rebuilds the tokenizer and weighting so that `transform` reproduces the
//! feature columns the classifiers were trained on.

use crate::artifact::{ensure_finite, DecodeError};
use ndarray::Array1;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Default token pattern: runs of two or more word characters
pub const DEFAULT_TOKEN_PATTERN: &str = r"(?u)\b\w\w+\b";

/// Anything that turns raw text into a feature row
pub trait TextVectorizer: Send + Sync {
    /// Transform one document
    fn transform(&self, text: &str) -> Array1<f64>;

    /// Width of the produced vectors
    fn n_features(&self) -> usize;
}

impl<T: TextVectorizer + ?Sized> TextVectorizer for std::sync::Arc<T> {
    fn transform(&self, text: &str) -> Array1<f64> {
        (**self).transform(text)
    }

    fn n_features(&self) -> usize {
        (**self).n_features()
    }
}

/// Term weighting scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VectorizerKind {
    /// Raw term counts
    Count,
    /// Counts scaled by inverse document frequency
    Tfidf,
}

/// Row normalization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
    None,
}

/// Exported vectorizer parameters, as found in the artifact store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorizerSpec {
    pub kind: VectorizerKind,

    /// Term to column index
    pub vocabulary: HashMap<String, usize>,

    /// Inverse document frequency per column (TF-IDF only)
    #[serde(default)]
    pub idf: Option<Vec<f64>>,

    #[serde(default = "default_true")]
    pub lowercase: bool,

    /// Count presence instead of occurrences
    #[serde(default)]
    pub binary: bool,

    /// Replace tf with 1 + ln(tf)
    #[serde(default)]
    pub sublinear_tf: bool,

    /// Defaults to l2 for TF-IDF and none for counts
    #[serde(default)]
    pub norm: Option<Norm>,

    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),

    #[serde(default)]
    pub stop_words: Vec<String>,
}

fn default_true() -> bool {
    true
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

/// Ready-to-use vectorizer
#[derive(Debug, Clone)]
pub struct Vectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Option<Array1<f64>>,
    lowercase: bool,
    binary: bool,
    sublinear_tf: bool,
    norm: Norm,
    ngram_range: (usize, usize),
    stop_words: HashSet<String>,
    token_pattern: Regex,
}

impl Vectorizer {
    /// Decode a JSON artifact
    pub fn from_json(bytes: &[u8]) -> Result<Self, DecodeError> {
        let spec: VectorizerSpec = serde_json::from_slice(bytes)?;
        Self::from_spec(spec)
    }

    /// Validate exported parameters and build the vectorizer
    pub fn from_spec(spec: VectorizerSpec) -> Result<Self, DecodeError> {
        let n = spec.vocabulary.len();
        if n == 0 {
            return Err(DecodeError::invalid("vocabulary is empty"));
        }

        let mut seen = vec![false; n];
        for (term, &idx) in &spec.vocabulary {
            if idx >= n {
                return Err(DecodeError::invalid(format!(
                    "term '{term}' maps to column {idx}, vocabulary has {n} columns"
                )));
            }
            if std::mem::replace(&mut seen[idx], true) {
                return Err(DecodeError::invalid(format!(
                    "column {idx} is assigned to more than one term"
                )));
            }
        }

        let (min_n, max_n) = spec.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(DecodeError::invalid(format!(
                "invalid ngram_range ({min_n}, {max_n})"
            )));
        }

        let idf = match (spec.kind, spec.idf) {
            (VectorizerKind::Tfidf, Some(idf)) => {
                if idf.len() != n {
                    return Err(DecodeError::invalid(format!(
                        "idf has {} entries, vocabulary has {n}",
                        idf.len()
                    )));
                }
                ensure_finite("idf", &idf)?;
                Some(Array1::from(idf))
            }
            (VectorizerKind::Tfidf, None) => {
                return Err(DecodeError::invalid("tfidf vectorizer is missing idf"));
            }
            (VectorizerKind::Count, _) => None,
        };

        let norm = spec.norm.unwrap_or(match spec.kind {
            VectorizerKind::Tfidf => Norm::L2,
            VectorizerKind::Count => Norm::None,
        });

        let token_pattern = Regex::new(DEFAULT_TOKEN_PATTERN)
            .map_err(|e| DecodeError::invalid(format!("token pattern: {e}")))?;

        Ok(Self {
            vocabulary: spec.vocabulary,
            idf,
            lowercase: spec.lowercase,
            binary: spec.binary,
            sublinear_tf: spec.sublinear_tf,
            norm,
            ngram_range: spec.ngram_range,
            stop_words: spec.stop_words.into_iter().collect(),
            token_pattern,
        })
    }

    /// Split text into the terms the vocabulary was built from
    pub fn analyze(&self, text: &str) -> Vec<String> {
        let text = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };

        let tokens: Vec<&str> = self
            .token_pattern
            .find_iter(&text)
            .map(|m| m.as_str())
            .filter(|tok| !self.stop_words.contains(*tok))
            .collect();

        let (min_n, max_n) = self.ngram_range;
        let mut terms = Vec::new();
        for n in min_n..=max_n.min(tokens.len()) {
            for window in tokens.windows(n) {
                terms.push(window.join(" "));
            }
        }
        terms
    }
}

impl TextVectorizer for Vectorizer {
    fn transform(&self, text: &str) -> Array1<f64> {
        let mut x = Array1::<f64>::zeros(self.vocabulary.len());
        for term in self.analyze(text) {
            if let Some(&idx) = self.vocabulary.get(&term) {
                x[idx] += 1.0;
            }
        }

        if self.binary {
            x.mapv_inplace(|tf| if tf > 0.0 { 1.0 } else { 0.0 });
        }
        if self.sublinear_tf {
            x.mapv_inplace(|tf| if tf > 0.0 { 1.0 + tf.ln() } else { 0.0 });
        }
        if let Some(idf) = &self.idf {
            x *= idf;
        }

        let norm = match self.norm {
            Norm::L2 => x.dot(&x).sqrt(),
            Norm::L1 => x.mapv(f64::abs).sum(),
            Norm::None => 0.0,
        };
        if norm > 0.0 {
            x /= norm;
        }

        x
    }

    fn n_features(&self) -> usize {
        self.vocabulary.len()
    }
}
