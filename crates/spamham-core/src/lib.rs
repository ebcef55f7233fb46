//! Spamham Core
//!
//! Core types and error handling shared across spamham components.
//!
//! This crate provides:
//! - The enumerated set of selectable models
//! - Spam/Ham labels and the raw-output mapping rule
//! - Prediction request and result values
//! - Error types and result handling

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{Label, ModelName, Prediction, PredictionRequest};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::types::{Label, ModelName, Prediction, PredictionRequest};
}
