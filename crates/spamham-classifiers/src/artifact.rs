//! Decoding fitted artifacts from their JSON export

use spamham_core::Error;

/// Why an artifact's bytes could not become a usable object
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// Not valid JSON, or JSON of the wrong shape
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    /// Well-formed but inconsistent parameters
    #[error("{0}")]
    Invalid(String),
}

impl DecodeError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }

    /// Attach the locator the bytes came from
    pub fn at(self, locator: impl Into<String>) -> Error {
        Error::corrupt(locator, self.to_string())
    }
}

/// Reject NaN and infinite parameters
pub(crate) fn ensure_finite<'a>(
    field: &str,
    values: impl IntoIterator<Item = &'a f64>,
) -> Result<(), DecodeError> {
    match values.into_iter().position(|v| !v.is_finite()) {
        Some(pos) => Err(DecodeError::invalid(format!(
            "{field}[{pos}] is not a finite number"
        ))),
        None => Ok(()),
    }
}
