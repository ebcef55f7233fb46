//! Error types for spamham

/// Result type alias using spamham's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for spamham operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The message text was empty
    #[error("message text is empty")]
    EmptyInput,

    /// The requested model is not one of the loaded models
    #[error("invalid model selection: {0}")]
    InvalidModel(String),

    /// The artifact store could not be reached
    #[error("artifact store unreachable: {0}")]
    StoreUnreachable(String),

    /// The store has no artifact for the locator
    #[error("artifact not found: {0}")]
    ArtifactMissing(String),

    /// The artifact bytes could not be decoded or failed validation
    #[error("corrupt artifact {locator}: {reason}")]
    ArtifactCorrupt { locator: String, reason: String },

    /// Artifacts decoded fine but do not fit together
    #[error("incompatible artifacts: {0}")]
    Incompatible(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Network/IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new invalid model error
    pub fn invalid_model(name: impl Into<String>) -> Self {
        Self::InvalidModel(name.into())
    }

    /// Create a new store unreachable error
    pub fn unreachable(msg: impl Into<String>) -> Self {
        Self::StoreUnreachable(msg.into())
    }

    /// Create a new missing artifact error
    pub fn missing(locator: impl Into<String>) -> Self {
        Self::ArtifactMissing(locator.into())
    }

    /// Create a new corrupt artifact error
    pub fn corrupt(locator: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ArtifactCorrupt {
            locator: locator.into(),
            reason: reason.into(),
        }
    }

    /// Create a new incompatibility error
    pub fn incompatible(msg: impl Into<String>) -> Self {
        Self::Incompatible(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Per-request failures the end user can fix (empty text, bad selection).
    ///
    /// Everything else is an operator-facing failure.
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::EmptyInput | Self::InvalidModel(_))
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Config(err.to_string())
    }
}
