use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChunkError {
    #[error("Token estimator failed: {message}")]
    Estimator { message: String },

    #[error("Unknown strategy: {0} (valid strategies: {valid})", valid = crate::segmenter::STRATEGY_NAMES.join(", "))]
    UnknownStrategy(String),

    #[error("Invalid chunking config: {0}")]
    InvalidConfig(String),
}

impl ChunkError {
    /// Shorthand for estimator failures raised by custom estimators
    pub fn estimator(message: impl Into<String>) -> Self {
        Self::Estimator {
            message: message.into(),
        }
    }
}
