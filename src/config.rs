use crate::error::ChunkError;
use crate::segmenter::Selection;
use crate::tokenizer::{TokenEstimator, WordHeuristic};
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;

/// Default target tokens per chunk
pub const DEFAULT_MAX_TOKENS: usize = 200;

/// Default overlap between successive chunks, in estimated tokens
pub const DEFAULT_OVERLAP_TOKENS: usize = 0;

/// Options for a single chunking call.
///
/// Built once, then shared read-only by the packer and every nested
/// fallback packer.
#[derive(Clone)]
pub struct ChunkingOptions {
    pub max_tokens: usize,
    pub overlap_tokens: usize,
    pub estimator: Arc<dyn TokenEstimator>,
    pub allow_fallback: bool,
}

impl ChunkingOptions {
    /// Create options with the default budget and the word heuristic
    pub fn new() -> Self {
        Self {
            max_tokens: DEFAULT_MAX_TOKENS,
            overlap_tokens: DEFAULT_OVERLAP_TOKENS,
            estimator: Arc::new(WordHeuristic),
            allow_fallback: true,
        }
    }

    /// Set the token budget per chunk.
    ///
    /// The budget bounds the sum of per-block estimates (see
    /// [`crate::ChunkMetadata::token_count`]), not an estimate of the joined
    /// chunk text. A budget of zero emits every block as its own chunk.
    pub fn max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set how many trailing tokens of a chunk to repeat in the next one
    pub fn overlap_tokens(mut self, overlap_tokens: usize) -> Self {
        self.overlap_tokens = overlap_tokens;
        self
    }

    /// Replace the token estimator
    pub fn estimator(mut self, estimator: impl TokenEstimator + 'static) -> Self {
        self.estimator = Arc::new(estimator);
        self
    }

    /// Enable or disable re-splitting of oversized blocks
    pub fn allow_fallback(mut self, allow: bool) -> Self {
        self.allow_fallback = allow;
        self
    }

    pub(crate) fn weigh(&self, text: &str) -> Result<usize, ChunkError> {
        self.estimator.estimate(text)
    }
}

impl Default for ChunkingOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ChunkingOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChunkingOptions")
            .field("max_tokens", &self.max_tokens)
            .field("overlap_tokens", &self.overlap_tokens)
            .field("allow_fallback", &self.allow_fallback)
            .finish_non_exhaustive()
    }
}

/// File form of the chunking settings (JSON).
///
/// Every field is optional; missing fields keep the defaults, and values
/// set here can in turn be overridden by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChunkingConfig {
    pub max_tokens: Option<usize>,
    pub overlap_tokens: Option<usize>,
    pub allow_fallback: Option<bool>,
    pub strategy: Option<String>,
}

impl ChunkingConfig {
    /// Parse a JSON config document
    pub fn from_json(json: &str) -> Result<Self, ChunkError> {
        serde_json::from_str(json).map_err(|e| ChunkError::InvalidConfig(e.to_string()))
    }

    /// Layer `other` on top of `self`; fields set in `other` win
    pub fn merge(self, other: ChunkingConfig) -> Self {
        Self {
            max_tokens: other.max_tokens.or(self.max_tokens),
            overlap_tokens: other.overlap_tokens.or(self.overlap_tokens),
            allow_fallback: other.allow_fallback.or(self.allow_fallback),
            strategy: other.strategy.or(self.strategy),
        }
    }

    /// Resolve into options (default estimator) and a strategy selection
    pub fn resolve(&self) -> Result<(ChunkingOptions, Selection), ChunkError> {
        let selection = match &self.strategy {
            Some(name) => name.parse()?,
            None => Selection::default(),
        };

        let options = ChunkingOptions::new()
            .max_tokens(self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS))
            .overlap_tokens(self.overlap_tokens.unwrap_or(DEFAULT_OVERLAP_TOKENS))
            .allow_fallback(self.allow_fallback.unwrap_or(true));

        Ok((options, selection))
    }
}
