use crate::error::ChunkError;

/// Estimates the budget cost of a span of text.
///
/// Implementations must be deterministic for a given input. Plain closures
/// `Fn(&str) -> usize` implement this trait; implement it directly when the
/// estimator can fail, and the failure will abort the chunking call.
pub trait TokenEstimator: Send + Sync {
    fn estimate(&self, text: &str) -> Result<usize, ChunkError>;
}

impl<F> TokenEstimator for F
where
    F: Fn(&str) -> usize + Send + Sync,
{
    fn estimate(&self, text: &str) -> Result<usize, ChunkError> {
        Ok(self(text))
    }
}

/// Default heuristic: ~0.75 tokens per whitespace-separated word
#[derive(Debug, Clone, Copy, Default)]
pub struct WordHeuristic;

impl TokenEstimator for WordHeuristic {
    fn estimate(&self, text: &str) -> Result<usize, ChunkError> {
        Ok(estimate_tokens(text))
    }
}

/// Estimate token count for a piece of text.
/// Blank text weighs nothing.
pub fn estimate_tokens(text: &str) -> usize {
    let words = text.split_whitespace().count();
    (words as f64 * 0.75).round() as usize
}
