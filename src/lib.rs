// Public API exports
pub mod chunker;
pub mod config;
pub mod detector;
pub mod error;
pub mod segmenter;
pub mod stats;
pub mod tokenizer;

// Re-export main types for convenience
pub use chunker::{chunk_text, stream_chunks, Chunk, ChunkMetadata, ChunkPacker, Chunks};

pub use config::{ChunkingConfig, ChunkingOptions, DEFAULT_MAX_TOKENS, DEFAULT_OVERLAP_TOKENS};

pub use detector::detect;

pub use error::ChunkError;

pub use segmenter::{Block, Selection, Strategy, STRATEGY_NAMES};

pub use stats::ChunkStats;

pub use tokenizer::{estimate_tokens, TokenEstimator, WordHeuristic};
