mod packer;


pub use packer::{Chunk, ChunkMetadata, ChunkPacker};

use crate::config::ChunkingOptions;
use crate::error::ChunkError;
use crate::segmenter::Selection;

/// Lazily produced chunk sequence; see [`stream_chunks`]
pub type Chunks<'a> = ChunkPacker<'a>;

/// Chunk `text` incrementally.
///
/// The strategy is resolved (and, for [`Selection::Adaptive`], detected)
/// up front; segmentation and packing then happen as chunks are pulled.
/// Dropping the iterator early is always fine. An estimator failure is
/// yielded once and ends the sequence.
pub fn stream_chunks<'a>(
    text: &'a str,
    selection: impl Into<Selection>,
    options: &ChunkingOptions,
) -> Chunks<'a> {
    let strategy = selection.into().resolve(text);
    ChunkPacker::for_text(text, strategy, options.clone())
}

/// Chunk `text` and collect every chunk, failing on the first estimator error
pub fn chunk_text(
    text: &str,
    selection: impl Into<Selection>,
    options: &ChunkingOptions,
) -> Result<Vec<Chunk>, ChunkError> {
    stream_chunks(text, selection, options).collect()
}
