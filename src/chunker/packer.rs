use crate::config::ChunkingOptions;
use crate::error::ChunkError;
use crate::segmenter::{Block, Strategy};
use serde::Serialize;
use std::iter::FusedIterator;
use tracing::{debug, trace, warn};

/// A chunk of text ready for embedding/indexing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chunk {
    /// The text content of this chunk, formatting preserved
    pub text: String,
    /// Metadata about the chunk
    pub metadata: ChunkMetadata,
}

/// Metadata for a chunk
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChunkMetadata {
    /// Sum of the estimated weights of the blocks in this chunk.
    ///
    /// This is the figure held to `max_tokens`. Each block is estimated on
    /// its own, so re-estimating the joined `text` can give a larger number.
    pub token_count: usize,
    /// Byte offset in the original text (start)
    pub start_offset: usize,
    /// Byte offset in the original text (end)
    pub end_offset: usize,
    /// Number of blocks merged into this chunk
    pub block_count: usize,
    /// Segmenter tier that produced the blocks
    pub strategy: Strategy,
    /// Set when a single block over the budget was emitted verbatim because
    /// no fallback tier was allowed or left
    pub oversized: bool,
}

/// Greedy, pull-based packer turning blocks into budgeted chunks.
///
/// Blocks are appended to a pending buffer until the next one would push it
/// over `max_tokens`. A block that is over budget on its own is re-split by
/// the fallback tier and packed by a nested packer, whose chunks are yielded
/// in place. Nothing is computed ahead of the consumer.
pub struct ChunkPacker<'a> {
    blocks: Vec<Block<'a>>,
    /// Estimated weight per block, filled on first use
    weights: Vec<Option<usize>>,
    options: ChunkingOptions,
    strategy: Strategy,
    fallback: Option<Strategy>,
    /// Next block to consider
    cursor: usize,
    /// First block of the pending buffer; the buffer is `buffer_start..cursor`
    buffer_start: usize,
    buffer_tokens: usize,
    nested: Option<Box<ChunkPacker<'a>>>,
    finished: bool,
}

impl<'a> ChunkPacker<'a> {
    /// Pack `blocks` produced by `strategy`, falling back along its chain
    pub fn new(blocks: Vec<Block<'a>>, strategy: Strategy, options: ChunkingOptions) -> Self {
        Self {
            weights: vec![None; blocks.len()],
            blocks,
            options,
            strategy,
            fallback: strategy.fallback(),
            cursor: 0,
            buffer_start: 0,
            buffer_tokens: 0,
            nested: None,
            finished: false,
        }
    }

    /// Segment `text` with `strategy` and pack the result
    pub fn for_text(text: &'a str, strategy: Strategy, options: ChunkingOptions) -> Self {
        Self::new(strategy.segment(text), strategy, options)
    }

    /// Override the tier used for oversized blocks (`None` disables it)
    pub fn with_fallback(mut self, fallback: Option<Strategy>) -> Self {
        self.fallback = fallback;
        self
    }

    /// Segmenter tier whose blocks this packer consumes
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    fn advance(&mut self) -> Option<Result<Chunk, ChunkError>> {
        loop {
            if let Some(nested) = self.nested.as_mut() {
                match nested.next() {
                    Some(item) => return Some(item),
                    None => self.nested = None,
                }
            }

            let Some(&block) = self.blocks.get(self.cursor) else {
                return self.flush().map(Ok);
            };
            let weight = match self.weight(self.cursor) {
                Ok(weight) => weight,
                Err(e) => return Some(Err(e)),
            };
            let budget = self.options.max_tokens;

            // Degenerate budget: one chunk per block, no re-splitting
            if budget == 0 {
                self.skip_block();
                return Some(Ok(self.single(block, weight, weight > 0)));
            }

            if weight > budget {
                if let Some(chunk) = self.flush() {
                    return Some(Ok(chunk));
                }
                self.skip_block();

                match self.fallback.filter(|_| self.options.allow_fallback) {
                    Some(tier) => {
                        debug!(
                            from = %self.strategy,
                            to = %tier,
                            weight,
                            budget,
                            "block exceeds budget, descending to fallback tier"
                        );
                        self.nested = Some(Box::new(self.descend(block, tier)));
                        continue;
                    }
                    None => {
                        warn!(
                            strategy = %self.strategy,
                            weight,
                            budget,
                            offset = block.offset,
                            "emitting oversized block verbatim"
                        );
                        return Some(Ok(self.single(block, weight, true)));
                    }
                }
            }

            if self.buffer_tokens + weight > budget && self.cursor > self.buffer_start {
                return Some(self.flush_with_overlap());
            }

            self.buffer_tokens += weight;
            self.cursor += 1;
        }
    }

    /// Estimated weight of block `index`, computed once
    fn weight(&mut self, index: usize) -> Result<usize, ChunkError> {
        if let Some(weight) = self.weights[index] {
            return Ok(weight);
        }
        let weight = self.options.weigh(self.blocks[index].text)?;
        self.weights[index] = Some(weight);
        Ok(weight)
    }

    fn skip_block(&mut self) {
        self.cursor += 1;
        self.buffer_start = self.cursor;
        self.buffer_tokens = 0;
    }

    /// Emit the pending buffer, if any, and start an empty one at the cursor
    fn flush(&mut self) -> Option<Chunk> {
        if self.cursor == self.buffer_start {
            return None;
        }

        let chunk = self.build(self.buffer_start..self.cursor, self.buffer_tokens, false);
        trace!(
            strategy = %self.strategy,
            blocks = chunk.metadata.block_count,
            tokens = chunk.metadata.token_count,
            "flushed chunk"
        );

        self.buffer_start = self.cursor;
        self.buffer_tokens = 0;
        Some(chunk)
    }

    /// Flush because the next block does not fit, then step back over
    /// trailing blocks so the next chunk repeats them.
    fn flush_with_overlap(&mut self) -> Result<Chunk, ChunkError> {
        let (start, end) = (self.buffer_start, self.cursor);
        let step_back = self.overlap_step_back(start, end)?;

        let chunk = self.build(start..end, self.buffer_tokens, false);

        // Always make progress, even when the overlap covers the whole chunk
        let resume = end.saturating_sub(step_back).max(start + 1);
        self.cursor = resume;
        self.buffer_start = resume;
        self.buffer_tokens = 0;

        trace!(
            strategy = %self.strategy,
            blocks = chunk.metadata.block_count,
            tokens = chunk.metadata.token_count,
            resume,
            "flushed chunk at budget"
        );
        Ok(chunk)
    }

    /// Number of trailing blocks of `start..end` whose combined weight stays
    /// below the overlap target.
    fn overlap_step_back(&mut self, start: usize, end: usize) -> Result<usize, ChunkError> {
        let target = self.options.overlap_tokens;
        if target == 0 {
            return Ok(0);
        }

        let mut covered = 0;
        let mut step_back = 0;
        for index in (start..end).rev() {
            let weight = self.weight(index)?;
            if covered + weight >= target {
                break;
            }
            covered += weight;
            step_back += 1;
        }
        Ok(step_back)
    }

    /// Nested packer for one oversized block, re-split by `tier`
    fn descend(&self, block: Block<'a>, tier: Strategy) -> ChunkPacker<'a> {
        let blocks = tier
            .segment(block.text)
            .into_iter()
            .map(|b| b.shifted(block.offset))
            .collect();
        ChunkPacker::new(blocks, tier, self.options.clone())
    }

    fn build(&self, range: std::ops::Range<usize>, token_count: usize, oversized: bool) -> Chunk {
        let blocks = &self.blocks[range];
        let text: String = blocks.iter().map(|b| b.text).collect();

        Chunk {
            text,
            metadata: ChunkMetadata {
                token_count,
                start_offset: blocks.first().map_or(0, |b| b.offset),
                end_offset: blocks.last().map_or(0, |b| b.end()),
                block_count: blocks.len(),
                strategy: self.strategy,
                oversized,
            },
        }
    }

    fn single(&self, block: Block<'a>, weight: usize, oversized: bool) -> Chunk {
        Chunk {
            text: block.text.to_string(),
            metadata: ChunkMetadata {
                token_count: weight,
                start_offset: block.offset,
                end_offset: block.end(),
                block_count: 1,
                strategy: self.strategy,
                oversized,
            },
        }
    }
}

impl Iterator for ChunkPacker<'_> {
    type Item = Result<Chunk, ChunkError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let item = self.advance();
        // Exhausted, or failed fast on an estimator error
        if !matches!(item, Some(Ok(_))) {
            self.finished = true;
        }
        item
    }
}

impl FusedIterator for ChunkPacker<'_> {}
