//! Aggregate statistics over a finished chunking run.

use crate::chunker::Chunk;
use std::time::Duration;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Size distribution and throughput for one run
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkStats {
    pub chunk_count: usize,
    /// Total characters across all chunks (overlap counted again)
    pub total_chars: usize,
    pub mean_chars: f64,
    pub min_chars: usize,
    pub max_chars: usize,
    /// Population standard deviation of chunk character length
    pub std_dev_chars: f64,
    pub oversized_count: usize,
    pub elapsed: Duration,
    /// Resident memory in bytes before chunking, when the platform reports it
    pub memory_before: Option<usize>,
    /// Resident memory in bytes after chunking
    pub memory_after: Option<usize>,
}

impl ChunkStats {
    pub fn from_chunks(chunks: &[Chunk], elapsed: Duration) -> Self {
        let lengths: Vec<usize> = chunks.iter().map(|c| c.text.chars().count()).collect();
        let count = lengths.len();
        let total: usize = lengths.iter().sum();

        let mean = if count > 0 {
            total as f64 / count as f64
        } else {
            0.0
        };
        let variance = if count > 0 {
            lengths
                .iter()
                .map(|&len| (len as f64 - mean).powi(2))
                .sum::<f64>()
                / count as f64
        } else {
            0.0
        };

        Self {
            chunk_count: count,
            total_chars: total,
            mean_chars: mean,
            min_chars: lengths.iter().copied().min().unwrap_or(0),
            max_chars: lengths.iter().copied().max().unwrap_or(0),
            std_dev_chars: variance.sqrt(),
            oversized_count: chunks.iter().filter(|c| c.metadata.oversized).count(),
            elapsed,
            memory_before: None,
            memory_after: None,
        }
    }

    /// Attach resident-memory samples taken around the run
    pub fn with_memory(mut self, before: Option<usize>, after: Option<usize>) -> Self {
        self.memory_before = before;
        self.memory_after = after;
        self
    }

    /// `X MB -> Y MB`, or `None` if either sample is missing
    pub fn memory_usage(&self) -> Option<String> {
        let (before, after) = (self.memory_before?, self.memory_after?);
        Some(format!(
            "{:.2} MB -> {:.2} MB",
            before as f64 / BYTES_PER_MB,
            after as f64 / BYTES_PER_MB
        ))
    }

    /// Chunks per second; infinite when the run took no measurable time
    pub fn chunks_per_sec(&self) -> f64 {
        per_second(self.chunk_count, self.elapsed)
    }

    /// Characters per second; infinite when the run took no measurable time
    pub fn chars_per_sec(&self) -> f64 {
        per_second(self.total_chars, self.elapsed)
    }
}

fn per_second(amount: usize, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs > 0.0 {
        amount as f64 / secs
    } else {
        f64::INFINITY
    }
}
