//! Partitioning of the index range into per-unit chunks

use crate::runtime::ResourceHints;
use std::ops::Range;

/// A contiguous sub-range of the input assigned to one execution unit
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Chunk {
    /// Position of the chunk in the partition
    pub index: usize,
    /// First element index
    pub start: usize,
    /// Number of elements
    pub len: usize,
}

impl Chunk {
    /// Index range covered by the chunk
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.start..self.start + self.len
    }
}

/// Split of `[0, len)` into contiguous, non-overlapping chunks
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Partition {
    len: usize,
    chunks: Vec<Chunk>,
}

impl Partition {
    /// Plan a partition of `len` elements for the given hints.
    ///
    /// - `len == 0` yields no chunks.
    /// - Inputs shorter than `min_chunk_len`, or a single compute unit,
    ///   yield one chunk.
    /// - Otherwise `min(compute_units, len / min_chunk_len)` chunks of
    ///   `len / count` elements are made, and the last chunk absorbs the
    ///   remainder.
    ///
    /// The result depends only on `(len, hints)`.
    pub fn plan(len: usize, hints: &ResourceHints) -> Self {
        if len == 0 {
            return Self {
                len,
                chunks: Vec::new(),
            };
        }

        let hints = hints.normalized();
        let count = (len / hints.min_chunk_len).min(hints.compute_units).max(1);
        let base = len / count;

        let chunks = (0..count)
            .map(|index| {
                let start = index * base;
                let len = if index + 1 == count { len - start } else { base };
                Chunk { index, start, len }
            })
            .collect();

        Self { len, chunks }
    }

    /// Total number of elements covered
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if there is nothing to reduce
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Number of chunks
    pub fn num_chunks(&self) -> usize {
        self.chunks.len()
    }

    /// The chunks, in index order
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }
}
