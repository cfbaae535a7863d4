//! Execution-resource hints consumed by the partitioner

/// Resource hints a client reports for partitioning a reduction.
///
/// All fields are clamped to sane minimums by [`normalized`](Self::normalized)
/// before use, so a backend may report zeros without breaking the planner.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResourceHints {
    /// Number of parallel execution units; at most this many chunks are made
    pub compute_units: usize,
    /// Smallest chunk worth launching; shorter inputs run as a single chunk
    pub min_chunk_len: usize,
    /// Partials folded per group in the global combine stage
    pub combine_fan_in: usize,
}

impl ResourceHints {
    /// Default smallest chunk worth a parallel launch
    pub const DEFAULT_MIN_CHUNK_LEN: usize = 4096;

    /// Default number of partials folded per combine group
    pub const DEFAULT_COMBINE_FAN_IN: usize = 64;

    /// Hints for `compute_units` workers with default chunking
    pub fn new(compute_units: usize) -> Self {
        Self {
            compute_units,
            min_chunk_len: Self::DEFAULT_MIN_CHUNK_LEN,
            combine_fan_in: Self::DEFAULT_COMBINE_FAN_IN,
        }
    }

    /// Override the minimum chunk length
    pub fn with_min_chunk_len(mut self, min_chunk_len: usize) -> Self {
        self.min_chunk_len = min_chunk_len;
        self
    }

    /// Override the combine fan-in
    pub fn with_combine_fan_in(mut self, combine_fan_in: usize) -> Self {
        self.combine_fan_in = combine_fan_in;
        self
    }

    /// Clamp every field to a usable value.
    ///
    /// `compute_units` and `min_chunk_len` become at least 1, and
    /// `combine_fan_in` at least 2 so hierarchical combining always shrinks.
    pub fn normalized(self) -> Self {
        Self {
            compute_units: self.compute_units.max(1),
            min_chunk_len: self.min_chunk_len.max(1),
            combine_fan_in: self.combine_fan_in.max(2),
        }
    }
}

impl Default for ResourceHints {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_clamps_zeros() {
        let hints = ResourceHints {
            compute_units: 0,
            min_chunk_len: 0,
            combine_fan_in: 1,
        }
        .normalized();
        assert_eq!(hints.compute_units, 1);
        assert_eq!(hints.min_chunk_len, 1);
        assert_eq!(hints.combine_fan_in, 2);
    }

    #[test]
    fn test_builder_overrides() {
        let hints = ResourceHints::new(8)
            .with_min_chunk_len(16)
            .with_combine_fan_in(4);
        assert_eq!(hints.compute_units, 8);
        assert_eq!(hints.min_chunk_len, 16);
        assert_eq!(hints.combine_fan_in, 4);
    }
}
