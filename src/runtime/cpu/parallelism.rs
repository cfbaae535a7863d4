//! Thread and chunking configuration for the CPU client

/// Parallelism settings for a [`CpuClient`](super::CpuClient).
///
/// `None` (or zero) for any field means "use the default":
///
/// | Field            | Default |
/// |------------------|---------|
/// | `max_threads`    | rayon's global pool |
/// | `chunk_size`     | [`ResourceHints::DEFAULT_MIN_CHUNK_LEN`](crate::runtime::ResourceHints::DEFAULT_MIN_CHUNK_LEN) |
/// | `work_units`     | one per worker thread |
/// | `combine_fan_in` | [`ResourceHints::DEFAULT_COMBINE_FAN_IN`](crate::runtime::ResourceHints::DEFAULT_COMBINE_FAN_IN) |
///
/// ```ignore
/// let client = CpuRuntime::default_client(&device)
///     .with_parallelism(ParallelismConfig::new(Some(4), Some(1024)));
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ParallelismConfig {
    /// Size of a dedicated worker pool
    pub max_threads: Option<usize>,
    /// Smallest chunk worth a parallel launch
    pub chunk_size: Option<usize>,
    /// Number of chunks to plan for, independent of the thread count
    pub work_units: Option<usize>,
    /// Partials folded per group in the combine stage
    pub combine_fan_in: Option<usize>,
}

impl ParallelismConfig {
    /// Configure thread count and minimum chunk size
    pub fn new(max_threads: Option<usize>, chunk_size: Option<usize>) -> Self {
        Self {
            max_threads: max_threads.filter(|&n| n > 0),
            chunk_size: chunk_size.filter(|&n| n > 0),
            work_units: None,
            combine_fan_in: None,
        }
    }

    /// Plan `units` chunks instead of one per thread.
    ///
    /// Oversubscribing lets rayon balance uneven chunks; it also emulates
    /// wide devices when exercising the hierarchical combine stage.
    pub fn with_work_units(mut self, units: usize) -> Self {
        self.work_units = Some(units).filter(|&n| n > 0);
        self
    }

    /// Override the combine fan-in
    pub fn with_combine_fan_in(mut self, fan_in: usize) -> Self {
        self.combine_fan_in = Some(fan_in).filter(|&n| n > 0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_means_default() {
        let config = ParallelismConfig::new(Some(0), Some(0))
            .with_work_units(0)
            .with_combine_fan_in(0);
        assert_eq!(config, ParallelismConfig::default());
    }

    #[test]
    fn test_builder() {
        let config = ParallelismConfig::new(Some(2), None)
            .with_work_units(32)
            .with_combine_fan_in(4);
        assert_eq!(config.max_threads, Some(2));
        assert_eq!(config.chunk_size, None);
        assert_eq!(config.work_units, Some(32));
        assert_eq!(config.combine_fan_in, Some(4));
    }
}
