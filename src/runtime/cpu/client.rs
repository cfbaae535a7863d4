//! CPU client implementation

use super::device::CpuDevice;
use super::parallelism::ParallelismConfig;
use super::runtime::CpuRuntime;
use crate::error::{Error, Result};
use crate::runtime::{Device, ResourceHints, RuntimeClient};
use std::panic::{self, AssertUnwindSafe};
#[cfg(feature = "rayon")]
use std::sync::Arc;

/// CPU client for operation dispatch
///
/// Kernels run on rayon's global pool unless
/// [`with_parallelism`](Self::with_parallelism) requests a dedicated pool.
#[derive(Clone, Debug)]
pub struct CpuClient {
    pub(crate) device: CpuDevice,
    parallelism: ParallelismConfig,
    #[cfg(feature = "rayon")]
    pool: Option<Arc<rayon::ThreadPool>>,
}

impl CpuClient {
    /// Create a new CPU client
    pub fn new(device: CpuDevice) -> Self {
        Self {
            device,
            parallelism: ParallelismConfig::default(),
            #[cfg(feature = "rayon")]
            pool: None,
        }
    }

    /// Apply a parallelism configuration.
    ///
    /// When `max_threads` is set a dedicated pool of that size is built. If
    /// the pool cannot be built the client keeps using the global pool.
    pub fn with_parallelism(mut self, config: ParallelismConfig) -> Self {
        self.parallelism = config;
        #[cfg(feature = "rayon")]
        {
            self.pool = config.max_threads.and_then(|threads| {
                rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .thread_name(|i| format!("reducr-cpu-{i}"))
                    .build()
                    .map(Arc::new)
                    .inspect_err(|e| {
                        log::warn!(
                            "failed to build {threads}-thread pool, using global pool: {e}"
                        )
                    })
                    .ok()
            });
        }
        self
    }

    /// Current parallelism configuration
    pub fn parallelism(&self) -> &ParallelismConfig {
        &self.parallelism
    }

    /// Number of worker threads kernels are spread across
    pub fn num_threads(&self) -> usize {
        #[cfg(feature = "rayon")]
        {
            match &self.pool {
                Some(pool) => pool.current_num_threads(),
                None => rayon::current_num_threads(),
            }
        }
        #[cfg(not(feature = "rayon"))]
        {
            1
        }
    }

    /// One chunk per worker of a dedicated pool, otherwise one per
    /// hardware execution unit of the device
    fn default_work_units(&self) -> usize {
        #[cfg(feature = "rayon")]
        {
            if let Some(pool) = &self.pool {
                return pool.current_num_threads();
            }
        }
        self.device.compute_units()
    }

    /// Run `f` inside this client's pool (or directly on the global pool)
    #[cfg(feature = "rayon")]
    pub(crate) fn install_parallelism<R, F>(&self, f: F) -> R
    where
        R: Send,
        F: FnOnce() -> R + Send,
    {
        match &self.pool {
            Some(pool) => pool.install(f),
            None => f(),
        }
    }
}

impl RuntimeClient<CpuRuntime> for CpuClient {
    fn device(&self) -> &CpuDevice {
        &self.device
    }

    fn resource_hints(&self) -> ResourceHints {
        let units = self
            .parallelism
            .work_units
            .unwrap_or_else(|| self.default_work_units());
        let mut hints = ResourceHints::new(units);
        if let Some(chunk) = self.parallelism.chunk_size {
            hints = hints.with_min_chunk_len(chunk);
        }
        if let Some(fan_in) = self.parallelism.combine_fan_in {
            hints = hints.with_combine_fan_in(fan_in);
        }
        hints.normalized()
    }

    fn launch<I, T, F>(&self, items: &[I], kernel: F) -> Result<Vec<T>>
    where
        I: Sync,
        T: Send,
        F: Fn(&I) -> T + Send + Sync,
    {
        let run = || -> Vec<T> {
            #[cfg(feature = "rayon")]
            {
                if items.len() > 1 {
                    use rayon::prelude::*;
                    return self.install_parallelism(|| items.par_iter().map(&kernel).collect());
                }
            }
            items.iter().map(&kernel).collect()
        };
        panic::catch_unwind(AssertUnwindSafe(run))
            .map_err(|payload| Error::from_panic("cpu", payload.as_ref()))
    }

    fn spawn<F>(&self, task: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        std::thread::Builder::new()
            .name("reducr-cpu-async".to_string())
            .spawn(task)
            .map(drop)
            .map_err(|e| Error::Backend(format!("failed to spawn async worker: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launch_preserves_item_order() {
        let client = CpuClient::new(CpuDevice::new());
        let items: Vec<usize> = (0..100).collect();
        let out = client.launch(&items, |&i| i * 2).unwrap();
        assert_eq!(out, (0..100).map(|i| i * 2).collect::<Vec<_>>());
    }

    #[test]
    fn test_launch_empty() {
        let client = CpuClient::new(CpuDevice::new());
        let items: Vec<u8> = Vec::new();
        let out: Vec<u8> = client.launch(&items, |&b| b).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_launch_panic_maps_to_device_execution() {
        let client = CpuClient::new(CpuDevice::new());
        let items = [1, 2, 3];
        let err = client
            .launch(&items, |&i| {
                if i == 2 {
                    panic!("lane {} faulted", i);
                }
                i
            })
            .unwrap_err();
        match err {
            Error::DeviceExecution { backend, reason } => {
                assert_eq!(backend, "cpu");
                assert!(reason.contains("lane 2 faulted"), "{reason}");
            }
            other => panic!("expected DeviceExecution, got {:?}", other),
        }
    }

    #[test]
    fn test_resource_hints_follow_config() {
        let client = CpuClient::new(CpuDevice::new()).with_parallelism(
            ParallelismConfig::new(Some(2), Some(128))
                .with_work_units(16)
                .with_combine_fan_in(4),
        );
        let hints = client.resource_hints();
        assert_eq!(hints.compute_units, 16);
        assert_eq!(hints.min_chunk_len, 128);
        assert_eq!(hints.combine_fan_in, 4);
    }

    #[test]
    fn test_default_hints_follow_device() {
        let device = CpuDevice::new();
        let client = CpuClient::new(device.clone());
        assert_eq!(client.resource_hints().compute_units, device.compute_units());
    }

    #[cfg(feature = "rayon")]
    #[test]
    fn test_dedicated_pool_size() {
        let client = CpuClient::new(CpuDevice::new())
            .with_parallelism(ParallelismConfig::new(Some(3), None));
        assert_eq!(client.num_threads(), 3);
        assert_eq!(client.resource_hints().compute_units, 3);
    }

    #[test]
    fn test_spawn_runs_task() {
        let client = CpuClient::new(CpuDevice::new());
        let (tx, rx) = std::sync::mpsc::channel();
        client.spawn(move || tx.send(7).unwrap()).unwrap();
        assert_eq!(rx.recv().unwrap(), 7);
    }
}
