//! Trait for runtime clients that handle operation dispatch

use super::Runtime;
use crate::error::Result;
use crate::runtime::ResourceHints;

/// Trait for runtime clients that handle operation dispatch
///
/// A client is the engine's only view of an execution context. It answers
/// two questions: how much parallelism the device offers
/// ([`resource_hints`](Self::resource_hints)), and how to run one kernel
/// invocation per work item ([`launch`](Self::launch)).
pub trait RuntimeClient<R: Runtime>: Clone + Send + Sync {
    /// Get the device this client operates on
    fn device(&self) -> &R::Device;

    /// Execution-resource hints used to partition work for this device
    fn resource_hints(&self) -> ResourceHints;

    /// Run `kernel` once per item, possibly concurrently and in any order.
    ///
    /// Results are returned in item order. Launches are all-or-nothing: if
    /// any invocation faults the whole launch fails with
    /// [`Error::DeviceExecution`](crate::error::Error::DeviceExecution) and
    /// no partial results are returned.
    fn launch<I, T, F>(&self, items: &[I], kernel: F) -> Result<Vec<T>>
    where
        I: Sync,
        T: Send,
        F: Fn(&I) -> T + Send + Sync;

    /// Run `task` asynchronously, off the calling thread.
    fn spawn<F>(&self, task: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static;
}
