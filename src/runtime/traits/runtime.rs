//! Core trait for compute backends

/// Core trait for compute backends
///
/// `Runtime` abstracts over different compute devices (CPU thread pool,
/// GPU-style compute queue, ...). It uses static dispatch via generics for
/// zero-cost abstraction; the reduction engine only ever talks to a
/// backend through its [`Client`](Runtime::Client).
///
/// # Associated Types
///
/// - `Device`: Identifies a specific compute unit (e.g., GPU 0, GPU 1)
/// - `Client`: Launches kernels and reports resource hints
///
/// # Example
///
/// ```ignore
/// let device = CpuRuntime::default_device();
/// let client = CpuRuntime::default_client(&device);
/// let total = reduce_1d(&client, ArrayView::new(&data), Sum, Square, &[])?;
/// ```
pub trait Runtime: Clone + Send + Sync + 'static {
    /// Device identifier type
    type Device: super::Device;

    /// Client for dispatching operations
    type Client: super::RuntimeClient<Self>;

    /// Human-readable name of this runtime
    fn name() -> &'static str;

    /// Get the default device
    fn default_device() -> Self::Device;

    /// Get the default client for a device
    fn default_client(device: &Self::Device) -> Self::Client;
}
