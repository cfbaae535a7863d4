//! CPU runtime implementation
//!
//! The CPU runtime treats the host as a device whose execution units are the
//! worker threads of a rayon pool. Input views are already host-resident, so
//! there are no transfers; a launch is a parallel map over work items.
//!
//! # Parallelism
//!
//! By default kernels share rayon's global pool and the planner makes one
//! chunk per worker. [`ParallelismConfig`] pins a dedicated pool size, the
//! minimum chunk length, the planned chunk count and the combine fan-in.
//!
//! Without the `rayon` feature every launch runs serially on the calling
//! thread with identical results for identical hints.

mod client;
mod device;
mod parallelism;
mod runtime;

pub use client::CpuClient;
pub use device::CpuDevice;
pub use parallelism::ParallelismConfig;
pub use runtime::CpuRuntime;
