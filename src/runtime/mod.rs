//! Runtime backends for reduction execution
//!
//! This module defines the `Runtime` trait family the reduction engine
//! depends on, plus the CPU implementation.
//!
//! # Architecture
//!
//! ```text
//! Runtime (backend identity)
//! ├── Device (identifies a specific GPU/CPU, reports execution units)
//! └── Client (launches kernels, reports ResourceHints, spawns async work)
//!
//! Event / DependencySet (completion handles shared by every backend)
//! ```
//!
//! The engine never assumes a concrete device model: anything that can run
//! one closure per work item and report its parallelism can host a
//! reduction.

mod event;
mod hints;
mod traits;

#[cfg(feature = "cpu")]
pub mod cpu;

pub use event::{DependencySet, Event, EventStatus};
pub use hints::ResourceHints;
pub use traits::{Device, Runtime, RuntimeClient};
