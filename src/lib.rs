//! # reducr
//!
//! **Device-parallel 1-D reductions over pluggable execution backends.**
//!
//! reducr folds a contiguous array into one scalar using a caller-supplied
//! element transform and an associative, commutative combiner:
//!
//! ```text
//! result = combine(...combine(combine(identity, f(x0)), f(x1))..., f(x[N-1]))
//! ```
//!
//! Work is split into one chunk per execution unit of the target device,
//! each chunk is reduced by a kernel, and the partials are folded into the
//! final value.
//!
//! ## Features
//!
//! - **Generic operators**: any `UnaryOp`/`BinaryOp` pair, including closures
//! - **Standard operators**: sum, product, max, min; identity, square, abs, negate
//! - **Dependency-ordered scheduling**: blocking and non-blocking entry points
//!   that wait on [`Event`](runtime::Event)s
//! - **Runtime dispatch**: dtype-erased views for callers that only know the
//!   element type at run time
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use reducr::prelude::*;
//!
//! let device = CpuRuntime::default_device();
//! let client = CpuRuntime::default_client(&device);
//!
//! let data = [2.0f64, 3.0, 4.0];
//! let sum_sq = reduce_1d(&client, ArrayView::new(&data), Sum, Square, &[])?;
//! assert_eq!(sum_sq, 29.0);
//! ```
//!
//! ## Feature Flags
//!
//! - `cpu` (default): CPU backend
//! - `rayon` (default): Multi-threaded CPU kernels

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod dtype;
pub mod error;
pub mod ops;
pub mod reduction;
pub mod runtime;
pub mod view;

pub use reduction::{reduce_1d, reduce_1d_async, reduce_1d_dyn};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::dtype::{DType, Element};
    pub use crate::error::{Error, Result};
    pub use crate::ops::{
        Abs, BinaryOp, Identity, MapOp, Max, Min, Negate, Prod, ReduceOp, Square, Sum, UnaryOp,
        binary_fn, unary_fn,
    };
    pub use crate::reduction::{
        ReductionHandle, Scalar, Tolerance, reduce_1d, reduce_1d_async, reduce_1d_dyn,
    };
    pub use crate::runtime::{
        DependencySet, Device, Event, EventStatus, ResourceHints, Runtime, RuntimeClient,
    };
    pub use crate::view::{AnyArrayView, ArrayView};

    #[cfg(feature = "cpu")]
    pub use crate::runtime::cpu::{CpuClient, CpuDevice, CpuRuntime, ParallelismConfig};
}
