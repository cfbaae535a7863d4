//! One-dimensional reduction engine
//!
//! ```text
//!  ArrayView<T> (N elements)
//!        │  Partition::plan(N, client.resource_hints())
//!        ▼
//!  [chunk 0] [chunk 1] ... [chunk k-1]        one per execution unit
//!        │  client.launch: reduce_chunk       identity ⊕ f(x_i) ...
//!        ▼
//!  [p0] [p1] ... [p(k-1)]                     partial results
//!        │  combine_partials                  linear, or grouped by fan-in
//!        ▼
//!        T
//! ```
//!
//! # Numerical semantics
//!
//! - `N == 0` returns the combiner's identity without launching work.
//! - `N == 1` returns `transform(x0)` exactly.
//! - Otherwise the result equals a sequential left fold up to the rounding
//!   differences of regrouping; see [`Tolerance`] for comparing results.
//!
//! Chunk boundaries are a pure function of `N` and the client's hints, so a
//! given client configuration always reproduces the same value.
//!
//! # Scheduling
//!
//! [`reduce_1d`] blocks until every dependency has completed, runs, and
//! returns the scalar. [`reduce_1d_async`] returns a [`ReductionHandle`]
//! immediately; its [`Event`] can be passed as a dependency of later work.
//! A failed dependency fails the reduction before any kernel is launched.

mod combine;
mod handle;
pub mod local;
pub mod partition;
mod scalar;
mod tolerance;

pub use handle::ReductionHandle;
pub use partition::{Chunk, Partition};
pub use scalar::Scalar;
pub use tolerance::Tolerance;

use crate::dtype::Element;
use crate::error::{Error, Result};
use crate::ops::{BinaryOp, MapOp, ReduceOp, UnaryOp, validate_combiner};
use crate::runtime::{DependencySet, Event, Runtime, RuntimeClient};
use crate::view::{AnyArrayView, ArrayView};
use std::panic::{self, AssertUnwindSafe};

/// Reduce `input` to one scalar, blocking until the result is available.
///
/// Computes `combine(...combine(identity, f(x0))..., f(x[N-1]))` in
/// parallel on `client`'s device, after every event in `dependencies` has
/// completed.
///
/// # Errors
///
/// - `InvalidArgument` if `combine_op` has no usable identity
/// - `DependencyFailed` if a dependency failed; no kernel is launched
/// - `DeviceExecution` if the backend faulted while running kernels
///
/// # Example
///
/// ```ignore
/// let data = [2.0f64, 3.0, 4.0];
/// let sum_sq = reduce_1d(&client, ArrayView::new(&data), Sum, Square, &[])?;
/// assert_eq!(sum_sq, 29.0);
/// ```
pub fn reduce_1d<R, C, T, B, U>(
    client: &C,
    input: ArrayView<'_, T>,
    combine_op: B,
    transform_op: U,
    dependencies: &[Event],
) -> Result<T>
where
    R: Runtime,
    C: RuntimeClient<R>,
    T: Element,
    B: BinaryOp<T>,
    U: UnaryOp<T>,
{
    validate_combiner(&combine_op)?;
    DependencySet::from(dependencies)
        .wait_all()
        .inspect_err(|e| log::debug!("reduce_1d not started: {e}"))?;
    execute::<R, C, T, B, U>(client, input.as_slice(), &combine_op, &transform_op)
}

/// Start a reduction and return a handle to its pending result.
///
/// Arguments are validated before this returns; the dependency wait and the
/// reduction itself run off the calling thread. The input is owned (or
/// shared, e.g. `Arc<[T]>`) because the work outlives this call.
///
/// # Errors
///
/// Returns `InvalidArgument` synchronously for an unusable identity, and
/// `Backend` if the async worker cannot be started. Dependency and
/// execution failures are reported by [`ReductionHandle::wait`].
pub fn reduce_1d_async<R, C, T, B, U, D>(
    client: &C,
    input: D,
    combine_op: B,
    transform_op: U,
    dependencies: &[Event],
) -> Result<ReductionHandle<T>>
where
    R: Runtime,
    C: RuntimeClient<R> + 'static,
    T: Element,
    B: BinaryOp<T> + 'static,
    U: UnaryOp<T> + 'static,
    D: AsRef<[T]> + Send + Sync + 'static,
{
    validate_combiner(&combine_op)?;

    let deps = DependencySet::from(dependencies);
    let event = Event::new();
    let (handle, slot) = ReductionHandle::new(event.clone());
    let worker_client = client.clone();

    client.spawn(move || {
        let run = || {
            deps.wait_all().and_then(|()| {
                event.start();
                let data = input.as_ref();
                execute::<R, C, T, B, U>(&worker_client, data, &combine_op, &transform_op)
            })
        };
        // the event must settle even if the worker itself unwinds
        let outcome = panic::catch_unwind(AssertUnwindSafe(run))
            .unwrap_or_else(|payload| Err(Error::from_panic(R::name(), payload.as_ref())));
        let failure = outcome.as_ref().err().map(|e| e.to_string());
        // publish before signalling so waiters always find a result
        *slot.lock() = Some(outcome);
        match failure {
            None => event.complete(),
            Some(reason) => {
                log::debug!("reduction {} failed: {reason}", event.id());
                event.fail(reason)
            }
        };
    })?;

    Ok(handle)
}

/// Reduce a dtype-erased view with a standard operator pair.
///
/// The element type is dispatched at run time; the result carries the same
/// dtype as the input.
pub fn reduce_1d_dyn<R, C>(
    client: &C,
    input: AnyArrayView<'_>,
    combine_op: ReduceOp,
    transform_op: MapOp,
    dependencies: &[Event],
) -> Result<Scalar>
where
    R: Runtime,
    C: RuntimeClient<R>,
{
    match input {
        AnyArrayView::F32(view) => {
            reduce_1d::<R, C, f32, _, _>(client, view, combine_op, transform_op, dependencies)
                .map(Scalar::F32)
        }
        AnyArrayView::F64(view) => {
            reduce_1d::<R, C, f64, _, _>(client, view, combine_op, transform_op, dependencies)
                .map(Scalar::F64)
        }
    }
}

fn execute<R, C, T, B, U>(client: &C, data: &[T], combine_op: &B, transform_op: &U) -> Result<T>
where
    R: Runtime,
    C: RuntimeClient<R>,
    T: Element,
    B: BinaryOp<T>,
    U: UnaryOp<T>,
{
    if data.is_empty() {
        return Ok(combine_op.identity());
    }

    let hints = client.resource_hints();
    let partition = Partition::plan(data.len(), &hints);
    log::debug!(
        "reduce_1d on {}: n={} dtype={} chunks={} combine={} transform={}",
        R::name(),
        data.len(),
        T::DTYPE,
        partition.num_chunks(),
        combine_op.name(),
        transform_op.name()
    );

    let partials = client.launch(partition.chunks(), |chunk| {
        local::reduce_chunk(&data[chunk.range()], transform_op, combine_op)
    })?;
    combine::combine_partials::<R, C, T, B>(client, partials, combine_op, hints.combine_fan_in)
}
