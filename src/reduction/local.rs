//! Per-chunk reduction kernel

use crate::dtype::Element;
use crate::ops::{BinaryOp, UnaryOp};

/// Chunks up to this length are folded linearly; longer chunks are split in
/// halves and combined pairwise.
pub const LEAF_LEN: usize = 256;

/// Reduce one chunk to its partial result.
///
/// The kernel only reads `chunk`. A one-element chunk yields
/// `transform(x)` with no combine applied; an empty chunk yields the
/// identity.
#[inline]
pub fn reduce_chunk<T, U, B>(chunk: &[T], transform_op: &U, combine_op: &B) -> T
where
    T: Element,
    U: UnaryOp<T> + ?Sized,
    B: BinaryOp<T> + ?Sized,
{
    match chunk {
        [] => combine_op.identity(),
        [x] => transform_op.apply(*x),
        _ => tree_fold(chunk, transform_op, combine_op),
    }
}

fn tree_fold<T, U, B>(data: &[T], transform_op: &U, combine_op: &B) -> T
where
    T: Element,
    U: UnaryOp<T> + ?Sized,
    B: BinaryOp<T> + ?Sized,
{
    if data.len() <= LEAF_LEN {
        return linear_fold(data, transform_op, combine_op);
    }
    let (lo, hi) = data.split_at(data.len() / 2);
    combine_op.combine(
        tree_fold(lo, transform_op, combine_op),
        tree_fold(hi, transform_op, combine_op),
    )
}

/// Left fold from the identity: `combine(...combine(e, f(x0))..., f(xn))`
#[inline]
pub(crate) fn linear_fold<T, U, B>(data: &[T], transform_op: &U, combine_op: &B) -> T
where
    T: Element,
    U: UnaryOp<T> + ?Sized,
    B: BinaryOp<T> + ?Sized,
{
    data.iter().fold(combine_op.identity(), |acc, &x| {
        combine_op.combine(acc, transform_op.apply(x))
    })
}
