//! Runtime-selectable standard operators
//!
//! [`ReduceOp`] and [`MapOp`] name the standard combiners and transforms as
//! plain enums, for dtype-erased entry points such as
//! [`reduce_1d_dyn`](crate::reduction::reduce_1d_dyn). Both implement the
//! operator traits directly, so they can also be passed to the generic engine.

use super::{BinaryOp, UnaryOp};
use crate::dtype::Element;

/// Reduction operation kind
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ReduceOp {
    /// Sum of elements
    Sum,
    /// Product of elements
    Prod,
    /// Maximum element
    Max,
    /// Minimum element
    Min,
}

/// Per-element transform kind
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum MapOp {
    /// Leave elements unchanged
    #[default]
    Identity,
    /// Square each element
    Square,
    /// Absolute value of each element
    Abs,
    /// Negate each element
    Negate,
}

impl<T: Element> BinaryOp<T> for ReduceOp {
    #[inline]
    fn identity(&self) -> T {
        match self {
            Self::Sum => BinaryOp::<T>::identity(&super::Sum),
            Self::Prod => BinaryOp::<T>::identity(&super::Prod),
            Self::Max => BinaryOp::<T>::identity(&super::Max),
            Self::Min => BinaryOp::<T>::identity(&super::Min),
        }
    }

    #[inline]
    fn combine(&self, a: T, b: T) -> T {
        match self {
            Self::Sum => super::Sum.combine(a, b),
            Self::Prod => super::Prod.combine(a, b),
            Self::Max => super::Max.combine(a, b),
            Self::Min => super::Min.combine(a, b),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Sum => "sum",
            Self::Prod => "prod",
            Self::Max => "max",
            Self::Min => "min",
        }
    }
}

impl<T: Element> UnaryOp<T> for MapOp {
    #[inline]
    fn apply(&self, x: T) -> T {
        match self {
            Self::Identity => super::Identity.apply(x),
            Self::Square => super::Square.apply(x),
            Self::Abs => super::Abs.apply(x),
            Self::Negate => super::Negate.apply(x),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::Square => "square",
            Self::Abs => "abs",
            Self::Negate => "negate",
        }
    }
}
