//! Per-element transforms

use crate::dtype::Element;

/// Transform applied to each element before it is folded.
///
/// Implementations must be pure: the engine may call `apply` on any element
/// from any worker, in any order, and possibly more than once.
pub trait UnaryOp<T: Element>: Send + Sync {
    /// Map one element to one value of the same domain
    fn apply(&self, x: T) -> T;

    /// Human-readable name, used in logs
    fn name(&self) -> &'static str {
        "custom"
    }
}

/// `x -> x`
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Identity;

/// `x -> x * x`
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Square;

/// `x -> |x|`
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Abs;

/// `x -> -x`
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Negate;

impl<T: Element> UnaryOp<T> for Identity {
    #[inline]
    fn apply(&self, x: T) -> T {
        x
    }

    fn name(&self) -> &'static str {
        "identity"
    }
}

impl<T: Element> UnaryOp<T> for Square {
    #[inline]
    fn apply(&self, x: T) -> T {
        x * x
    }

    fn name(&self) -> &'static str {
        "square"
    }
}

impl<T: Element> UnaryOp<T> for Abs {
    #[inline]
    fn apply(&self, x: T) -> T {
        x.abs()
    }

    fn name(&self) -> &'static str {
        "abs"
    }
}

impl<T: Element> UnaryOp<T> for Negate {
    #[inline]
    fn apply(&self, x: T) -> T {
        -x
    }

    fn name(&self) -> &'static str {
        "negate"
    }
}

/// Closure-backed transform, see [`unary_fn`]
#[derive(Copy, Clone, Debug)]
pub struct FnUnary<F> {
    f: F,
}

/// Wrap a closure as a [`UnaryOp`].
///
/// ```ignore
/// let cube = unary_fn(|x: f64| x * x * x);
/// ```
pub fn unary_fn<T, F>(f: F) -> FnUnary<F>
where
    T: Element,
    F: Fn(T) -> T + Send + Sync,
{
    FnUnary { f }
}

impl<T, F> UnaryOp<T> for FnUnary<F>
where
    T: Element,
    F: Fn(T) -> T + Send + Sync,
{
    #[inline]
    fn apply(&self, x: T) -> T {
        (self.f)(x)
    }
}
