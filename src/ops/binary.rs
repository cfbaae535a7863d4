//! Combiners with identity elements

use crate::dtype::Element;

/// Associative, commutative combiner with a declared identity.
///
/// The engine relies on `combine(identity(), x) == x` for every `x`, and on
/// associativity/commutativity so partial results may be folded in any
/// grouping. Neither property is checked.
pub trait BinaryOp<T: Element>: Send + Sync {
    /// Neutral element of `combine`
    fn identity(&self) -> T;

    /// Combine two values of the result domain
    fn combine(&self, a: T, b: T) -> T;

    /// Human-readable name, used in logs
    fn name(&self) -> &'static str {
        "custom"
    }
}

/// Addition, identity `0`
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Sum;

/// Multiplication, identity `1`
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Prod;

/// Maximum, identity `-inf`
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Max;

/// Minimum, identity `+inf`
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Min;

impl<T: Element> BinaryOp<T> for Sum {
    #[inline]
    fn identity(&self) -> T {
        T::zero()
    }

    #[inline]
    fn combine(&self, a: T, b: T) -> T {
        a + b
    }

    fn name(&self) -> &'static str {
        "sum"
    }
}

impl<T: Element> BinaryOp<T> for Prod {
    #[inline]
    fn identity(&self) -> T {
        T::one()
    }

    #[inline]
    fn combine(&self, a: T, b: T) -> T {
        a * b
    }

    fn name(&self) -> &'static str {
        "prod"
    }
}

// NaN handling: `Float::max`/`min` return the non-NaN operand, so a NaN
// input never replaces the running extreme.
impl<T: Element> BinaryOp<T> for Max {
    #[inline]
    fn identity(&self) -> T {
        T::neg_infinity()
    }

    #[inline]
    fn combine(&self, a: T, b: T) -> T {
        a.max(b)
    }

    fn name(&self) -> &'static str {
        "max"
    }
}

impl<T: Element> BinaryOp<T> for Min {
    #[inline]
    fn identity(&self) -> T {
        T::infinity()
    }

    #[inline]
    fn combine(&self, a: T, b: T) -> T {
        a.min(b)
    }

    fn name(&self) -> &'static str {
        "min"
    }
}

/// Closure-backed combiner, see [`binary_fn`]
#[derive(Copy, Clone, Debug)]
pub struct FnBinary<T, F> {
    identity: T,
    f: F,
}

/// Wrap a closure and its identity element as a [`BinaryOp`].
///
/// ```ignore
/// // sum of absolute values, folded as a combiner
/// let l1 = binary_fn(0.0f32, |a: f32, b: f32| a + b);
/// ```
pub fn binary_fn<T, F>(identity: T, f: F) -> FnBinary<T, F>
where
    T: Element,
    F: Fn(T, T) -> T + Send + Sync,
{
    FnBinary { identity, f }
}

impl<T, F> BinaryOp<T> for FnBinary<T, F>
where
    T: Element,
    F: Fn(T, T) -> T + Send + Sync,
{
    #[inline]
    fn identity(&self) -> T {
        self.identity
    }

    #[inline]
    fn combine(&self, a: T, b: T) -> T {
        (self.f)(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_identity<T: Element, B: BinaryOp<T>>(op: &B, samples: &[T]) {
        for &x in samples {
            assert_eq!(op.combine(op.identity(), x), x, "{} identity", op.name());
            assert_eq!(op.combine(x, op.identity()), x, "{} identity", op.name());
        }
    }

    #[test]
    fn test_identity_law() {
        let samples = [-3.5f64, -0.2, 0.0, 0.5, 7.25, 1e300];
        check_identity(&Sum, &samples);
        check_identity(&Prod, &samples);
        check_identity(&Max, &samples);
        check_identity(&Min, &samples);

        let samples32 = [-1.0f32, 0.125, 42.0];
        check_identity(&Sum, &samples32);
        check_identity(&Max, &samples32);
    }

    #[test]
    fn test_max_min_combine() {
        assert_eq!(BinaryOp::<f32>::combine(&Max, 2.0, 5.0), 5.0);
        assert_eq!(BinaryOp::<f32>::combine(&Min, 2.0, 5.0), 2.0);
    }

    #[test]
    fn test_closure_combiner() {
        let op = binary_fn(0.0f64, |a: f64, b: f64| a.abs() + b.abs());
        assert_eq!(op.identity(), 0.0);
        assert_eq!(op.combine(-1.0, 2.0), 3.0);
    }
}
