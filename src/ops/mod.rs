//! Operator contract for reductions
//!
//! A reduction is described by two operators:
//!
//! ```text
//! UnaryOp<T>   transform applied to every element      x -> y
//! BinaryOp<T>  associative, commutative combiner       (a, b) -> c
//!              with identity e: combine(e, x) == x
//! ```
//!
//! The engine is generic over both traits, so any pair satisfying the
//! algebraic contract is accepted. Associativity and commutativity are
//! preconditions: the engine folds partial results in whatever grouping the
//! partition produces and cannot detect a violating combiner, which simply
//! yields an order-dependent result.
//!
//! # Standard operators
//!
//! | Kind      | Operators |
//! |-----------|-----------|
//! | Transform | [`Identity`], [`Square`], [`Abs`], [`Negate`], [`unary_fn`] |
//! | Combiner  | [`Sum`], [`Prod`], [`Max`], [`Min`], [`binary_fn`] |
//!
//! [`MapOp`] and [`ReduceOp`] name the standard operators at run time, for
//! callers that only know the operation (and dtype) dynamically.

mod binary;
mod reduce;
mod unary;

pub use binary::{BinaryOp, FnBinary, Max, Min, Prod, Sum, binary_fn};
pub use reduce::{MapOp, ReduceOp};
pub use unary::{Abs, FnUnary, Identity, Negate, Square, UnaryOp, unary_fn};

use crate::dtype::Element;
use crate::error::{Error, Result};

/// Check that a combiner declares a usable identity element.
///
/// A NaN identity can never satisfy `combine(e, x) == x`, so it is rejected
/// before any work is launched.
pub fn validate_combiner<T: Element, B: BinaryOp<T> + ?Sized>(op: &B) -> Result<T> {
    let identity = op.identity();
    if identity.is_nan() {
        return Err(Error::invalid_argument(
            "combine_op",
            format!("combiner '{}' declares a NaN identity", op.name()),
        ));
    }
    Ok(identity)
}
