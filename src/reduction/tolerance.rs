//! Comparison tolerance for reduction results
//!
//! Parallel results differ from a sequential fold in low-order bits because
//! floating point addition is not associative. How large that difference
//! may grow depends on the operator, the magnitude of the accumulated values
//! and the element count, so the bound is configurable rather than fixed.

use crate::dtype::DType;

/// Absolute + relative tolerance, optionally widened with the element count.
///
/// `|actual - expected| <= (atol + rtol * |expected|) * s`, where `s` is
/// `sqrt(len)` when `scale_with_len` is set and `1` otherwise.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Tolerance {
    /// Absolute tolerance
    pub atol: f64,
    /// Relative tolerance, scaled by the magnitude of the expected value
    pub rtol: f64,
    /// Widen the bound by `sqrt(len)` (random-walk error growth)
    pub scale_with_len: bool,
}

impl Tolerance {
    /// Fixed absolute/relative tolerance
    pub const fn new(atol: f64, rtol: f64) -> Self {
        Self {
            atol,
            rtol,
            scale_with_len: false,
        }
    }

    /// Default tolerance for results of the given dtype
    pub const fn for_dtype(dtype: DType) -> Self {
        match dtype {
            DType::F32 => Self::new(1e-3, 1e-5),
            DType::F64 => Self::new(1e-3, 1e-10),
        }
    }

    /// Widen the bound with the number of reduced elements
    pub const fn scaled_with_len(mut self) -> Self {
        self.scale_with_len = true;
        self
    }

    /// Allowed deviation from `expected` after reducing `len` elements
    pub fn bound(&self, expected: f64, len: usize) -> f64 {
        let base = self.atol + self.rtol * expected.abs();
        if self.scale_with_len {
            base * (len.max(1) as f64).sqrt()
        } else {
            base
        }
    }

    /// Returns true if `actual` is within tolerance of `expected`.
    ///
    /// Equal values (including equal infinities) always match; NaN never
    /// does.
    pub fn is_close(&self, actual: f64, expected: f64, len: usize) -> bool {
        actual == expected || (actual - expected).abs() <= self.bound(expected, len)
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::new(1e-3, 0.0)
    }
}
