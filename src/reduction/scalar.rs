//! Dtype-tagged result scalar

use crate::dtype::{DType, Element};
use crate::error::{Error, Result};
use num_traits::NumCast;
use std::fmt;

/// Result of a dtype-erased reduction
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Scalar {
    /// Single precision result
    F32(f32),
    /// Double precision result
    F64(f64),
}

impl Scalar {
    /// Element type of the value
    pub fn dtype(&self) -> DType {
        match self {
            Self::F32(_) => DType::F32,
            Self::F64(_) => DType::F64,
        }
    }

    /// Widen to `f64`
    pub fn to_f64(&self) -> f64 {
        match *self {
            Self::F32(v) => v as f64,
            Self::F64(v) => v,
        }
    }

    /// Extract the value as `T`.
    ///
    /// Returns `DTypeMismatch` unless `T` is the stored type.
    pub fn get<T: Element>(&self) -> Result<T> {
        if T::DTYPE != self.dtype() {
            return Err(Error::DTypeMismatch {
                lhs: self.dtype(),
                rhs: T::DTYPE,
            });
        }
        let value = match *self {
            Self::F32(v) => <T as NumCast>::from(v),
            Self::F64(v) => <T as NumCast>::from(v),
        };
        value.ok_or_else(|| Error::Internal(format!("{self} not representable as {}", T::DTYPE)))
    }
}

impl From<f32> for Scalar {
    fn from(v: f32) -> Self {
        Self::F32(v)
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Self::F64(v)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::F32(v) => write!(f, "{v}f32"),
            Self::F64(v) => write!(f, "{v}f64"),
        }
    }
}
