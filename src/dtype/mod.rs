//! Data type system for reducr
//!
//! This module provides the `DType` enum naming the element types the engine
//! accepts, and the `Element` trait that ties them to Rust types.

mod element;

pub use element::Element;

use std::fmt;

/// Data types supported by reducr arrays
///
/// Reductions are monomorphized per [`Element`] type; `DType` is the runtime
/// tag used when the element type is only known at run time
/// (see [`AnyArrayView`](crate::view::AnyArrayView)).
///
/// # Discriminant Values (Serialization Stability)
///
/// Discriminants are part of the public contract (F64=0, F32=1) and are
/// never renumbered.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
#[repr(u8)]
pub enum DType {
    /// 64-bit floating point
    F64 = 0,
    /// 32-bit floating point (most common)
    F32 = 1,
}

impl DType {
    /// Size of one element in bytes
    #[inline]
    pub const fn size_in_bytes(self) -> usize {
        match self {
            Self::F64 => 8,
            Self::F32 => 4,
        }
    }

    /// Short name for display (e.g., "f32")
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::F64 => "f64",
            Self::F32 => "f32",
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}
