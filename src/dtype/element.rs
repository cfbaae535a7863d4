//! Element trait for mapping Rust types to DType

use super::DType;
use bytemuck::Pod;
use num_traits::Float;
use std::fmt::Debug;

/// Trait for types that can be elements of a reducible array
///
/// This trait connects Rust's type system to reducr's runtime dtype system.
/// It's implemented for the floating point types the engine supports.
///
/// # Bounds
/// - `Copy + Send + Sync + 'static` - Values cross worker threads freely
/// - `Pod` - Safe byte views for backends that upload raw buffers (bytemuck)
/// - `Float` - Arithmetic, infinities and NaN checks (num-traits)
pub trait Element: Float + Pod + Debug + Send + Sync + 'static {
    /// The corresponding DType for this Rust type
    const DTYPE: DType;
}

impl Element for f64 {
    const DTYPE: DType = DType::F64;
}

impl Element for f32 {
    const DTYPE: DType = DType::F32;
}
