//! Non-owning 1-D array views
//!
//! An [`ArrayView`] borrows a contiguous buffer of `N >= 0` elements for the
//! duration of a reduction. The engine only ever reads through it.

use crate::dtype::{DType, Element};
use crate::error::{Error, Result};

/// Read-only view over `len` contiguous elements of `T`
#[derive(Copy, Clone, Debug)]
pub struct ArrayView<'a, T: Element> {
    data: &'a [T],
}

impl<'a, T: Element> ArrayView<'a, T> {
    /// View the whole slice
    #[inline]
    pub fn new(data: &'a [T]) -> Self {
        Self { data }
    }

    /// View the first `count` elements of `data`.
    ///
    /// Returns `InvalidArgument` if `count` is negative or exceeds the
    /// backing buffer.
    pub fn wrap(data: &'a [T], count: isize) -> Result<Self> {
        let len = usize::try_from(count).map_err(|_| {
            Error::invalid_argument("input_view", format!("negative element count {count}"))
        })?;
        if len > data.len() {
            return Err(Error::invalid_argument(
                "input_view",
                format!(
                    "element count {len} exceeds backing buffer of {} elements",
                    data.len()
                ),
            ));
        }
        Ok(Self {
            data: &data[..len],
        })
    }

    /// Number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true for a zero-length view
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Element type of the view
    #[inline]
    pub fn dtype(&self) -> DType {
        T::DTYPE
    }

    /// Borrow the viewed elements
    #[inline]
    pub fn as_slice(&self) -> &'a [T] {
        self.data
    }

    /// Raw bytes of the viewed elements, for byte-oriented backends
    #[inline]
    pub fn as_bytes(&self) -> &'a [u8] {
        bytemuck::cast_slice(self.data)
    }
}

impl<'a, T: Element> From<&'a [T]> for ArrayView<'a, T> {
    fn from(data: &'a [T]) -> Self {
        Self::new(data)
    }
}

impl<'a, T: Element> From<&'a Vec<T>> for ArrayView<'a, T> {
    fn from(data: &'a Vec<T>) -> Self {
        Self::new(data.as_slice())
    }
}

/// Dtype-erased array view over the supported element types
#[derive(Copy, Clone, Debug)]
pub enum AnyArrayView<'a> {
    /// View over `f32` elements
    F32(ArrayView<'a, f32>),
    /// View over `f64` elements
    F64(ArrayView<'a, f64>),
}

impl AnyArrayView<'_> {
    /// Element type of the view
    pub fn dtype(&self) -> DType {
        match self {
            Self::F32(_) => DType::F32,
            Self::F64(_) => DType::F64,
        }
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        match self {
            Self::F32(v) => v.len(),
            Self::F64(v) => v.len(),
        }
    }

    /// Returns true for a zero-length view
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<'a> From<ArrayView<'a, f32>> for AnyArrayView<'a> {
    fn from(view: ArrayView<'a, f32>) -> Self {
        Self::F32(view)
    }
}

impl<'a> From<ArrayView<'a, f64>> for AnyArrayView<'a> {
    fn from(view: ArrayView<'a, f64>) -> Self {
        Self::F64(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_prefix() {
        let data = [1.0f32, 2.0, 3.0, 4.0];
        let view = ArrayView::wrap(&data, 3).unwrap();
        assert_eq!(view.len(), 3);
        assert_eq!(view.as_slice(), &[1.0, 2.0, 3.0]);
        assert_eq!(view.as_bytes().len(), 12);
    }

    #[test]
    fn test_wrap_empty() {
        let data: [f64; 0] = [];
        let view = ArrayView::wrap(&data, 0).unwrap();
        assert!(view.is_empty());
        assert_eq!(view.dtype(), DType::F64);
    }

    #[test]
    fn test_wrap_negative_count() {
        let data = [1.0f64];
        let err = ArrayView::wrap(&data, -1).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { arg: "input_view", .. }));
    }

    #[test]
    fn test_wrap_count_exceeds_buffer() {
        let data = [1.0f64, 2.0];
        let err = ArrayView::wrap(&data, 3).unwrap_err();
        assert!(err.is_caller_error());
    }

    #[test]
    fn test_any_view_dtype() {
        let data = vec![0.5f32; 8];
        let any: AnyArrayView<'_> = ArrayView::from(&data).into();
        assert_eq!(any.dtype(), DType::F32);
        assert_eq!(any.len(), 8);
    }
}
