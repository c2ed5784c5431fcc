//! Strided nullary operations
//!
//! A nullary operation invokes a callback taking no arguments once per indexed
//! element and stores the returned value into a strided output buffer. This is
//! the behaviour every generated C kernel implements for its own element type;
//! the Rust form here is generic over the element type instead.
//!
//! Element `i` (for `i` in `0..n`) lives at `offset + i * stride`. Negative
//! strides walk the buffer backwards, starting from the offset computed by
//! [`stride_to_offset`].
//!
//! ```
//! use nullary_runtime::nullary;
//!
//! let mut x = [1.0f64, 2.0, 3.0, 4.0, 5.0];
//! nullary(&mut x, 3, 2, || 3.0).unwrap();
//! assert_eq!(x, [3.0, 2.0, 3.0, 4.0, 3.0]);
//! ```

use thiserror::Error;

/// Errors raised before any element is written
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StridedError {
    /// An indexed element falls outside the output buffer
    #[error("Out of bounds access: index {index}, buffer length {len}")]
    OutOfBounds { index: isize, len: usize },

    /// A zero stride with more than one element would overwrite one slot repeatedly
    #[error("Invalid stride: 0 for {n} elements")]
    ZeroStride { n: usize },
}

/// Result type for strided operations
pub type Result<T> = std::result::Result<T, StridedError>;

/// Index of the first indexed element for a given stride.
///
/// For a non-negative stride iteration starts at zero; for a negative stride
/// it starts at the element that is visited first when walking backwards.
/// Offsets too large to represent saturate and are rejected by the bounds check.
pub fn stride_to_offset(n: usize, stride: isize) -> usize {
    if stride > 0 || n == 0 {
        0
    } else {
        (n - 1).saturating_mul(stride.unsigned_abs())
    }
}

fn check_bounds(len: usize, n: usize, stride: isize, offset: usize) -> Result<()> {
    if n == 0 {
        return Ok(());
    }
    if stride == 0 && n > 1 {
        return Err(StridedError::ZeroStride { n });
    }
    let first = isize::try_from(offset).map_err(|_| StridedError::OutOfBounds { index: isize::MAX, len })?;
    let last = isize::try_from(n - 1)
        .ok()
        .and_then(|steps| steps.checked_mul(stride))
        .and_then(|span| span.checked_add(first))
        .ok_or(StridedError::OutOfBounds {
            index: if stride < 0 { isize::MIN } else { isize::MAX },
            len,
        })?;
    for index in [first, last] {
        if index < 0 || index as usize >= len {
            return Err(StridedError::OutOfBounds { index, len });
        }
    }
    Ok(())
}

/// Apply a nullary callback to `n` elements of `out` visited with `stride`.
pub fn nullary<T, F>(out: &mut [T], n: usize, stride: isize, fcn: F) -> Result<()>
where
    F: FnMut() -> T,
{
    let offset = stride_to_offset(n, stride);
    nullary_ndarray(out, n, stride, offset, fcn)
}

/// Apply a nullary callback using an explicit starting offset.
pub fn nullary_ndarray<T, F>(out: &mut [T], n: usize, stride: isize, offset: usize, fcn: F) -> Result<()>
where
    F: FnMut() -> T,
{
    nullary_cast_with(out, n, stride, offset, fcn, |value| value)
}

/// Apply a callback returning `U` and store the values losslessly converted into `T`.
///
/// Mirrors the generated `<out>_as_<callback>` kernels whose callback type safely
/// casts into the output type.
pub fn nullary_cast<T, U, F>(out: &mut [T], n: usize, stride: isize, fcn: F) -> Result<()>
where
    U: Into<T>,
    F: FnMut() -> U,
{
    let offset = stride_to_offset(n, stride);
    nullary_cast_with(out, n, stride, offset, fcn, Into::into)
}

/// Apply a callback and convert each returned value with an explicit function.
///
/// This is the form used when the conversion is not a plain numeric cast, such
/// as narrowing a double-precision complex value into single precision.
pub fn nullary_cast_with<T, U, F, C>(
    out: &mut [T],
    n: usize,
    stride: isize,
    offset: usize,
    mut fcn: F,
    mut cast: C,
) -> Result<()>
where
    F: FnMut() -> U,
    C: FnMut(U) -> T,
{
    check_bounds(out.len(), n, stride, offset)?;

    let mut index = offset as isize;
    for i in 0..n {
        if i > 0 {
            index += stride;
        }
        out[index as usize] = cast(fcn());
    }
    Ok(())
}
