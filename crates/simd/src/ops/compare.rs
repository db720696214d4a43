//! Comparison operations
//!
//! Element-wise comparisons that return backend masks. Floats compare with ordered
//! IEEE semantics (any NaN operand yields false, `-0.0 == 0.0`); unsigned lanes
//! compare as unsigned.

use crate::traits::{SimdMask, SimdVector};

/// Element-wise equality comparison
///
/// Returns a mask where each lane is true if the corresponding elements are equal.
///
/// # Example
///
/// ```rust
/// use rigel_simd::{ScalarVector, SimdVector, SimdMask};
/// use rigel_simd::ops::eq;
///
/// let a = ScalarVector::splat(2.0f32);
/// let b = ScalarVector::splat(2.0f32);
/// assert!(eq(a, b).all());
/// ```
#[inline(always)]
pub fn eq<V: SimdVector>(a: V, b: V) -> V::Mask {
    a.eq(b)
}

/// Element-wise inequality comparison
///
/// The negation of [`eq`], so NaN lanes compare unequal to everything.
///
/// # Example
///
/// ```rust
/// use rigel_simd::{ScalarVector, SimdVector, SimdMask};
/// use rigel_simd::ops::ne;
///
/// let nan = ScalarVector::splat(f64::NAN);
/// assert!(ne(nan, nan).all());
/// ```
#[inline(always)]
pub fn ne<V: SimdVector>(a: V, b: V) -> V::Mask {
    a.eq(b).not()
}

/// Element-wise greater-than comparison
#[inline(always)]
pub fn gt<V: SimdVector>(a: V, b: V) -> V::Mask {
    a.gt(b)
}

/// Element-wise less-than comparison
///
/// # Example
///
/// ```rust
/// use rigel_simd::{ScalarVector, SimdVector, SimdMask};
/// use rigel_simd::ops::lt;
///
/// let a = ScalarVector::splat(200u8);
/// let b = ScalarVector::splat(100u8);
/// assert!(lt(b, a).all());
/// ```
#[inline(always)]
pub fn lt<V: SimdVector>(a: V, b: V) -> V::Mask {
    b.gt(a)
}
