//! Per-lane selection primitives
//!
//! Conditional selection written once against [`SimdVector`] and compiled for every
//! backend. Three kinds of selector are supported:
//!
//! - a backend mask from a comparison ([`if_then_else`], [`if_then_else_zero`],
//!   [`if_then_zero_else`]);
//! - a lane vector of all-ones / all-zeros bit patterns ([`if_vec_then_else`]);
//! - the sign bit of a vector ([`zero_if_negative`], [`if_negative_then_else`],
//!   [`if_negative_then_neg_or_undef_if_zero`]).
//!
//! Sign-driven selection tests the sign bit, never `< 0`. `-0.0` and NaNs with the
//! sign bit set count as negative.
//!
//! A mask must come from a comparison over the same lane width as the vectors it
//! selects between. Feeding masks of another width, or selector vectors with lanes
//! other than all-ones/all-zeros, yields unspecified lane values.

use crate::lane::{FloatLane, SignedLane};
use crate::traits::SimdVector;

/// `mask[i] ? yes[i] : no[i]`
///
/// # Example
///
/// ```rust
/// use rigel_simd::{ScalarVector, SimdVector};
/// use rigel_simd::ops::if_then_else;
///
/// let a = ScalarVector(1i32);
/// let b = ScalarVector(2i32);
/// assert_eq!(if_then_else(a.gt(b), a, b).0, 2);
/// ```
#[inline(always)]
pub fn if_then_else<V: SimdVector>(mask: V::Mask, yes: V, no: V) -> V {
    V::select(mask, yes, no)
}

/// `mask[i] ? yes[i] : 0`
#[inline(always)]
pub fn if_then_else_zero<V: SimdVector>(mask: V::Mask, yes: V) -> V {
    V::select(mask, yes, V::zero())
}

/// `mask[i] ? 0 : no[i]`
#[inline(always)]
pub fn if_then_zero_else<V: SimdVector>(mask: V::Mask, no: V) -> V {
    V::select(mask, V::zero(), no)
}

/// Select by a lane vector instead of a mask
///
/// Each lane of `bits` must be all-ones (take `yes`) or all-zeros (take `no`).
#[inline(always)]
pub fn if_vec_then_else<V: SimdVector>(bits: V, yes: V, no: V) -> V {
    V::bitwise_select(bits, yes, no)
}

/// Replace lanes whose sign bit is set with `+0.0`
///
/// # Example
///
/// ```rust
/// use rigel_simd::ScalarVector;
/// use rigel_simd::ops::zero_if_negative;
///
/// assert_eq!(zero_if_negative(ScalarVector(-0.0f32)).0.to_bits(), 0);
/// assert_eq!(zero_if_negative(ScalarVector(1.0f32)).0, 1.0);
/// ```
#[inline(always)]
pub fn zero_if_negative<V>(v: V) -> V
where
    V: SimdVector,
    V::Scalar: FloatLane,
{
    v.broadcast_sign_bit().and_not(v)
}

/// `sign_bit(v[i]) ? yes[i] : no[i]`
///
/// Equal, bit for bit, to `bitwise_if_then_else(broadcast_sign_bit(v), yes, no)`.
#[inline(always)]
pub fn if_negative_then_else<V>(v: V, yes: V, no: V) -> V
where
    V: SimdVector,
    V::Scalar: SignedLane,
{
    V::select(v.is_negative(), yes, no)
}

/// `-w[i]` where `v[i] < 0`, `w[i]` where `v[i] > 0`
///
/// Lanes where `v` is zero are backend-dependent (zero, `w` or `-w`). Callers must
/// not rely on them.
#[inline(always)]
pub fn if_negative_then_neg_or_undef_if_zero<V>(v: V, w: V) -> V
where
    V: SimdVector,
    V::Scalar: SignedLane,
{
    v.neg_if_negative(w)
}
