//! Bitwise helpers
//!
//! Raw bit-pattern operations the selection primitives are built from. None of these
//! look at lane values numerically: a float lane is just its IEEE bit pattern.

use crate::traits::SimdVector;

/// Bitwise AND
#[inline(always)]
pub fn and<V: SimdVector>(a: V, b: V) -> V {
    a.and(b)
}

/// Bitwise OR
#[inline(always)]
pub fn or<V: SimdVector>(a: V, b: V) -> V {
    a.or(b)
}

/// Bitwise XOR
///
/// XOR with [`sign_bit`] flips the sign of every lane without touching any other bit.
#[inline(always)]
pub fn xor<V: SimdVector>(a: V, b: V) -> V {
    a.xor(b)
}

/// `!a & b`
#[inline(always)]
pub fn and_not<V: SimdVector>(a: V, b: V) -> V {
    a.and_not(b)
}

/// Each lane becomes all-ones if its sign bit is set, otherwise all-zeros
///
/// # Example
///
/// ```rust
/// use rigel_simd::ScalarVector;
/// use rigel_simd::ops::broadcast_sign_bit;
///
/// assert_eq!(broadcast_sign_bit(ScalarVector(-0.0f32)).0.to_bits(), u32::MAX);
/// assert_eq!(broadcast_sign_bit(ScalarVector(7i8)).0, 0);
/// ```
#[inline(always)]
pub fn broadcast_sign_bit<V: SimdVector>(v: V) -> V {
    v.broadcast_sign_bit()
}

/// Vector with only the sign bit of each lane set
#[inline(always)]
pub fn sign_bit<V: SimdVector>() -> V {
    V::sign_bit()
}

/// Bitwise blend: result bits come from `yes` where `bits` is set, else from `no`
#[inline(always)]
pub fn bitwise_if_then_else<V: SimdVector>(bits: V, yes: V, no: V) -> V {
    V::bitwise_select(bits, yes, no)
}

/// Interpret an all-ones/all-zeros lane vector as a mask
#[inline(always)]
pub fn mask_from_vec<V: SimdVector>(v: V) -> V::Mask {
    v.mask_from_vec()
}

/// Expand a mask to all-ones (true) / all-zeros (false) lanes
#[inline(always)]
pub fn vec_from_mask<V: SimdVector>(mask: V::Mask) -> V {
    V::vec_from_mask(mask)
}
