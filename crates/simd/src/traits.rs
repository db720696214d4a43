//! Core SIMD abstraction traits
//!
//! This module defines the contract every backend implements: a vector of `LANES`
//! lane values plus a backend-defined mask type. Selection code is written once
//! against these traits and compiled separately for each backend.
//!
//! Vectors are bags of raw bit patterns. Nothing here performs arithmetic on lane
//! values except `neg`, `eq` and `gt`, which the selection layer needs for sign
//! handling and mask construction.

use crate::lane::Lane;

/// Largest lane count of any backend (AVX-512 with 8-bit lanes)
pub const MAX_LANES: usize = 64;

/// Core SIMD vector abstraction trait
///
/// All backends (scalar, AVX2, AVX-512, NEON) implement this trait for every
/// [`Lane`] type.
///
/// # Example
///
/// ```rust
/// use rigel_simd::{ScalarVector, SimdMask, SimdVector};
///
/// let a = ScalarVector::splat(1.0f32);
/// let b = ScalarVector::splat(2.0f32);
/// let mask = a.gt(b);
/// assert!(mask.none());
/// assert_eq!(ScalarVector::select(mask, a, b).0, 2.0);
/// ```
pub trait SimdVector: Copy {
    /// Element type of each lane
    type Scalar: Lane;

    /// Mask type produced by comparisons over this vector's lane width
    type Mask: SimdMask;

    /// Number of lanes (fixed per element type and backend)
    const LANES: usize;

    // Constants

    /// All lanes zero (all bits clear)
    fn zero() -> Self;

    /// Broadcast a scalar to every lane
    fn splat(value: Self::Scalar) -> Self;

    /// Lane `i` holds `first + i` (wrapping for integers)
    #[inline(always)]
    fn iota(first: Self::Scalar) -> Self {
        let mut lanes = [Self::Scalar::default(); MAX_LANES];
        for (i, lane) in lanes.iter_mut().take(Self::LANES).enumerate() {
            *lane = first.offset(i);
        }
        Self::from_slice(&lanes[..Self::LANES])
    }

    /// Only the most significant bit of every lane set
    #[inline(always)]
    fn sign_bit() -> Self {
        Self::splat(Self::Scalar::from_bits(Self::Scalar::SIGN_MASK))
    }

    // Memory

    /// Load from a slice (must have at least LANES elements)
    ///
    /// # Panics
    ///
    /// Panics if slice has fewer than LANES elements
    fn from_slice(slice: &[Self::Scalar]) -> Self;

    /// Store to a slice (must have at least LANES elements)
    ///
    /// # Panics
    ///
    /// Panics if slice has fewer than LANES elements
    fn to_slice(self, slice: &mut [Self::Scalar]);

    // Bitwise logic (operates on raw bits regardless of lane type)

    /// Bitwise AND
    fn and(self, rhs: Self) -> Self;

    /// Bitwise OR
    fn or(self, rhs: Self) -> Self;

    /// Bitwise XOR
    fn xor(self, rhs: Self) -> Self;

    /// `!self & rhs`
    fn and_not(self, rhs: Self) -> Self;

    /// Each lane becomes all-ones if its sign bit is set, otherwise all-zeros
    fn broadcast_sign_bit(self) -> Self;

    // Arithmetic

    /// Lane negation: wrapping for integers, sign-bit flip for floats
    fn neg(self) -> Self;

    // Comparison (return masks)

    /// Element-wise equality (IEEE semantics for floats: NaN != NaN, -0.0 == 0.0)
    fn eq(self, rhs: Self) -> Self::Mask;

    /// Element-wise greater-than (unsigned compare for unsigned lanes)
    fn gt(self, rhs: Self) -> Self::Mask;

    // Mask <-> vector

    /// Convert a vector whose lanes are all-ones or all-zeros into a mask
    ///
    /// Lanes with any other bit pattern produce an unspecified mask lane.
    fn mask_from_vec(self) -> Self::Mask;

    /// True lanes become all-ones, false lanes all-zeros
    fn vec_from_mask(mask: Self::Mask) -> Self;

    // Blending

    /// For each lane: mask[i] ? true_val[i] : false_val[i]
    fn select(mask: Self::Mask, true_val: Self, false_val: Self) -> Self;

    /// Bitwise blend: each result bit comes from `true_val` where `bits` is set,
    /// otherwise from `false_val`
    #[inline(always)]
    fn bitwise_select(bits: Self, true_val: Self, false_val: Self) -> Self {
        bits.and(true_val).or(bits.and_not(false_val))
    }

    /// Mask of lanes whose sign bit is set
    ///
    /// This is a bit test, not a `< 0` comparison: `-0.0` and negative NaN count
    /// as negative.
    #[inline(always)]
    fn is_negative(self) -> Self::Mask {
        self.broadcast_sign_bit().mask_from_vec()
    }

    /// `-w` where `self` is negative, `w` where `self` is positive
    ///
    /// Lanes where `self` is zero are backend-defined: backends with a native
    /// sign-copy instruction return zero there, others return `w` or `-w`.
    #[inline(always)]
    fn neg_if_negative(self, w: Self) -> Self {
        Self::select(self.is_negative(), w.neg(), w)
    }
}

/// Mask type for conditional SIMD operations
///
/// Masks represent per-lane boolean values. The representation is backend-defined
/// (a `bool`, a full-width lane vector, or a packed bit mask) and is only
/// meaningful together with the vector type that produced it.
pub trait SimdMask: Copy {
    /// Returns true if all lanes are set
    fn all(self) -> bool;

    /// Returns true if any lane is set
    fn any(self) -> bool;

    /// Returns true if no lanes are set
    #[inline(always)]
    fn none(self) -> bool {
        !self.any()
    }

    /// Lane-wise AND of two masks
    fn and(self, rhs: Self) -> Self;

    /// Lane-wise OR of two masks
    fn or(self, rhs: Self) -> Self;

    /// Lane-wise NOT of mask
    fn not(self) -> Self;

    /// Lane-wise XOR of two masks
    fn xor(self, rhs: Self) -> Self;
}
