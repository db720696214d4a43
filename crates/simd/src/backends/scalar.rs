//! Scalar backend implementation
//!
//! This backend provides a scalar (non-SIMD) fallback that always works on any platform.
//! It serves as the reference implementation and is the mandatory baseline of the
//! dispatch table.

use crate::lane::Lane;
use crate::traits::{SimdMask, SimdVector};

/// Scalar vector wrapper (single-lane SIMD)
///
/// This wraps a single lane value to implement the SimdVector trait,
/// providing a fallback when SIMD is not available or desired.
#[derive(Debug, Copy, Clone)]
#[repr(transparent)]
pub struct ScalarVector<T>(pub T);

/// Scalar mask wrapper (single boolean)
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(transparent)]
pub struct ScalarMask(pub bool);

impl<T: Lane> ScalarVector<T> {
    #[inline(always)]
    fn map_bits(self, rhs: Self, op: impl FnOnce(u64, u64) -> u64) -> Self {
        ScalarVector(T::from_bits(op(self.0.to_bits(), rhs.0.to_bits())))
    }
}

impl<T: Lane> SimdVector for ScalarVector<T> {
    type Scalar = T;
    type Mask = ScalarMask;

    const LANES: usize = 1;

    #[inline(always)]
    fn zero() -> Self {
        ScalarVector(T::from_bits(0))
    }

    #[inline(always)]
    fn splat(value: T) -> Self {
        ScalarVector(value)
    }

    #[inline(always)]
    fn from_slice(slice: &[T]) -> Self {
        assert!(slice.len() >= Self::LANES, "Slice too short for scalar load");
        ScalarVector(slice[0])
    }

    #[inline(always)]
    fn to_slice(self, slice: &mut [T]) {
        assert!(
            slice.len() >= Self::LANES,
            "Slice too short for scalar store"
        );
        slice[0] = self.0;
    }

    #[inline(always)]
    fn and(self, rhs: Self) -> Self {
        self.map_bits(rhs, |a, b| a & b)
    }

    #[inline(always)]
    fn or(self, rhs: Self) -> Self {
        self.map_bits(rhs, |a, b| a | b)
    }

    #[inline(always)]
    fn xor(self, rhs: Self) -> Self {
        self.map_bits(rhs, |a, b| a ^ b)
    }

    #[inline(always)]
    fn and_not(self, rhs: Self) -> Self {
        self.map_bits(rhs, |a, b| !a & b)
    }

    #[inline(always)]
    fn broadcast_sign_bit(self) -> Self {
        if self.0.sign_bit_set() {
            ScalarVector(T::from_bits(T::ALL_ONES))
        } else {
            Self::zero()
        }
    }

    #[inline(always)]
    fn neg(self) -> Self {
        ScalarVector(self.0.wrapping_neg())
    }

    #[inline(always)]
    fn eq(self, rhs: Self) -> Self::Mask {
        ScalarMask(self.0 == rhs.0)
    }

    #[inline(always)]
    fn gt(self, rhs: Self) -> Self::Mask {
        ScalarMask(self.0 > rhs.0)
    }

    #[inline(always)]
    fn mask_from_vec(self) -> Self::Mask {
        ScalarMask(self.0.to_bits() != 0)
    }

    #[inline(always)]
    fn vec_from_mask(mask: Self::Mask) -> Self {
        if mask.0 {
            ScalarVector(T::from_bits(T::ALL_ONES))
        } else {
            Self::zero()
        }
    }

    #[inline(always)]
    fn select(mask: Self::Mask, true_val: Self, false_val: Self) -> Self {
        if mask.0 {
            true_val
        } else {
            false_val
        }
    }

    #[inline(always)]
    fn is_negative(self) -> Self::Mask {
        ScalarMask(self.0.sign_bit_set())
    }
}

// Implement SimdMask for ScalarMask
impl SimdMask for ScalarMask {
    #[inline(always)]
    fn all(self) -> bool {
        self.0
    }

    #[inline(always)]
    fn any(self) -> bool {
        self.0
    }

    #[inline(always)]
    fn none(self) -> bool {
        !self.0
    }

    #[inline(always)]
    fn and(self, rhs: Self) -> Self {
        ScalarMask(self.0 && rhs.0)
    }

    #[inline(always)]
    fn or(self, rhs: Self) -> Self {
        ScalarMask(self.0 || rhs.0)
    }

    #[inline(always)]
    fn not(self) -> Self {
        ScalarMask(!self.0)
    }

    #[inline(always)]
    fn xor(self, rhs: Self) -> Self {
        ScalarMask(self.0 ^ rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_bitwise() {
        let a = ScalarVector(0b1100u8);
        let b = ScalarVector(0b1010u8);

        assert_eq!(a.and(b).0, 0b1000);
        assert_eq!(a.or(b).0, 0b1110);
        assert_eq!(a.xor(b).0, 0b0110);
        assert_eq!(a.and_not(b).0, 0b0010);
    }

    #[test]
    fn test_scalar_float_bitwise_preserves_bits() {
        let nan = ScalarVector(f32::from_bits(0x7fa0_0001));
        let ones = ScalarVector(f32::from_bits(u32::MAX));
        assert_eq!(nan.and(ones).0.to_bits(), 0x7fa0_0001);
        assert_eq!(ScalarVector::<f32>::zero().0.to_bits(), 0);
    }

    #[test]
    fn test_scalar_broadcast_sign_bit() {
        assert_eq!(ScalarVector(-3i16).broadcast_sign_bit().0, -1);
        assert_eq!(ScalarVector(3i16).broadcast_sign_bit().0, 0);
        assert_eq!(
            ScalarVector(-0.0f64).broadcast_sign_bit().0.to_bits(),
            u64::MAX
        );
        assert_eq!(ScalarVector(0x80u8).broadcast_sign_bit().0, 0xff);
    }

    #[test]
    fn test_scalar_comparison() {
        let a = ScalarVector(2.0f32);
        let b = ScalarVector(3.0f32);

        assert!(b.gt(a).0);
        assert!(!a.gt(b).0);
        assert!(!a.eq(b).0);
        assert!(ScalarVector(0.0f32).eq(ScalarVector(-0.0)).0);
        assert!(!ScalarVector(f32::NAN).eq(ScalarVector(f32::NAN)).0);
        assert!(ScalarVector(200u8).gt(ScalarVector(100u8)).0);
        assert!(!ScalarVector(-56i8).gt(ScalarVector(100i8)).0);
    }

    #[test]
    fn test_scalar_select() {
        let a = ScalarVector(1.0f32);
        let b = ScalarVector(2.0f32);

        assert_eq!(ScalarVector::select(ScalarMask(true), a, b).0, 1.0);
        assert_eq!(ScalarVector::select(ScalarMask(false), a, b).0, 2.0);
    }

    #[test]
    fn test_scalar_mask_vec_conversion() {
        let ones = ScalarVector::<i32>::vec_from_mask(ScalarMask(true));
        assert_eq!(ones.0, -1);
        assert!(ones.mask_from_vec().0);
        assert!(!ScalarVector::<i32>::zero().mask_from_vec().0);
    }

    #[test]
    fn test_scalar_neg_if_negative_zero_lane() {
        // Scalar resolves the zero case through select: +0 keeps w
        let w = ScalarVector(7i32);
        assert_eq!(ScalarVector(0i32).neg_if_negative(w).0, 7);
        assert_eq!(ScalarVector(-1i32).neg_if_negative(w).0, -7);
    }

    #[test]
    fn test_scalar_mask() {
        let mask_true = ScalarMask(true);
        let mask_false = ScalarMask(false);

        assert!(mask_true.all());
        assert!(mask_true.any());
        assert!(!mask_true.none());

        assert!(!mask_false.all());
        assert!(!mask_false.any());
        assert!(mask_false.none());

        assert!(mask_true.and(mask_true).0);
        assert!(!mask_true.and(mask_false).0);
        assert!(mask_true.or(mask_false).0);
        assert!(!mask_true.xor(mask_true).0);
        assert!(mask_true.xor(mask_false).0);
    }
}
