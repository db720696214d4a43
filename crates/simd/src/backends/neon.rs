//! NEON backend implementation (ARM64)
//!
//! This backend provides 128-bit SIMD operations using ARM NEON instructions: 16 lanes
//! of 8-bit, 8 of 16-bit, 4 of 32-bit or 2 of 64-bit elements.
//!
//! Vectors are held as `uint8x16_t` and reinterpreted to the typed view each
//! instruction needs; the reinterprets compile to nothing. Masks are full-width lane
//! vectors like AVX2.
//!
//! **Note**: NEON is mandatory for ARM64, so no runtime detection is needed.

// This backend only compiles on aarch64 targets
#![cfg(target_arch = "aarch64")]

use core::arch::aarch64::*;
use core::marker::PhantomData;

use crate::lane::{Lane, LaneKind, LaneWidth};
use crate::traits::{SimdMask, SimdVector};

/// NEON vector wrapper (128 bits of `T` lanes)
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct NeonVector<T>(uint8x16_t, PhantomData<T>);

/// NEON mask wrapper
///
/// Each lane is all-ones (true) or all-zeros (false), at the width of `T`.
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct NeonMask<T>(uint8x16_t, PhantomData<T>);

impl<T: Lane> NeonVector<T> {
    #[inline(always)]
    fn new(raw: uint8x16_t) -> Self {
        NeonVector(raw, PhantomData)
    }
}

impl<T: Lane> NeonMask<T> {
    #[inline(always)]
    fn new(raw: uint8x16_t) -> Self {
        NeonMask(raw, PhantomData)
    }
}

impl<T: Lane> SimdVector for NeonVector<T> {
    type Scalar = T;
    type Mask = NeonMask<T>;

    const LANES: usize = 16 / core::mem::size_of::<T>();

    #[inline(always)]
    fn zero() -> Self {
        unsafe { Self::new(vdupq_n_u8(0)) }
    }

    #[inline(always)]
    fn splat(value: T) -> Self {
        let bits = value.to_bits();
        unsafe {
            Self::new(match T::WIDTH {
                LaneWidth::W8 => vdupq_n_u8(bits as u8),
                LaneWidth::W16 => vreinterpretq_u8_u16(vdupq_n_u16(bits as u16)),
                LaneWidth::W32 => vreinterpretq_u8_u32(vdupq_n_u32(bits as u32)),
                LaneWidth::W64 => vreinterpretq_u8_u64(vdupq_n_u64(bits)),
            })
        }
    }

    #[inline(always)]
    fn from_slice(slice: &[T]) -> Self {
        assert!(slice.len() >= Self::LANES, "Slice too short for NEON load");
        unsafe { Self::new(vld1q_u8(slice.as_ptr().cast())) }
    }

    #[inline(always)]
    fn to_slice(self, slice: &mut [T]) {
        assert!(slice.len() >= Self::LANES, "Slice too short for NEON store");
        unsafe { vst1q_u8(slice.as_mut_ptr().cast(), self.0) }
    }

    #[inline(always)]
    fn and(self, rhs: Self) -> Self {
        unsafe { Self::new(vandq_u8(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn or(self, rhs: Self) -> Self {
        unsafe { Self::new(vorrq_u8(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn xor(self, rhs: Self) -> Self {
        unsafe { Self::new(veorq_u8(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn and_not(self, rhs: Self) -> Self {
        // vbic(a, b) = a & !b
        unsafe { Self::new(vbicq_u8(rhs.0, self.0)) }
    }

    #[inline(always)]
    fn broadcast_sign_bit(self) -> Self {
        let v = self.0;
        unsafe {
            Self::new(match T::WIDTH {
                LaneWidth::W8 => vreinterpretq_u8_s8(vshrq_n_s8::<7>(vreinterpretq_s8_u8(v))),
                LaneWidth::W16 => {
                    vreinterpretq_u8_s16(vshrq_n_s16::<15>(vreinterpretq_s16_u8(v)))
                }
                LaneWidth::W32 => {
                    vreinterpretq_u8_s32(vshrq_n_s32::<31>(vreinterpretq_s32_u8(v)))
                }
                LaneWidth::W64 => {
                    vreinterpretq_u8_s64(vshrq_n_s64::<63>(vreinterpretq_s64_u8(v)))
                }
            })
        }
    }

    #[inline(always)]
    fn neg(self) -> Self {
        if T::KIND == LaneKind::Float {
            return self.xor(Self::sign_bit());
        }
        let v = self.0;
        unsafe {
            Self::new(match T::WIDTH {
                LaneWidth::W8 => vreinterpretq_u8_s8(vnegq_s8(vreinterpretq_s8_u8(v))),
                LaneWidth::W16 => vreinterpretq_u8_s16(vnegq_s16(vreinterpretq_s16_u8(v))),
                LaneWidth::W32 => vreinterpretq_u8_s32(vnegq_s32(vreinterpretq_s32_u8(v))),
                LaneWidth::W64 => vreinterpretq_u8_s64(vnegq_s64(vreinterpretq_s64_u8(v))),
            })
        }
    }

    #[inline(always)]
    fn eq(self, rhs: Self) -> Self::Mask {
        let (a, b) = (self.0, rhs.0);
        unsafe {
            NeonMask::new(match (T::KIND, T::WIDTH) {
                (LaneKind::Float, LaneWidth::W32) => vreinterpretq_u8_u32(vceqq_f32(
                    vreinterpretq_f32_u8(a),
                    vreinterpretq_f32_u8(b),
                )),
                (LaneKind::Float, _) => vreinterpretq_u8_u64(vceqq_f64(
                    vreinterpretq_f64_u8(a),
                    vreinterpretq_f64_u8(b),
                )),
                (_, LaneWidth::W8) => vceqq_u8(a, b),
                (_, LaneWidth::W16) => vreinterpretq_u8_u16(vceqq_u16(
                    vreinterpretq_u16_u8(a),
                    vreinterpretq_u16_u8(b),
                )),
                (_, LaneWidth::W32) => vreinterpretq_u8_u32(vceqq_u32(
                    vreinterpretq_u32_u8(a),
                    vreinterpretq_u32_u8(b),
                )),
                (_, LaneWidth::W64) => vreinterpretq_u8_u64(vceqq_u64(
                    vreinterpretq_u64_u8(a),
                    vreinterpretq_u64_u8(b),
                )),
            })
        }
    }

    #[inline(always)]
    fn gt(self, rhs: Self) -> Self::Mask {
        let (a, b) = (self.0, rhs.0);
        unsafe {
            NeonMask::new(match (T::KIND, T::WIDTH) {
                (LaneKind::Float, LaneWidth::W32) => vreinterpretq_u8_u32(vcgtq_f32(
                    vreinterpretq_f32_u8(a),
                    vreinterpretq_f32_u8(b),
                )),
                (LaneKind::Float, _) => vreinterpretq_u8_u64(vcgtq_f64(
                    vreinterpretq_f64_u8(a),
                    vreinterpretq_f64_u8(b),
                )),
                (LaneKind::Signed, LaneWidth::W8) => {
                    vcgtq_s8(vreinterpretq_s8_u8(a), vreinterpretq_s8_u8(b))
                }
                (LaneKind::Signed, LaneWidth::W16) => vreinterpretq_u8_u16(vcgtq_s16(
                    vreinterpretq_s16_u8(a),
                    vreinterpretq_s16_u8(b),
                )),
                (LaneKind::Signed, LaneWidth::W32) => vreinterpretq_u8_u32(vcgtq_s32(
                    vreinterpretq_s32_u8(a),
                    vreinterpretq_s32_u8(b),
                )),
                (LaneKind::Signed, LaneWidth::W64) => vreinterpretq_u8_u64(vcgtq_s64(
                    vreinterpretq_s64_u8(a),
                    vreinterpretq_s64_u8(b),
                )),
                (LaneKind::Unsigned, LaneWidth::W8) => vcgtq_u8(a, b),
                (LaneKind::Unsigned, LaneWidth::W16) => vreinterpretq_u8_u16(vcgtq_u16(
                    vreinterpretq_u16_u8(a),
                    vreinterpretq_u16_u8(b),
                )),
                (LaneKind::Unsigned, LaneWidth::W32) => vreinterpretq_u8_u32(vcgtq_u32(
                    vreinterpretq_u32_u8(a),
                    vreinterpretq_u32_u8(b),
                )),
                (LaneKind::Unsigned, LaneWidth::W64) => vreinterpretq_u8_u64(vcgtq_u64(
                    vreinterpretq_u64_u8(a),
                    vreinterpretq_u64_u8(b),
                )),
            })
        }
    }

    #[inline(always)]
    fn mask_from_vec(self) -> Self::Mask {
        NeonMask::new(self.0)
    }

    #[inline(always)]
    fn vec_from_mask(mask: Self::Mask) -> Self {
        Self::new(mask.0)
    }

    #[inline(always)]
    fn select(mask: Self::Mask, true_val: Self, false_val: Self) -> Self {
        unsafe { Self::new(vbslq_u8(mask.0, true_val.0, false_val.0)) }
    }

    #[inline(always)]
    fn bitwise_select(bits: Self, true_val: Self, false_val: Self) -> Self {
        // BSL is already a bitwise blend
        unsafe { Self::new(vbslq_u8(bits.0, true_val.0, false_val.0)) }
    }
}

impl<T: Lane> SimdMask for NeonMask<T> {
    #[inline(always)]
    fn all(self) -> bool {
        unsafe { vminvq_u8(self.0) == u8::MAX }
    }

    #[inline(always)]
    fn any(self) -> bool {
        unsafe { vmaxvq_u8(self.0) != 0 }
    }

    #[inline(always)]
    fn and(self, rhs: Self) -> Self {
        unsafe { NeonMask::new(vandq_u8(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn or(self, rhs: Self) -> Self {
        unsafe { NeonMask::new(vorrq_u8(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn not(self) -> Self {
        unsafe { NeonMask::new(vmvnq_u8(self.0)) }
    }

    #[inline(always)]
    fn xor(self, rhs: Self) -> Self {
        unsafe { NeonMask::new(veorq_u8(self.0, rhs.0)) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neon_lane_counts() {
        assert_eq!(NeonVector::<u8>::LANES, 16);
        assert_eq!(NeonVector::<i16>::LANES, 8);
        assert_eq!(NeonVector::<f32>::LANES, 4);
        assert_eq!(NeonVector::<f64>::LANES, 2);
    }

    #[test]
    fn test_neon_broadcast_sign_bit() {
        let v = NeonVector::<i32>::from_slice(&[-5, 5, i32::MIN, 0]);
        let mut out = [0i32; 4];
        v.broadcast_sign_bit().to_slice(&mut out);
        assert_eq!(out, [-1, 0, -1, 0]);

        let f = NeonVector::<f64>::from_slice(&[-0.0, 0.0]);
        let mut out = [0.0f64; 2];
        f.broadcast_sign_bit().to_slice(&mut out);
        assert_eq!(out[0].to_bits(), u64::MAX);
        assert_eq!(out[1].to_bits(), 0);
    }

    #[test]
    fn test_neon_and_not_operand_order() {
        let a = NeonVector::<u8>::splat(0b1100);
        let b = NeonVector::<u8>::splat(0b1010);
        let mut out = [0u8; 16];
        a.and_not(b).to_slice(&mut out);
        assert!(out.iter().all(|&lane| lane == 0b0010));
    }

    #[test]
    fn test_neon_unsigned_gt() {
        let a = NeonVector::<u16>::splat(0x8000);
        let b = NeonVector::<u16>::splat(1);
        assert!(a.gt(b).all());
        assert!(b.gt(a).none());
    }

    #[test]
    fn test_neon_mask_ops() {
        let v = NeonVector::<f32>::from_slice(&[-1.0, 1.0, -2.0, 2.0]);
        let neg = v.is_negative();
        assert!(neg.any());
        assert!(!neg.all());
        assert!(neg.or(neg.not()).all());
        assert!(neg.and(neg.not()).none());
        assert!(neg.xor(neg).none());
    }
}
