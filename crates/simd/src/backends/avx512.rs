//! AVX-512 backend implementation (x86-64)
//!
//! This backend provides 512-bit SIMD operations: 64 lanes of 8-bit, 32 of 16-bit,
//! 16 of 32-bit or 8 of 64-bit elements.
//!
//! Unlike AVX2 and NEON, comparisons produce packed `k`-register masks with one bit per
//! lane. `Avx512Mask` stores them widened to `u64`; bits above `LANES` are always clear.
//!
//! Requires AVX-512 F + BW + DQ + VL. As with the other backends, methods must only run
//! inside code compiled with those target features enabled.

#![cfg(any(target_arch = "x86", target_arch = "x86_64"))]

use core::marker::PhantomData;

use crate::lane::{Lane, LaneKind, LaneWidth};
use crate::traits::{SimdMask, SimdVector};

#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

#[cfg(target_arch = "x86")]
use core::arch::x86::*;

/// AVX-512 vector wrapper (512 bits of `T` lanes)
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct Avx512Vector<T>(__m512i, PhantomData<T>);

/// AVX-512 mask wrapper (one bit per lane)
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Avx512Mask<T>(u64, PhantomData<T>);

impl<T: Lane> Avx512Vector<T> {
    #[inline(always)]
    fn new(raw: __m512i) -> Self {
        Avx512Vector(raw, PhantomData)
    }
}

impl<T: Lane> Avx512Mask<T> {
    /// Bits that correspond to real lanes
    const LANE_BITS: u64 = u64::MAX >> (64 - <Avx512Vector<T> as SimdVector>::LANES);

    #[inline(always)]
    fn new(bits: u64) -> Self {
        Avx512Mask(bits, PhantomData)
    }

    /// Packed lane bits (bit `i` set when lane `i` is true)
    #[inline(always)]
    pub fn to_bits(self) -> u64 {
        self.0
    }
}

impl<T: Lane> SimdVector for Avx512Vector<T> {
    type Scalar = T;
    type Mask = Avx512Mask<T>;

    const LANES: usize = 64 / core::mem::size_of::<T>();

    #[inline(always)]
    fn zero() -> Self {
        unsafe { Self::new(_mm512_setzero_si512()) }
    }

    #[inline(always)]
    fn splat(value: T) -> Self {
        let bits = value.to_bits();
        unsafe {
            Self::new(match T::WIDTH {
                LaneWidth::W8 => _mm512_set1_epi8(bits as i8),
                LaneWidth::W16 => _mm512_set1_epi16(bits as i16),
                LaneWidth::W32 => _mm512_set1_epi32(bits as i32),
                LaneWidth::W64 => _mm512_set1_epi64(bits as i64),
            })
        }
    }

    #[inline(always)]
    fn from_slice(slice: &[T]) -> Self {
        assert!(slice.len() >= Self::LANES, "Slice too short for AVX-512 load");
        unsafe { Self::new(_mm512_loadu_si512(slice.as_ptr().cast())) }
    }

    #[inline(always)]
    fn to_slice(self, slice: &mut [T]) {
        assert!(
            slice.len() >= Self::LANES,
            "Slice too short for AVX-512 store"
        );
        unsafe { _mm512_storeu_si512(slice.as_mut_ptr().cast(), self.0) }
    }

    #[inline(always)]
    fn and(self, rhs: Self) -> Self {
        unsafe { Self::new(_mm512_and_si512(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn or(self, rhs: Self) -> Self {
        unsafe { Self::new(_mm512_or_si512(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn xor(self, rhs: Self) -> Self {
        unsafe { Self::new(_mm512_xor_si512(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn and_not(self, rhs: Self) -> Self {
        unsafe { Self::new(_mm512_andnot_si512(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn broadcast_sign_bit(self) -> Self {
        unsafe {
            Self::new(match T::WIDTH {
                LaneWidth::W8 => _mm512_movm_epi8(_mm512_movepi8_mask(self.0)),
                LaneWidth::W16 => _mm512_srai_epi16::<15>(self.0),
                LaneWidth::W32 => _mm512_srai_epi32::<31>(self.0),
                LaneWidth::W64 => _mm512_srai_epi64::<63>(self.0),
            })
        }
    }

    #[inline(always)]
    fn neg(self) -> Self {
        if T::KIND == LaneKind::Float {
            return self.xor(Self::sign_bit());
        }
        unsafe {
            let zero = _mm512_setzero_si512();
            Self::new(match T::WIDTH {
                LaneWidth::W8 => _mm512_sub_epi8(zero, self.0),
                LaneWidth::W16 => _mm512_sub_epi16(zero, self.0),
                LaneWidth::W32 => _mm512_sub_epi32(zero, self.0),
                LaneWidth::W64 => _mm512_sub_epi64(zero, self.0),
            })
        }
    }

    #[inline(always)]
    fn eq(self, rhs: Self) -> Self::Mask {
        let (a, b) = (self.0, rhs.0);
        unsafe {
            Avx512Mask::new(match (T::KIND, T::WIDTH) {
                (LaneKind::Float, LaneWidth::W32) => _mm512_cmp_ps_mask::<_CMP_EQ_OQ>(
                    _mm512_castsi512_ps(a),
                    _mm512_castsi512_ps(b),
                ) as u64,
                (LaneKind::Float, _) => _mm512_cmp_pd_mask::<_CMP_EQ_OQ>(
                    _mm512_castsi512_pd(a),
                    _mm512_castsi512_pd(b),
                ) as u64,
                (_, LaneWidth::W8) => _mm512_cmpeq_epi8_mask(a, b),
                (_, LaneWidth::W16) => _mm512_cmpeq_epi16_mask(a, b) as u64,
                (_, LaneWidth::W32) => _mm512_cmpeq_epi32_mask(a, b) as u64,
                (_, LaneWidth::W64) => _mm512_cmpeq_epi64_mask(a, b) as u64,
            })
        }
    }

    #[inline(always)]
    fn gt(self, rhs: Self) -> Self::Mask {
        let (a, b) = (self.0, rhs.0);
        unsafe {
            Avx512Mask::new(match (T::KIND, T::WIDTH) {
                (LaneKind::Float, LaneWidth::W32) => _mm512_cmp_ps_mask::<_CMP_GT_OQ>(
                    _mm512_castsi512_ps(a),
                    _mm512_castsi512_ps(b),
                ) as u64,
                (LaneKind::Float, _) => _mm512_cmp_pd_mask::<_CMP_GT_OQ>(
                    _mm512_castsi512_pd(a),
                    _mm512_castsi512_pd(b),
                ) as u64,
                (LaneKind::Signed, LaneWidth::W8) => _mm512_cmpgt_epi8_mask(a, b),
                (LaneKind::Signed, LaneWidth::W16) => _mm512_cmpgt_epi16_mask(a, b) as u64,
                (LaneKind::Signed, LaneWidth::W32) => _mm512_cmpgt_epi32_mask(a, b) as u64,
                (LaneKind::Signed, LaneWidth::W64) => _mm512_cmpgt_epi64_mask(a, b) as u64,
                (LaneKind::Unsigned, LaneWidth::W8) => _mm512_cmpgt_epu8_mask(a, b),
                (LaneKind::Unsigned, LaneWidth::W16) => _mm512_cmpgt_epu16_mask(a, b) as u64,
                (LaneKind::Unsigned, LaneWidth::W32) => _mm512_cmpgt_epu32_mask(a, b) as u64,
                (LaneKind::Unsigned, LaneWidth::W64) => _mm512_cmpgt_epu64_mask(a, b) as u64,
            })
        }
    }

    #[inline(always)]
    fn mask_from_vec(self) -> Self::Mask {
        // Lanes are all-ones/all-zeros, so the most significant bit decides
        self.is_negative()
    }

    #[inline(always)]
    fn vec_from_mask(mask: Self::Mask) -> Self {
        let k = mask.0;
        unsafe {
            Self::new(match T::WIDTH {
                LaneWidth::W8 => _mm512_movm_epi8(k),
                LaneWidth::W16 => _mm512_movm_epi16(k as u32),
                LaneWidth::W32 => _mm512_movm_epi32(k as u16),
                LaneWidth::W64 => _mm512_movm_epi64(k as u8),
            })
        }
    }

    #[inline(always)]
    fn select(mask: Self::Mask, true_val: Self, false_val: Self) -> Self {
        let (k, t, f) = (mask.0, true_val.0, false_val.0);
        unsafe {
            Self::new(match T::WIDTH {
                LaneWidth::W8 => _mm512_mask_blend_epi8(k, f, t),
                LaneWidth::W16 => _mm512_mask_blend_epi16(k as u32, f, t),
                LaneWidth::W32 => _mm512_mask_blend_epi32(k as u16, f, t),
                LaneWidth::W64 => _mm512_mask_blend_epi64(k as u8, f, t),
            })
        }
    }

    #[inline(always)]
    fn bitwise_select(bits: Self, true_val: Self, false_val: Self) -> Self {
        // 0xCA: a ? b : c, bit by bit
        unsafe {
            Self::new(_mm512_ternarylogic_epi64::<0xCA>(
                bits.0,
                true_val.0,
                false_val.0,
            ))
        }
    }

    #[inline(always)]
    fn is_negative(self) -> Self::Mask {
        unsafe {
            Avx512Mask::new(match T::WIDTH {
                LaneWidth::W8 => _mm512_movepi8_mask(self.0),
                LaneWidth::W16 => _mm512_movepi16_mask(self.0) as u64,
                LaneWidth::W32 => _mm512_movepi32_mask(self.0) as u64,
                LaneWidth::W64 => _mm512_movepi64_mask(self.0) as u64,
            })
        }
    }
}

impl<T: Lane> SimdMask for Avx512Mask<T> {
    #[inline(always)]
    fn all(self) -> bool {
        self.0 == Self::LANE_BITS
    }

    #[inline(always)]
    fn any(self) -> bool {
        self.0 != 0
    }

    #[inline(always)]
    fn and(self, rhs: Self) -> Self {
        Avx512Mask::new(self.0 & rhs.0)
    }

    #[inline(always)]
    fn or(self, rhs: Self) -> Self {
        Avx512Mask::new(self.0 | rhs.0)
    }

    #[inline(always)]
    fn not(self) -> Self {
        Avx512Mask::new(!self.0 & Self::LANE_BITS)
    }

    #[inline(always)]
    fn xor(self, rhs: Self) -> Self {
        Avx512Mask::new(self.0 ^ rhs.0)
    }
}
