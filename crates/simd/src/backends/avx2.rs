//! AVX2 backend implementation (x86-64)
//!
//! This backend provides 256-bit SIMD operations using AVX2 instructions: 32 lanes of
//! 8-bit, 16 of 16-bit, 8 of 32-bit or 4 of 64-bit elements.
//! Requires x86-64 CPU with AVX2 support (Intel Haswell 2013+, AMD Excavator 2015+).
//!
//! Every lane type shares one `__m256i` register; floats are compared through
//! `_mm256_castsi256_ps`/`_pd` views. Masks are full-width lane vectors (all-ones or
//! all-zeros per lane), so `mask_from_vec`/`vec_from_mask` are free.
//!
//! **Note**: methods are `#[inline(always)]` and assume AVX2 is available. They must
//! only run inside a function compiled with `#[target_feature(enable = "avx2")]`
//! (the dispatch variants) on a CPU that supports it.

// This backend only compiles on x86/x86_64 targets
#![cfg(any(target_arch = "x86", target_arch = "x86_64"))]

use core::marker::PhantomData;

use crate::lane::{Lane, LaneKind, LaneWidth};
use crate::traits::{SimdMask, SimdVector};

#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

#[cfg(target_arch = "x86")]
use core::arch::x86::*;

/// AVX2 vector wrapper (256 bits of `T` lanes)
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct Avx2Vector<T>(__m256i, PhantomData<T>);

/// AVX2 mask wrapper
///
/// Each lane is all-ones (true) or all-zeros (false), at the width of `T`.
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct Avx2Mask<T>(__m256i, PhantomData<T>);

impl<T: Lane> Avx2Vector<T> {
    #[inline(always)]
    fn new(raw: __m256i) -> Self {
        Avx2Vector(raw, PhantomData)
    }
}

impl<T: Lane> Avx2Mask<T> {
    #[inline(always)]
    fn new(raw: __m256i) -> Self {
        Avx2Mask(raw, PhantomData)
    }
}

/// Signed lane-wise `a > b` at the given width
#[inline(always)]
fn cmpgt_signed(width: LaneWidth, a: __m256i, b: __m256i) -> __m256i {
    unsafe {
        match width {
            LaneWidth::W8 => _mm256_cmpgt_epi8(a, b),
            LaneWidth::W16 => _mm256_cmpgt_epi16(a, b),
            LaneWidth::W32 => _mm256_cmpgt_epi32(a, b),
            LaneWidth::W64 => _mm256_cmpgt_epi64(a, b),
        }
    }
}

impl<T: Lane> SimdVector for Avx2Vector<T> {
    type Scalar = T;
    type Mask = Avx2Mask<T>;

    const LANES: usize = 32 / core::mem::size_of::<T>();

    #[inline(always)]
    fn zero() -> Self {
        unsafe { Self::new(_mm256_setzero_si256()) }
    }

    #[inline(always)]
    fn splat(value: T) -> Self {
        let bits = value.to_bits();
        unsafe {
            Self::new(match T::WIDTH {
                LaneWidth::W8 => _mm256_set1_epi8(bits as i8),
                LaneWidth::W16 => _mm256_set1_epi16(bits as i16),
                LaneWidth::W32 => _mm256_set1_epi32(bits as i32),
                LaneWidth::W64 => _mm256_set1_epi64x(bits as i64),
            })
        }
    }

    #[inline(always)]
    fn from_slice(slice: &[T]) -> Self {
        assert!(slice.len() >= Self::LANES, "Slice too short for AVX2 load");
        unsafe { Self::new(_mm256_loadu_si256(slice.as_ptr() as *const __m256i)) }
    }

    #[inline(always)]
    fn to_slice(self, slice: &mut [T]) {
        assert!(slice.len() >= Self::LANES, "Slice too short for AVX2 store");
        unsafe { _mm256_storeu_si256(slice.as_mut_ptr() as *mut __m256i, self.0) }
    }

    #[inline(always)]
    fn and(self, rhs: Self) -> Self {
        unsafe { Self::new(_mm256_and_si256(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn or(self, rhs: Self) -> Self {
        unsafe { Self::new(_mm256_or_si256(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn xor(self, rhs: Self) -> Self {
        unsafe { Self::new(_mm256_xor_si256(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn and_not(self, rhs: Self) -> Self {
        unsafe { Self::new(_mm256_andnot_si256(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn broadcast_sign_bit(self) -> Self {
        unsafe {
            Self::new(match T::WIDTH {
                // No 8-bit or 64-bit arithmetic shift in AVX2
                LaneWidth::W8 => _mm256_cmpgt_epi8(_mm256_setzero_si256(), self.0),
                LaneWidth::W16 => _mm256_srai_epi16::<15>(self.0),
                LaneWidth::W32 => _mm256_srai_epi32::<31>(self.0),
                LaneWidth::W64 => _mm256_cmpgt_epi64(_mm256_setzero_si256(), self.0),
            })
        }
    }

    #[inline(always)]
    fn neg(self) -> Self {
        if T::KIND == LaneKind::Float {
            return self.xor(Self::sign_bit());
        }
        unsafe {
            let zero = _mm256_setzero_si256();
            Self::new(match T::WIDTH {
                LaneWidth::W8 => _mm256_sub_epi8(zero, self.0),
                LaneWidth::W16 => _mm256_sub_epi16(zero, self.0),
                LaneWidth::W32 => _mm256_sub_epi32(zero, self.0),
                LaneWidth::W64 => _mm256_sub_epi64(zero, self.0),
            })
        }
    }

    #[inline(always)]
    fn eq(self, rhs: Self) -> Self::Mask {
        unsafe {
            Avx2Mask::new(match (T::KIND, T::WIDTH) {
                (LaneKind::Float, LaneWidth::W32) => _mm256_castps_si256(
                    _mm256_cmp_ps::<_CMP_EQ_OQ>(
                        _mm256_castsi256_ps(self.0),
                        _mm256_castsi256_ps(rhs.0),
                    ),
                ),
                (LaneKind::Float, _) => _mm256_castpd_si256(_mm256_cmp_pd::<_CMP_EQ_OQ>(
                    _mm256_castsi256_pd(self.0),
                    _mm256_castsi256_pd(rhs.0),
                )),
                (_, LaneWidth::W8) => _mm256_cmpeq_epi8(self.0, rhs.0),
                (_, LaneWidth::W16) => _mm256_cmpeq_epi16(self.0, rhs.0),
                (_, LaneWidth::W32) => _mm256_cmpeq_epi32(self.0, rhs.0),
                (_, LaneWidth::W64) => _mm256_cmpeq_epi64(self.0, rhs.0),
            })
        }
    }

    #[inline(always)]
    fn gt(self, rhs: Self) -> Self::Mask {
        unsafe {
            Avx2Mask::new(match (T::KIND, T::WIDTH) {
                (LaneKind::Float, LaneWidth::W32) => _mm256_castps_si256(
                    _mm256_cmp_ps::<_CMP_GT_OQ>(
                        _mm256_castsi256_ps(self.0),
                        _mm256_castsi256_ps(rhs.0),
                    ),
                ),
                (LaneKind::Float, _) => _mm256_castpd_si256(_mm256_cmp_pd::<_CMP_GT_OQ>(
                    _mm256_castsi256_pd(self.0),
                    _mm256_castsi256_pd(rhs.0),
                )),
                (LaneKind::Signed, width) => cmpgt_signed(width, self.0, rhs.0),
                (LaneKind::Unsigned, width) => {
                    // Bias both sides by the sign bit so the signed compare orders them
                    // as unsigned
                    let bias = Self::sign_bit().0;
                    cmpgt_signed(
                        width,
                        _mm256_xor_si256(self.0, bias),
                        _mm256_xor_si256(rhs.0, bias),
                    )
                }
            })
        }
    }

    #[inline(always)]
    fn mask_from_vec(self) -> Self::Mask {
        Avx2Mask::new(self.0)
    }

    #[inline(always)]
    fn vec_from_mask(mask: Self::Mask) -> Self {
        Self::new(mask.0)
    }

    #[inline(always)]
    fn select(mask: Self::Mask, true_val: Self, false_val: Self) -> Self {
        // Lanes are all-ones/all-zeros, so a byte blend is correct at every width
        unsafe { Self::new(_mm256_blendv_epi8(false_val.0, true_val.0, mask.0)) }
    }

    #[inline(always)]
    fn neg_if_negative(self, w: Self) -> Self {
        // vpsign{b,w,d}: -w where self < 0, 0 where self == 0, w where self > 0
        unsafe {
            match (T::KIND, T::WIDTH) {
                (LaneKind::Signed, LaneWidth::W8) => Self::new(_mm256_sign_epi8(w.0, self.0)),
                (LaneKind::Signed, LaneWidth::W16) => Self::new(_mm256_sign_epi16(w.0, self.0)),
                (LaneKind::Signed, LaneWidth::W32) => Self::new(_mm256_sign_epi32(w.0, self.0)),
                _ => Self::select(self.is_negative(), w.neg(), w),
            }
        }
    }
}

// Implement SimdMask for Avx2Mask
impl<T: Lane> SimdMask for Avx2Mask<T> {
    #[inline(always)]
    fn all(self) -> bool {
        unsafe { _mm256_movemask_epi8(self.0) == -1 }
    }

    #[inline(always)]
    fn any(self) -> bool {
        unsafe { _mm256_testz_si256(self.0, self.0) == 0 }
    }

    #[inline(always)]
    fn and(self, rhs: Self) -> Self {
        unsafe { Avx2Mask::new(_mm256_and_si256(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn or(self, rhs: Self) -> Self {
        unsafe { Avx2Mask::new(_mm256_or_si256(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn not(self) -> Self {
        unsafe { Avx2Mask::new(_mm256_xor_si256(self.0, _mm256_set1_epi32(-1))) }
    }

    #[inline(always)]
    fn xor(self, rhs: Self) -> Self {
        unsafe { Avx2Mask::new(_mm256_xor_si256(self.0, rhs.0)) }
    }
}
