//! Backend variants
//!
//! One module per compiled backend, each holding the full set of slice-level entry
//! points instantiated for that backend's vector type. On x86 the entry points carry
//! the variant's `#[target_feature]` set so the `#[inline(always)]` vector methods are
//! compiled with those instructions enabled.
//!
//! Entry points are `unsafe`: calling one on a CPU without the variant's features is
//! undefined behavior. The dispatch tables only hand out variants that passed the
//! capability check.

/// Generate the entry points of one variant for vector type `$vector<T>`
macro_rules! select_variant {
    ($(#[$attr:meta])* $vector:ident) => {
        use rigel_simd::{FloatLane, Lane, SignedLane, SimdVector};

        use crate::kernels;

        /// Lane count of this variant for `T`
        pub fn lanes<T: Lane>() -> usize {
            <$vector<T> as SimdVector>::LANES
        }

        /// Mask selection
        ///
        /// # Safety
        /// The CPU must support this variant's target features.
        $(#[$attr])*
        pub unsafe fn if_then_else<T: Lane>(mask: &[bool], yes: &[T], no: &[T], out: &mut [T]) {
            kernels::if_then_else::<$vector<T>>(mask, yes, no, out)
        }

        /// Mask selection against zero
        ///
        /// # Safety
        /// The CPU must support this variant's target features.
        $(#[$attr])*
        pub unsafe fn if_then_else_zero<T: Lane>(mask: &[bool], yes: &[T], out: &mut [T]) {
            kernels::if_then_else_zero::<$vector<T>>(mask, yes, out)
        }

        /// Mask selection with zero for true lanes
        ///
        /// # Safety
        /// The CPU must support this variant's target features.
        $(#[$attr])*
        pub unsafe fn if_then_zero_else<T: Lane>(mask: &[bool], no: &[T], out: &mut [T]) {
            kernels::if_then_zero_else::<$vector<T>>(mask, no, out)
        }

        /// Bit-vector selection
        ///
        /// # Safety
        /// The CPU must support this variant's target features.
        $(#[$attr])*
        pub unsafe fn if_vec_then_else<T: Lane>(bits: &[T], yes: &[T], no: &[T], out: &mut [T]) {
            kernels::if_vec_then_else::<$vector<T>>(bits, yes, no, out)
        }

        /// Sign-bit zeroing
        ///
        /// # Safety
        /// The CPU must support this variant's target features.
        $(#[$attr])*
        pub unsafe fn zero_if_negative<T: FloatLane>(v: &[T], out: &mut [T]) {
            kernels::zero_if_negative::<$vector<T>>(v, out)
        }

        /// Sign-bit selection
        ///
        /// # Safety
        /// The CPU must support this variant's target features.
        $(#[$attr])*
        pub unsafe fn if_negative_then_else<T: SignedLane>(
            v: &[T],
            yes: &[T],
            no: &[T],
            out: &mut [T],
        ) {
            kernels::if_negative_then_else::<$vector<T>>(v, yes, no, out)
        }

        /// Sign-copy with backend-defined zero lanes
        ///
        /// # Safety
        /// The CPU must support this variant's target features.
        $(#[$attr])*
        pub unsafe fn if_negative_then_neg_or_undef_if_zero<T: SignedLane>(
            v: &[T],
            w: &[T],
            out: &mut [T],
        ) {
            kernels::if_negative_then_neg_or_undef_if_zero::<$vector<T>>(v, w, out)
        }
    };
}

/// Scalar variant (baseline, no target features)
pub mod scalar {
    use rigel_simd::ScalarVector;

    select_variant!(ScalarVector);
}

/// AVX2 variant
#[cfg(all(feature = "avx2", any(target_arch = "x86", target_arch = "x86_64")))]
pub mod avx2 {
    use rigel_simd::Avx2Vector;

    select_variant!(#[target_feature(enable = "avx2")] Avx2Vector);
}

/// AVX-512 variant
#[cfg(all(feature = "avx512", any(target_arch = "x86", target_arch = "x86_64")))]
pub mod avx512 {
    use rigel_simd::Avx512Vector;

    select_variant!(
        #[target_feature(enable = "avx512f,avx512bw,avx512dq,avx512vl")]
        Avx512Vector
    );
}

/// NEON variant (NEON is baseline on aarch64, so no extra target features)
#[cfg(all(feature = "neon", target_arch = "aarch64"))]
pub mod neon {
    use rigel_simd::NeonVector;

    select_variant!(NeonVector);
}
