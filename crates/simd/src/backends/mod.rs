//! SIMD backend implementations
//!
//! Every backend implements `SimdVector`/`SimdMask` for all lane types. Unlike a
//! single-backend build, all backends compiled for the target architecture coexist:
//! the dispatch crate instantiates the selection kernels once per backend and picks
//! one at runtime.

// Scalar backend (always available as fallback)
pub mod scalar;

// Platform-specific backends (feature-gated; each module is also arch-gated)
#[cfg(feature = "avx2")]
pub mod avx2;

#[cfg(feature = "avx512")]
pub mod avx512;

#[cfg(feature = "neon")]
pub mod neon;
