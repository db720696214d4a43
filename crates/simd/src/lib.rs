#![no_std]
#![warn(missing_docs)]
#![warn(clippy::all)]

//! rigel-simd: Trait-based SIMD selection primitives
//!
//! This library provides zero-cost per-lane conditional selection that is written once
//! against the [`SimdVector`] / [`SimdMask`] traits and compiled for every backend:
//! scalar, AVX2, AVX-512 and NEON. Results are bit-exact across backends except where
//! an operation documents otherwise.
//!
//! # Features
//!
//! - **Lane types**: `u8`..`u64`, `i8`..`i64`, `f32`, `f64`, handled as raw bit patterns
//! - **Backend-defined masks**: `bool`, full-width lane vectors, or packed `k` masks
//! - **Selection primitives**: mask, bit-vector and sign-bit driven selection
//! - **No allocations**: all operations are stack-based and `no_std`
//!
//! Backends assume their instruction set is enabled in the calling function. Use
//! `rigel-simd-dispatch` to pick the best backend at runtime instead of calling
//! AVX2/AVX-512 types directly.
//!
//! # Quick Start
//!
//! ```rust
//! use rigel_simd::{ScalarVector, SimdVector};
//! use rigel_simd::ops::{if_negative_then_else, zero_if_negative};
//!
//! let v = ScalarVector(-2.0f32);
//! assert_eq!(zero_if_negative(v).0, 0.0);
//!
//! let picked = if_negative_then_else(v, ScalarVector::splat(1.0), ScalarVector::splat(2.0));
//! assert_eq!(picked.0, 1.0);
//! ```

#[cfg(test)]
extern crate std;

// Lane element types
pub mod lane;

// Core trait definitions
pub mod traits;

// Backend implementations
pub mod backends;

// Functional-style vector operations
pub mod ops;

// Public re-exports for convenience
pub use lane::{FloatLane, Lane, LaneKind, LaneWidth, SignedLane};
pub use traits::{SimdMask, SimdVector, MAX_LANES};

// Re-export backend types
pub use backends::scalar::{ScalarMask, ScalarVector};

// Only re-export AVX2 types when both feature is enabled AND we're targeting x86/x86_64
#[cfg(all(feature = "avx2", any(target_arch = "x86", target_arch = "x86_64")))]
pub use backends::avx2::{Avx2Mask, Avx2Vector};

// Only re-export AVX512 types when both feature is enabled AND we're targeting x86/x86_64
#[cfg(all(feature = "avx512", any(target_arch = "x86", target_arch = "x86_64")))]
pub use backends::avx512::{Avx512Mask, Avx512Vector};

// Only re-export NEON types when both feature is enabled AND we're targeting aarch64
#[cfg(all(feature = "neon", target_arch = "aarch64"))]
pub use backends::neon::{NeonMask, NeonVector};
