#![warn(missing_docs)]
#![warn(clippy::all)]

//! rigel-simd-dispatch: Runtime SIMD dispatch for the rigel-simd selection primitives
//!
//! This crate compiles the selection primitives once per backend variant and picks the
//! best one for the running CPU at first use (AVX-512 → AVX2 → scalar on x86, NEON →
//! scalar on aarch64). A single binary therefore uses the widest instruction set
//! available without any caller-side `#[cfg]` or feature checks.
//!
//! # Architecture
//!
//! - `features`: CPU feature detection and [`TargetSet`]
//! - `backend`: [`BackendType`], required capabilities, compiled/supported checks
//! - `table`: [`DISPATCH_ORDER`] and the resolution rule
//! - `kernels`: generic slice kernels over `SimdVector`
//! - `variants`: per-backend entry points compiled with each variant's target features
//! - `dispatcher`: cached function pointer tables and the slice-level API
//!
//! # Feature Flags
//!
//! - `avx2`: Compile the AVX2 variant (x86)
//! - `avx512`: Compile the AVX-512 variant (x86)
//! - `neon`: Compile the NEON variant (aarch64)
//! - `force-scalar`: Force scalar backend for deterministic testing
//! - `force-avx2`: Force AVX2 backend (falls back to scalar if unsupported)
//! - `force-avx512`: Force AVX-512 backend (falls back to scalar if unsupported)
//! - `force-neon`: Force NEON backend (falls back to scalar if unsupported)
//!
//! # Example Usage
//!
//! ```rust
//! use rigel_simd_dispatch::{active_backend, if_negative_then_else, warmup};
//!
//! // Resolve once during startup
//! warmup();
//! println!("Using SIMD backend: {}", active_backend());
//!
//! let v = [-1.0f32, 2.0, -0.0, 4.0];
//! let mut out = [0.0f32; 4];
//! if_negative_then_else(&v, &[1.0; 4], &[2.0; 4], &mut out);
//! assert_eq!(out, [1.0, 2.0, 1.0, 2.0]);
//! ```

// Re-export rigel-simd for convenience
pub use rigel_simd;

// Internal modules
pub mod backend;
pub mod dispatcher;
pub mod error;
pub mod features;
pub mod kernels;
pub mod table;
pub mod variants;

// Re-export primary public API
pub use dispatcher::{
    active_backend, compiled_backends, if_negative_then_else,
    if_negative_then_neg_or_undef_if_zero, if_then_else, if_then_else_zero, if_then_zero_else,
    if_vec_then_else, lanes, supported_backends, warmup, zero_if_negative,
};

// Re-export supporting types
pub use backend::BackendType;
pub use dispatcher::{DispatchFloat, DispatchLane, DispatchSigned, FloatTable, SelectTable, SignTable};
pub use error::{DispatchError, Result};
pub use features::{detected_targets, CpuFeatures, TargetSet};
pub use table::{resolve, resolve_with, DISPATCH_ORDER};
