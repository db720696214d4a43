//! Backend Type Enumeration
//!
//! Names the backend variants, the capabilities each one requires, and whether it
//! was compiled into this build.

use core::fmt;

use crate::error::{DispatchError, Result};
use crate::features::{detected_targets, TargetSet};

/// Backend variant of the selection primitives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendType {
    /// Scalar fallback (no SIMD, always available)
    Scalar,

    /// AVX2 backend (x86, 256-bit SIMD)
    Avx2,

    /// AVX-512 backend (x86, 512-bit SIMD with packed masks)
    Avx512,

    /// NEON backend (aarch64, 128-bit SIMD)
    Neon,
}

impl BackendType {
    /// Every variant, most to least capable
    pub const ALL: [BackendType; 4] = [
        BackendType::Avx512,
        BackendType::Avx2,
        BackendType::Neon,
        BackendType::Scalar,
    ];

    /// Backend name for logging/debugging
    ///
    /// # Returns
    /// Static string: "scalar", "avx2", "avx512", or "neon"
    pub fn name(&self) -> &'static str {
        match self {
            BackendType::Scalar => "scalar",
            BackendType::Avx2 => "avx2",
            BackendType::Avx512 => "avx512",
            BackendType::Neon => "neon",
        }
    }

    /// Capabilities the CPU must provide for this variant
    pub const fn required_targets(self) -> TargetSet {
        match self {
            BackendType::Scalar => TargetSet::EMPTY,
            BackendType::Avx2 => TargetSet::AVX2,
            BackendType::Avx512 => TargetSet::AVX512,
            BackendType::Neon => TargetSet::NEON,
        }
    }

    /// True if this variant's entry points exist in this build
    pub const fn is_compiled(self) -> bool {
        match self {
            BackendType::Scalar => true,
            BackendType::Avx2 => cfg!(all(
                feature = "avx2",
                any(target_arch = "x86", target_arch = "x86_64")
            )),
            BackendType::Avx512 => cfg!(all(
                feature = "avx512",
                any(target_arch = "x86", target_arch = "x86_64")
            )),
            BackendType::Neon => cfg!(all(feature = "neon", target_arch = "aarch64")),
        }
    }

    /// Check that this variant is compiled in and runnable on the current CPU
    pub fn ensure_supported(self) -> Result<()> {
        if !self.is_compiled() {
            return Err(DispatchError::NotCompiled { backend: self });
        }

        let missing = self.required_targets().difference(detected_targets());
        if !missing.is_empty() {
            return Err(DispatchError::Unsupported {
                backend: self,
                missing,
            });
        }

        Ok(())
    }

    /// True if [`ensure_supported`](Self::ensure_supported) would succeed
    pub fn is_supported(self) -> bool {
        self.ensure_supported().is_ok()
    }
}

impl fmt::Display for BackendType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
