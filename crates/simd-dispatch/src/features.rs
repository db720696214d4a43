//! CPU Feature Detection
//!
//! Detects the SIMD capabilities of the running processor once per process and
//! expresses them as a [`TargetSet`], the same type backend variants use to state
//! what they require.

use core::fmt;
use core::ops::BitOr;
use std::sync::OnceLock;

/// Set of instruction-set extensions
///
/// Used both for what a backend variant requires and for what the CPU provides.
/// A variant is usable when its required set is a subset of the detected set.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TargetSet(u32);

impl TargetSet {
    /// No extensions (the scalar baseline)
    pub const EMPTY: Self = TargetSet(0);

    /// AVX2 (x86)
    pub const AVX2: Self = TargetSet(1 << 0);

    /// AVX-512 Foundation (x86)
    pub const AVX512F: Self = TargetSet(1 << 1);

    /// AVX-512 Byte & Word operations (x86)
    pub const AVX512BW: Self = TargetSet(1 << 2);

    /// AVX-512 Doubleword & Quadword operations (x86)
    pub const AVX512DQ: Self = TargetSet(1 << 3);

    /// AVX-512 Vector Length extensions (x86)
    pub const AVX512VL: Self = TargetSet(1 << 4);

    /// Advanced SIMD (aarch64)
    pub const NEON: Self = TargetSet(1 << 5);

    /// Everything the AVX-512 variant needs
    pub const AVX512: Self = Self::AVX512F
        .union(Self::AVX512BW)
        .union(Self::AVX512DQ)
        .union(Self::AVX512VL);

    const NAMES: [(TargetSet, &'static str); 6] = [
        (Self::AVX2, "avx2"),
        (Self::AVX512F, "avx512f"),
        (Self::AVX512BW, "avx512bw"),
        (Self::AVX512DQ, "avx512dq"),
        (Self::AVX512VL, "avx512vl"),
        (Self::NEON, "neon"),
    ];

    /// True if every extension in `other` is also in `self`
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Extensions in either set
    pub const fn union(self, other: Self) -> Self {
        TargetSet(self.0 | other.0)
    }

    /// Extensions in `self` but not in `other`
    pub const fn difference(self, other: Self) -> Self {
        TargetSet(self.0 & !other.0)
    }

    /// True if no extension is present
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True if every extension in `self` is also in `other`
    pub const fn is_subset(self, other: Self) -> bool {
        other.contains(self)
    }

    /// Names of the extensions in this set, in a fixed order
    pub fn names(self) -> impl Iterator<Item = &'static str> {
        Self::NAMES
            .into_iter()
            .filter(move |(flag, _)| self.contains(*flag))
            .map(|(_, name)| name)
    }
}

impl BitOr for TargetSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl fmt::Display for TargetSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        for (i, name) in self.names().enumerate() {
            if i > 0 {
                f.write_str("+")?;
            }
            f.write_str(name)?;
        }
        Ok(())
    }
}

impl fmt::Debug for TargetSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TargetSet({self})")
    }
}

/// CPU Feature Detection Results
///
/// Represents the SIMD capabilities detected on the current CPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CpuFeatures {
    /// AVX2 support available (x86)
    pub has_avx2: bool,

    /// AVX-512 Foundation (x86)
    pub has_avx512_f: bool,

    /// AVX-512 Byte & Word operations (x86)
    pub has_avx512_bw: bool,

    /// AVX-512 Doubleword & Quadword operations (x86)
    pub has_avx512_dq: bool,

    /// AVX-512 Vector Length extensions (x86)
    pub has_avx512_vl: bool,

    /// NEON (aarch64)
    pub has_neon: bool,
}

impl CpuFeatures {
    /// Detect CPU features at runtime
    ///
    /// # Platform Behavior
    /// - **x86 / x86_64**: CPUID probes through the `cpufeatures` crate, which also
    ///   checks that the OS saves the extended register state (XSAVE)
    /// - **aarch64**: NEON is part of the target baseline, read at compile time
    /// - **other**: nothing detected; only the scalar variant is usable
    ///
    /// Prefer [`detected_targets`], which caches the result for the process.
    pub fn detect() -> Self {
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        {
            cpufeatures::new!(cpuid_avx2, "avx2");
            cpufeatures::new!(cpuid_avx512f, "avx512f");
            cpufeatures::new!(cpuid_avx512bw, "avx512bw");
            cpufeatures::new!(cpuid_avx512dq, "avx512dq");
            cpufeatures::new!(cpuid_avx512vl, "avx512vl");

            Self {
                has_avx2: cpuid_avx2::get(),
                has_avx512_f: cpuid_avx512f::get(),
                has_avx512_bw: cpuid_avx512bw::get(),
                has_avx512_dq: cpuid_avx512dq::get(),
                has_avx512_vl: cpuid_avx512vl::get(),
                has_neon: false,
            }
        }

        #[cfg(target_arch = "aarch64")]
        {
            Self {
                has_neon: cfg!(target_feature = "neon"),
                ..Self::default()
            }
        }

        #[cfg(not(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")))]
        {
            Self::default()
        }
    }

    /// Check if full AVX-512 support is available
    ///
    /// Full AVX-512 requires Foundation + BW + DQ + VL.
    pub fn has_avx512_full(&self) -> bool {
        self.has_avx512_f && self.has_avx512_bw && self.has_avx512_dq && self.has_avx512_vl
    }

    /// The detected features as a [`TargetSet`]
    pub fn targets(&self) -> TargetSet {
        [
            (self.has_avx2, TargetSet::AVX2),
            (self.has_avx512_f, TargetSet::AVX512F),
            (self.has_avx512_bw, TargetSet::AVX512BW),
            (self.has_avx512_dq, TargetSet::AVX512DQ),
            (self.has_avx512_vl, TargetSet::AVX512VL),
            (self.has_neon, TargetSet::NEON),
        ]
        .into_iter()
        .filter(|(present, _)| *present)
        .fold(TargetSet::EMPTY, |set, (_, flag)| set | flag)
    }
}

/// Capabilities of the running CPU, detected on first call and cached
pub fn detected_targets() -> TargetSet {
    static DETECTED: OnceLock<TargetSet> = OnceLock::new();
    *DETECTED.get_or_init(|| CpuFeatures::detect().targets())
}
