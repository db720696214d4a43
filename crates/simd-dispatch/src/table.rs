//! Dispatch Table
//!
//! The compiled-in backend variants, most to least capable, and the resolution rule
//! that picks one of them for the running CPU.
//!
//! # Selection Priority
//! 1. AVX-512 (if `avx512` feature compiled AND CPU supports F + BW + DQ + VL)
//! 2. AVX2 (if `avx2` feature compiled AND CPU supports AVX2)
//! 3. NEON (if `neon` feature compiled on aarch64)
//! 4. Scalar (fallback, always compiled)
//!
//! # Forced Backend Selection (CI testing)
//! With `force-scalar`, `force-avx2`, `force-avx512` or `force-neon`, the order shrinks
//! to the forced variant followed by scalar. The forced variant still has to pass the
//! capability check, so forcing something the CPU lacks runs scalar instead of faulting.

use crate::backend::BackendType;
use crate::features::{detected_targets, TargetSet};

/// Backend forced through a `force-*` cargo feature
pub const FORCED: Option<BackendType> = if cfg!(feature = "force-scalar") {
    Some(BackendType::Scalar)
} else if cfg!(feature = "force-avx512") {
    Some(BackendType::Avx512)
} else if cfg!(feature = "force-avx2") {
    Some(BackendType::Avx2)
} else if cfg!(feature = "force-neon") {
    Some(BackendType::Neon)
} else {
    None
};

const fn in_order(backend: BackendType) -> bool {
    if !backend.is_compiled() {
        return false;
    }
    match FORCED {
        Some(forced) => forced as u8 == backend as u8,
        None => true,
    }
}

const fn order_len() -> usize {
    let mut len = 1;
    let mut i = 0;
    while i < BackendType::ALL.len() - 1 {
        if in_order(BackendType::ALL[i]) {
            len += 1;
        }
        i += 1;
    }
    len
}

const fn build_order() -> [BackendType; order_len()] {
    let mut order = [BackendType::Scalar; order_len()];
    let mut next = 0;
    let mut i = 0;
    // ALL ends with Scalar, which is appended unconditionally
    while i < BackendType::ALL.len() - 1 {
        if in_order(BackendType::ALL[i]) {
            order[next] = BackendType::ALL[i];
            next += 1;
        }
        i += 1;
    }
    order
}

/// Compiled-in backend variants, most to least capable
///
/// The last entry is always the scalar baseline.
pub const DISPATCH_ORDER: [BackendType; order_len()] = build_order();

const _: () = assert!(
    DISPATCH_ORDER[DISPATCH_ORDER.len() - 1]
        .required_targets()
        .is_empty(),
    "dispatch table must end with a baseline variant"
);

/// First variant in [`DISPATCH_ORDER`] whose requirements `detected` satisfies
///
/// Pure and deterministic: the same set always yields the same variant, and an
/// empty set always yields the baseline.
pub fn resolve_with(detected: TargetSet) -> BackendType {
    DISPATCH_ORDER
        .iter()
        .copied()
        .find(|backend| backend.required_targets().is_subset(detected))
        .unwrap_or(BackendType::Scalar)
}

/// Resolve against the capabilities of the running CPU
///
/// Side-effect free; [`active_backend`](crate::active_backend) caches the result and
/// reports a forced-variant fallback once.
pub fn resolve() -> BackendType {
    resolve_with(detected_targets())
}

/// The forced variant, if one was requested and `resolved` is not it
pub(crate) fn forced_fallback(resolved: BackendType) -> Option<BackendType> {
    FORCED.filter(|&forced| forced != resolved)
}
