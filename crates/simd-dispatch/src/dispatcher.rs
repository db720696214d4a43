//! Runtime Backend Dispatcher
//!
//! Function pointer tables over the backend variants. The active variant is resolved
//! once per process; each element type then builds its tables once, so steady-state
//! calls cost one cache load and one indirect call.
//!
//! Tables come in three kinds because not every primitive exists for every lane type:
//!
//! - [`SelectTable`]: mask and bit-vector selection (all lane types)
//! - [`SignTable`]: sign-driven selection (signed integers and floats)
//! - [`FloatTable`]: `zero_if_negative` (floats)

use core::fmt;
use std::sync::OnceLock;

use rigel_simd::{FloatLane, Lane, SignedLane};
use tracing::{debug, info, warn};

use crate::backend::BackendType;
use crate::error::Result;
use crate::features::detected_targets;
use crate::table::{self, DISPATCH_ORDER};
use crate::variants;

// Type aliases for function pointers to reduce complexity
type MaskSelectFn<T> = unsafe fn(&[bool], &[T], &[T], &mut [T]);
type MaskZeroFn<T> = unsafe fn(&[bool], &[T], &mut [T]);
type TernaryFn<T> = unsafe fn(&[T], &[T], &[T], &mut [T]);
type BinaryFn<T> = unsafe fn(&[T], &[T], &mut [T]);
type UnaryFn<T> = unsafe fn(&[T], &mut [T]);

/// Variant chosen for this process, resolved on first call
///
/// Concurrent first callers all observe the same result; later calls never re-probe
/// the CPU. An unavailable `force-*` variant is reported here, once per process.
pub fn active_backend() -> BackendType {
    static ACTIVE: OnceLock<BackendType> = OnceLock::new();
    *ACTIVE.get_or_init(|| {
        let backend = table::resolve();
        if let Some(forced) = table::forced_fallback(backend) {
            warn!(
                forced = %forced,
                backend = %backend,
                detected = %detected_targets(),
                "forced SIMD backend unavailable, falling back"
            );
        }
        info!(
            backend = %backend,
            detected = %detected_targets(),
            compiled = ?DISPATCH_ORDER,
            "resolved SIMD backend"
        );
        backend
    })
}

/// Build a table struct from the variant module `$variant`, falling back to scalar
macro_rules! table_for_backend {
    ($backend:expr, $build:ident) => {
        match $backend {
            #[cfg(all(feature = "avx2", any(target_arch = "x86", target_arch = "x86_64")))]
            BackendType::Avx2 => $build!(BackendType::Avx2, avx2),

            #[cfg(all(feature = "avx512", any(target_arch = "x86", target_arch = "x86_64")))]
            BackendType::Avx512 => $build!(BackendType::Avx512, avx512),

            #[cfg(all(feature = "neon", target_arch = "aarch64"))]
            BackendType::Neon => $build!(BackendType::Neon, neon),

            // Callers check `is_compiled` first
            #[allow(unreachable_patterns)]
            _ => $build!(BackendType::Scalar, scalar),
        }
    };
}

// ============================================================================
// Mask / bit-vector selection
// ============================================================================

/// Selection entry points of one variant for lane type `T`
#[derive(Clone, Copy)]
pub struct SelectTable<T: Lane> {
    backend: BackendType,
    lanes: usize,
    if_then_else_fn: MaskSelectFn<T>,
    if_then_else_zero_fn: MaskZeroFn<T>,
    if_then_zero_else_fn: MaskZeroFn<T>,
    if_vec_then_else_fn: TernaryFn<T>,
}

macro_rules! select_table {
    ($backend:expr, $variant:ident) => {
        SelectTable {
            backend: $backend,
            lanes: variants::$variant::lanes::<T>(),
            if_then_else_fn: variants::$variant::if_then_else::<T>,
            if_then_else_zero_fn: variants::$variant::if_then_else_zero::<T>,
            if_then_zero_else_fn: variants::$variant::if_then_zero_else::<T>,
            if_vec_then_else_fn: variants::$variant::if_vec_then_else::<T>,
        }
    };
}

impl<T: Lane> SelectTable<T> {
    /// Table for a specific variant
    ///
    /// Fails if the variant is not compiled in or the CPU lacks its features.
    pub fn new(backend: BackendType) -> Result<Self> {
        backend.ensure_supported()?;
        Ok(Self::for_backend(backend))
    }

    fn for_backend(backend: BackendType) -> Self {
        table_for_backend!(backend, select_table)
    }

    /// Backend these entry points belong to
    pub fn backend(&self) -> BackendType {
        self.backend
    }

    /// Lanes per vector for `T` on this backend
    pub fn lanes(&self) -> usize {
        self.lanes
    }

    /// `out[i] = mask[i] ? yes[i] : no[i]`
    ///
    /// # Panics
    /// Panics if the slices differ in length.
    pub fn if_then_else(&self, mask: &[bool], yes: &[T], no: &[T], out: &mut [T]) {
        // SAFETY: tables are only built for variants that passed the capability check
        unsafe { (self.if_then_else_fn)(mask, yes, no, out) }
    }

    /// `out[i] = mask[i] ? yes[i] : 0`
    pub fn if_then_else_zero(&self, mask: &[bool], yes: &[T], out: &mut [T]) {
        // SAFETY: see `if_then_else`
        unsafe { (self.if_then_else_zero_fn)(mask, yes, out) }
    }

    /// `out[i] = mask[i] ? 0 : no[i]`
    pub fn if_then_zero_else(&self, mask: &[bool], no: &[T], out: &mut [T]) {
        // SAFETY: see `if_then_else`
        unsafe { (self.if_then_zero_else_fn)(mask, no, out) }
    }

    /// `out[i] = bits[i] ? yes[i] : no[i]`
    ///
    /// Each `bits` lane must be all-ones or all-zeros; other patterns give
    /// unspecified lanes.
    pub fn if_vec_then_else(&self, bits: &[T], yes: &[T], no: &[T], out: &mut [T]) {
        // SAFETY: see `if_then_else`
        unsafe { (self.if_vec_then_else_fn)(bits, yes, no, out) }
    }
}

impl<T: DispatchLane> SelectTable<T> {
    /// Cached table of the active variant
    pub fn active() -> &'static Self {
        T::select_cache().get_or_init(|| {
            let table = Self::for_backend(active_backend());
            debug!(
                backend = %table.backend,
                lane = core::any::type_name::<T>(),
                "built select table"
            );
            table
        })
    }
}

impl<T: Lane> fmt::Debug for SelectTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectTable")
            .field("backend", &self.backend)
            .field("lanes", &self.lanes)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Sign-driven selection
// ============================================================================

/// Sign-driven entry points of one variant for signed lane type `T`
#[derive(Clone, Copy)]
pub struct SignTable<T: SignedLane> {
    backend: BackendType,
    if_negative_then_else_fn: TernaryFn<T>,
    if_negative_then_neg_or_undef_if_zero_fn: BinaryFn<T>,
}

macro_rules! sign_table {
    ($backend:expr, $variant:ident) => {
        SignTable {
            backend: $backend,
            if_negative_then_else_fn: variants::$variant::if_negative_then_else::<T>,
            if_negative_then_neg_or_undef_if_zero_fn:
                variants::$variant::if_negative_then_neg_or_undef_if_zero::<T>,
        }
    };
}

impl<T: SignedLane> SignTable<T> {
    /// Table for a specific variant
    pub fn new(backend: BackendType) -> Result<Self> {
        backend.ensure_supported()?;
        Ok(Self::for_backend(backend))
    }

    fn for_backend(backend: BackendType) -> Self {
        table_for_backend!(backend, sign_table)
    }

    /// Backend these entry points belong to
    pub fn backend(&self) -> BackendType {
        self.backend
    }

    /// `out[i] = sign_bit(v[i]) ? yes[i] : no[i]`
    pub fn if_negative_then_else(&self, v: &[T], yes: &[T], no: &[T], out: &mut [T]) {
        // SAFETY: tables are only built for variants that passed the capability check
        unsafe { (self.if_negative_then_else_fn)(v, yes, no, out) }
    }

    /// `out[i] = -w[i]` where `v[i] < 0`, `w[i]` where `v[i] > 0`
    ///
    /// Lanes where `v[i]` is zero depend on the backend.
    pub fn if_negative_then_neg_or_undef_if_zero(&self, v: &[T], w: &[T], out: &mut [T]) {
        // SAFETY: see `if_negative_then_else`
        unsafe { (self.if_negative_then_neg_or_undef_if_zero_fn)(v, w, out) }
    }
}

impl<T: DispatchSigned> SignTable<T> {
    /// Cached table of the active variant
    pub fn active() -> &'static Self {
        T::sign_cache().get_or_init(|| {
            let table = Self::for_backend(active_backend());
            debug!(
                backend = %table.backend,
                lane = core::any::type_name::<T>(),
                "built sign table"
            );
            table
        })
    }
}

impl<T: SignedLane> fmt::Debug for SignTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignTable")
            .field("backend", &self.backend)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Float-only selection
// ============================================================================

/// Float-only entry points of one variant for float lane type `T`
#[derive(Clone, Copy)]
pub struct FloatTable<T: FloatLane> {
    backend: BackendType,
    zero_if_negative_fn: UnaryFn<T>,
}

macro_rules! float_table {
    ($backend:expr, $variant:ident) => {
        FloatTable {
            backend: $backend,
            zero_if_negative_fn: variants::$variant::zero_if_negative::<T>,
        }
    };
}

impl<T: FloatLane> FloatTable<T> {
    /// Table for a specific variant
    pub fn new(backend: BackendType) -> Result<Self> {
        backend.ensure_supported()?;
        Ok(Self::for_backend(backend))
    }

    fn for_backend(backend: BackendType) -> Self {
        table_for_backend!(backend, float_table)
    }

    /// Backend these entry points belong to
    pub fn backend(&self) -> BackendType {
        self.backend
    }

    /// `out[i] = sign_bit(v[i]) ? +0.0 : v[i]`
    pub fn zero_if_negative(&self, v: &[T], out: &mut [T]) {
        // SAFETY: tables are only built for variants that passed the capability check
        unsafe { (self.zero_if_negative_fn)(v, out) }
    }
}

impl<T: DispatchFloat> FloatTable<T> {
    /// Cached table of the active variant
    pub fn active() -> &'static Self {
        T::float_cache().get_or_init(|| {
            let table = Self::for_backend(active_backend());
            debug!(
                backend = %table.backend,
                lane = core::any::type_name::<T>(),
                "built float table"
            );
            table
        })
    }
}

impl<T: FloatLane> fmt::Debug for FloatTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FloatTable")
            .field("backend", &self.backend)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Per-type caches
// ============================================================================

/// Lane types with a process-wide [`SelectTable`] cache
pub trait DispatchLane: Lane {
    /// Cache slot for the active select table
    fn select_cache() -> &'static OnceLock<SelectTable<Self>>;
}

/// Signed lane types with a process-wide [`SignTable`] cache
pub trait DispatchSigned: DispatchLane + SignedLane {
    /// Cache slot for the active sign table
    fn sign_cache() -> &'static OnceLock<SignTable<Self>>;
}

/// Float lane types with a process-wide [`FloatTable`] cache
pub trait DispatchFloat: DispatchSigned + FloatLane {
    /// Cache slot for the active float table
    fn float_cache() -> &'static OnceLock<FloatTable<Self>>;
}

macro_rules! impl_dispatch_lane {
    ($($ty:ty),*) => {
        $(
            impl DispatchLane for $ty {
                fn select_cache() -> &'static OnceLock<SelectTable<Self>> {
                    static CACHE: OnceLock<SelectTable<$ty>> = OnceLock::new();
                    &CACHE
                }
            }
        )*
    };
}

macro_rules! impl_dispatch_signed {
    ($($ty:ty),*) => {
        $(
            impl DispatchSigned for $ty {
                fn sign_cache() -> &'static OnceLock<SignTable<Self>> {
                    static CACHE: OnceLock<SignTable<$ty>> = OnceLock::new();
                    &CACHE
                }
            }
        )*
    };
}

macro_rules! impl_dispatch_float {
    ($($ty:ty),*) => {
        $(
            impl DispatchFloat for $ty {
                fn float_cache() -> &'static OnceLock<FloatTable<Self>> {
                    static CACHE: OnceLock<FloatTable<$ty>> = OnceLock::new();
                    &CACHE
                }
            }
        )*
    };
}

impl_dispatch_lane!(u8, u16, u32, u64, i8, i16, i32, i64, f32, f64);
impl_dispatch_signed!(i8, i16, i32, i64, f32, f64);
impl_dispatch_float!(f32, f64);

// ============================================================================
// Slice-level API
// ============================================================================

/// `out[i] = mask[i] ? yes[i] : no[i]` on the active backend
///
/// # Panics
/// Panics if the slices differ in length.
///
/// # Example
/// ```rust
/// let mask = [true, false, true];
/// let mut out = [0i32; 3];
/// rigel_simd_dispatch::if_then_else(&mask, &[1, 2, 3], &[-1, -2, -3], &mut out);
/// assert_eq!(out, [1, -2, 3]);
/// ```
pub fn if_then_else<T: DispatchLane>(mask: &[bool], yes: &[T], no: &[T], out: &mut [T]) {
    SelectTable::<T>::active().if_then_else(mask, yes, no, out)
}

/// `out[i] = mask[i] ? yes[i] : 0` on the active backend
pub fn if_then_else_zero<T: DispatchLane>(mask: &[bool], yes: &[T], out: &mut [T]) {
    SelectTable::<T>::active().if_then_else_zero(mask, yes, out)
}

/// `out[i] = mask[i] ? 0 : no[i]` on the active backend
pub fn if_then_zero_else<T: DispatchLane>(mask: &[bool], no: &[T], out: &mut [T]) {
    SelectTable::<T>::active().if_then_zero_else(mask, no, out)
}

/// `out[i] = bits[i] ? yes[i] : no[i]` for all-ones / all-zeros `bits` lanes
pub fn if_vec_then_else<T: DispatchLane>(bits: &[T], yes: &[T], no: &[T], out: &mut [T]) {
    SelectTable::<T>::active().if_vec_then_else(bits, yes, no, out)
}

/// Replace lanes whose sign bit is set with `+0.0`
///
/// # Example
/// ```rust
/// let mut out = [9.0f32; 3];
/// rigel_simd_dispatch::zero_if_negative(&[-1.0, -0.0, 1.0], &mut out);
/// assert_eq!(out.map(f32::to_bits), [0, 0, 1.0f32.to_bits()]);
/// ```
pub fn zero_if_negative<T: DispatchFloat>(v: &[T], out: &mut [T]) {
    FloatTable::<T>::active().zero_if_negative(v, out)
}

/// `out[i] = sign_bit(v[i]) ? yes[i] : no[i]` on the active backend
pub fn if_negative_then_else<T: DispatchSigned>(v: &[T], yes: &[T], no: &[T], out: &mut [T]) {
    SignTable::<T>::active().if_negative_then_else(v, yes, no, out)
}

/// `out[i] = -w[i]` where `v[i] < 0`, `w[i]` where `v[i] > 0`
///
/// Lanes where `v[i]` is zero are backend-dependent; do not rely on them.
pub fn if_negative_then_neg_or_undef_if_zero<T: DispatchSigned>(v: &[T], w: &[T], out: &mut [T]) {
    SignTable::<T>::active().if_negative_then_neg_or_undef_if_zero(v, w, out)
}

/// Lanes per vector for `T` on the active backend
pub fn lanes<T: DispatchLane>() -> usize {
    SelectTable::<T>::active().lanes()
}

/// Resolve the backend and build every table up front
///
/// Call during startup to keep first-use resolution out of hot paths.
pub fn warmup() -> BackendType {
    macro_rules! touch {
        ($table:ident: $($ty:ty),*) => {
            $( $table::<$ty>::active(); )*
        };
    }

    let backend = active_backend();
    touch!(SelectTable: u8, u16, u32, u64, i8, i16, i32, i64, f32, f64);
    touch!(SignTable: i8, i16, i32, i64, f32, f64);
    touch!(FloatTable: f32, f64);
    backend
}

/// Every variant compiled into this build, most to least capable
pub fn compiled_backends() -> Vec<BackendType> {
    BackendType::ALL
        .into_iter()
        .filter(|backend| backend.is_compiled())
        .collect()
}

/// Compiled variants the current CPU can run, most to least capable
pub fn supported_backends() -> Vec<BackendType> {
    BackendType::ALL
        .into_iter()
        .filter(|backend| backend.is_supported())
        .collect()
}
