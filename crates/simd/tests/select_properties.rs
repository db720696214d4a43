//! Property-based tests for the selection primitives
//!
//! Every property runs on each backend the current CPU supports and is checked
//! bit-for-bit against a plain scalar reference, so backends also agree with each
//! other.

use proptest::prelude::*;
use rigel_simd::ops::{
    bitwise_if_then_else, broadcast_sign_bit, if_negative_then_else,
    if_negative_then_neg_or_undef_if_zero, if_then_else, if_then_else_zero,
    if_then_zero_else, if_vec_then_else, zero_if_negative,
};
use rigel_simd::{FloatLane, Lane, SignedLane, SimdVector};


#[cfg(test)]
use test_utils::*;

// ============================================================================
// Kernels
// ============================================================================

#[derive(Debug, Clone, Copy)]
enum MaskOp {
    ThenElse,
    ThenElseZero,
    ThenZeroElse,
}

/// Mask-driven selection; the mask comes from `sel > 0`
struct MaskSelect<'a, T> {
    op: MaskOp,
    sel: &'a [T],
    yes: &'a [T],
    no: &'a [T],
}

impl<T: Lane> Kernel<T> for MaskSelect<'_, T> {
    #[inline(always)]
    fn chunk<V: SimdVector<Scalar = T>>(&self, start: usize) -> V {
        let mask = load::<V>(self.sel, start).gt(V::zero());
        let yes = load::<V>(self.yes, start);
        let no = load::<V>(self.no, start);
        match self.op {
            MaskOp::ThenElse => if_then_else(mask, yes, no),
            MaskOp::ThenElseZero => if_then_else_zero(mask, yes),
            MaskOp::ThenZeroElse => if_then_zero_else(mask, no),
        }
    }
}

/// Selection by an all-ones / all-zeros lane vector
struct VecSelect<'a, T> {
    bits: &'a [T],
    yes: &'a [T],
    no: &'a [T],
}

impl<T: Lane> Kernel<T> for VecSelect<'_, T> {
    #[inline(always)]
    fn chunk<V: SimdVector<Scalar = T>>(&self, start: usize) -> V {
        if_vec_then_else(
            load::<V>(self.bits, start),
            load(self.yes, start),
            load(self.no, start),
        )
    }
}

struct ZeroIfNegative<'a, T> {
    v: &'a [T],
}

impl<T: FloatLane> Kernel<T> for ZeroIfNegative<'_, T> {
    #[inline(always)]
    fn chunk<V: SimdVector<Scalar = T>>(&self, start: usize) -> V {
        zero_if_negative(load::<V>(self.v, start))
    }
}

/// `if_negative_then_else`, or its bitwise definition when `bitwise` is set
///
/// With `flip_sign` the selector's sign bit is toggled via XOR before use.
struct IfNegative<'a, T> {
    bitwise: bool,
    flip_sign: bool,
    v: &'a [T],
    yes: &'a [T],
    no: &'a [T],
}

impl<T: SignedLane> Kernel<T> for IfNegative<'_, T> {
    #[inline(always)]
    fn chunk<V: SimdVector<Scalar = T>>(&self, start: usize) -> V {
        let mut v = load::<V>(self.v, start);
        if self.flip_sign {
            v = v.xor(V::sign_bit());
        }
        let yes = load::<V>(self.yes, start);
        let no = load::<V>(self.no, start);
        if self.bitwise {
            bitwise_if_then_else(broadcast_sign_bit(v), yes, no)
        } else {
            if_negative_then_else(v, yes, no)
        }
    }
}

struct NegOrUndefIfZero<'a, T> {
    v: &'a [T],
    w: &'a [T],
}

impl<T: SignedLane> Kernel<T> for NegOrUndefIfZero<'_, T> {
    #[inline(always)]
    fn chunk<V: SimdVector<Scalar = T>>(&self, start: usize) -> V {
        if_negative_then_neg_or_undef_if_zero(load::<V>(self.v, start), load(self.w, start))
    }
}

// ============================================================================
// Checks
// ============================================================================

fn check_mask_select<T: Lane>(sel: &[T], yes: &[T], no: &[T]) {
    for op in [MaskOp::ThenElse, MaskOp::ThenElseZero, MaskOp::ThenZeroElse] {
        let expected: Vec<u64> = (0..CASE_LANES)
            .map(|i| {
                let (y, n) = match op {
                    MaskOp::ThenElse => (yes[i], no[i]),
                    MaskOp::ThenElseZero => (yes[i], T::default()),
                    MaskOp::ThenZeroElse => (T::default(), no[i]),
                };
                let picked = if sel[i] > T::default() { y } else { n };
                picked.to_bits()
            })
            .collect();

        let kernel = MaskSelect { op, sel, yes, no };
        for (backend, out) in run_all_backends(&kernel, CASE_LANES) {
            assert_eq!(bits_of(&out), expected, "{backend} {op:?}");
        }
    }
}

fn check_vec_select<T: Lane>(flags: &[bool], yes: &[T], no: &[T]) {
    let bits: Vec<T> = flags
        .iter()
        .map(|&flag| if flag { all_ones() } else { T::from_bits(0) })
        .collect();
    let expected: Vec<u64> = (0..CASE_LANES)
        .map(|i| {
            let picked = if flags[i] { yes[i] } else { no[i] };
            picked.to_bits()
        })
        .collect();

    let kernel = VecSelect {
        bits: &bits,
        yes,
        no,
    };
    for (backend, out) in run_all_backends(&kernel, CASE_LANES) {
        assert_eq!(bits_of(&out), expected, "{backend}");
    }
}

fn check_zero_if_negative<T: FloatLane>(v: &[T]) {
    let expected: Vec<u64> = v
        .iter()
        .map(|&x| if ref_is_negative(x) { 0 } else { x.to_bits() })
        .collect();

    for (backend, out) in run_all_backends(&ZeroIfNegative { v }, CASE_LANES) {
        assert_eq!(bits_of(&out), expected, "{backend}");
    }
}

fn check_if_negative_then_else<T: SignedLane>(v: &[T], yes: &[T], no: &[T]) {
    for flip_sign in [false, true] {
        let expected: Vec<u64> = (0..CASE_LANES)
            .map(|i| {
                let negative = ref_is_negative(v[i]) != flip_sign;
                let picked = if negative { yes[i] } else { no[i] };
                picked.to_bits()
            })
            .collect();

        for bitwise in [false, true] {
            let kernel = IfNegative {
                bitwise,
                flip_sign,
                v,
                yes,
                no,
            };
            for (backend, out) in run_all_backends(&kernel, CASE_LANES) {
                assert_eq!(
                    bits_of(&out),
                    expected,
                    "{backend} bitwise={bitwise} flip_sign={flip_sign}"
                );
            }
        }
    }
}

fn check_neg_or_undef_if_zero<T: SignedLane>(v: &[T], w: &[T]) {
    for (backend, out) in run_all_backends(&NegOrUndefIfZero { v, w }, CASE_LANES) {
        for i in 0..CASE_LANES {
            // Zero selectors are backend-dependent
            if ref_is_zero(v[i]) {
                continue;
            }
            let expected = if ref_is_negative(v[i]) {
                w[i].wrapping_neg()
            } else {
                w[i]
            };
            assert_eq!(
                out[i].to_bits(),
                expected.to_bits(),
                "{backend} lane {i}: v={:?} w={:?}",
                v[i],
                w[i]
            );
        }
    }
}

/// `pattern` repeated to fill a case
fn cycle<T: Lane>(pattern: &[T]) -> Vec<T> {
    pattern.iter().copied().cycle().take(CASE_LANES).collect()
}

// ============================================================================
// Properties
// ============================================================================

macro_rules! select_properties {
    ($($module:ident: $ty:ty),* $(,)?) => {
        $(
            mod $module {
                use super::*;

                #[test]
                fn test_if_then_else_matches_reference() {
                    proptest!(proptest_config(), |(
                        sel in lane_values::<$ty>(),
                        yes in lane_values::<$ty>(),
                        no in lane_values::<$ty>()
                    )| {
                        check_mask_select(&sel, &yes, &no);
                    });
                }

                #[test]
                fn test_if_vec_then_else_matches_reference() {
                    proptest!(proptest_config(), |(
                        flags in lane_flags(),
                        yes in lane_values::<$ty>(),
                        no in lane_values::<$ty>()
                    )| {
                        check_vec_select(&flags, &yes, &no);
                    });
                }
            }
        )*
    };
}

macro_rules! sign_properties {
    ($($module:ident: $ty:ty),* $(,)?) => {
        $(
            mod $module {
                use super::*;

                #[test]
                fn test_if_negative_then_else_is_bitwise_select_of_sign() {
                    proptest!(proptest_config(), |(
                        v in lane_values::<$ty>(),
                        yes in lane_values::<$ty>(),
                        no in lane_values::<$ty>()
                    )| {
                        check_if_negative_then_else(&v, &yes, &no);
                    });
                }

                #[test]
                fn test_neg_or_undef_if_zero_nonzero_lanes() {
                    proptest!(proptest_config(), |(
                        v in lane_values::<$ty>(),
                        w in lane_values::<$ty>()
                    )| {
                        check_neg_or_undef_if_zero(&v, &w);
                    });
                }

                #[test]
                fn test_neg_or_undef_if_zero_example() {
                    let v = cycle(&[-3 as $ty, 5 as $ty]);
                    let w = cycle(&[10 as $ty, 10 as $ty]);
                    for (backend, out) in run_all_backends(&NegOrUndefIfZero { v: &v, w: &w }, CASE_LANES) {
                        for pair in out.chunks(2) {
                            assert_eq!(pair, &[-10 as $ty, 10 as $ty], "{backend}");
                        }
                    }
                }
            }
        )*
    };
}

select_properties! {
    select_u8: u8,
    select_u16: u16,
    select_u32: u32,
    select_u64: u64,
    select_i8: i8,
    select_i16: i16,
    select_i32: i32,
    select_i64: i64,
    select_f32: f32,
    select_f64: f64,
}

sign_properties! {
    sign_i8: i8,
    sign_i16: i16,
    sign_i32: i32,
    sign_i64: i64,
    sign_f32: f32,
    sign_f64: f64,
}

#[test]
fn test_i8_mask_uses_signed_compare() {
    // -1 and MIN would compare above zero if treated as unsigned
    let sel = cycle(&[-1i8, 1, i8::MIN, i8::MAX, 0]);
    let yes = cycle(&[10i8]);
    let no = cycle(&[-20i8]);
    let expected = cycle(&[-20i8, 10, -20, 10, -20]);

    let kernel = MaskSelect {
        op: MaskOp::ThenElse,
        sel: &sel,
        yes: &yes,
        no: &no,
    };
    for (backend, out) in run_all_backends(&kernel, CASE_LANES) {
        assert_eq!(out, expected, "{backend}");
    }
}

#[test]
fn test_zero_if_negative_f32() {
    proptest!(proptest_config(), |(v in lane_values::<f32>())| {
        check_zero_if_negative(&v);
    });
}

#[test]
fn test_zero_if_negative_f64() {
    proptest!(proptest_config(), |(v in lane_values::<f64>())| {
        check_zero_if_negative(&v);
    });
}

#[test]
fn test_zero_if_negative_example() {
    let v = cycle(&[-1.0f32, -0.0, 1.0]);
    let expected = cycle(&[0.0f32, 0.0, 1.0]);

    for (backend, out) in run_all_backends(&ZeroIfNegative { v: &v }, CASE_LANES) {
        // +0.0, not -0.0
        assert_eq!(bits_of(&out), bits_of(&expected), "{backend}");
    }
}

#[test]
fn test_if_negative_then_else_forced_sign() {
    // Positive values made negative only through the XOR'd sign bit
    let v = cycle(&[1.0f64, 2.5, 0.0, f64::NAN]);
    let yes = cycle(&[7.0f64]);
    let no = cycle(&[9.0f64]);

    let kernel = IfNegative {
        bitwise: false,
        flip_sign: true,
        v: &v,
        yes: &yes,
        no: &no,
    };
    for (backend, out) in run_all_backends(&kernel, CASE_LANES) {
        assert!(out.iter().all(|&lane| lane == 7.0), "{backend}");
    }
}

#[test]
fn test_neg_or_undef_if_zero_extreme_selectors() {
    let v = cycle(&[i32::MIN, i32::MAX]);
    let w = cycle(&[10i32, 10]);

    for (backend, out) in run_all_backends(&NegOrUndefIfZero { v: &v, w: &w }, CASE_LANES) {
        for pair in out.chunks(2) {
            assert_eq!(pair, &[-10, 10], "{backend}");
        }
    }
}

#[test]
fn test_neg_or_undef_if_zero_wraps_min() {
    let v = cycle(&[-1i8]);
    let w = cycle(&[i8::MIN]);

    for (backend, out) in run_all_backends(&NegOrUndefIfZero { v: &v, w: &w }, CASE_LANES) {
        assert!(out.iter().all(|&lane| lane == i8::MIN), "{backend}");
    }
}
