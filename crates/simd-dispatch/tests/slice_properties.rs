//! Slice-level property tests
//!
//! Runs every primitive through an explicit table for each backend variant the CPU
//! supports, over random lengths so both full vectors and padded tails are covered,
//! and compares bit-for-bit with a scalar reference.

use proptest::prelude::*;
use rigel_simd_dispatch::rigel_simd::Lane;
use rigel_simd_dispatch::{
    supported_backends, DispatchFloat, DispatchLane, DispatchSigned, FloatTable, SelectTable,
    SignTable,
};


#[cfg(test)]
use test_utils::*;

fn check_mask_selection<T: DispatchLane>(mask: &[bool], yes: &[T], no: &[T]) {
    let len = mask.len();
    let expected: Vec<u64> = (0..len)
        .map(|i| {
            let picked = if mask[i] { yes[i] } else { no[i] };
            picked.to_bits()
        })
        .collect();
    let expected_else_zero: Vec<u64> = (0..len)
        .map(|i| if mask[i] { yes[i].to_bits() } else { 0 })
        .collect();
    let expected_zero_else: Vec<u64> = (0..len)
        .map(|i| if mask[i] { 0 } else { no[i].to_bits() })
        .collect();
    let bits: Vec<T> = mask
        .iter()
        .map(|&flag| T::from_bits(if flag { T::ALL_ONES } else { 0 }))
        .collect();

    for backend in supported_backends() {
        let table = SelectTable::<T>::new(backend).unwrap();
        let mut out = vec![T::default(); len];

        table.if_then_else(mask, yes, no, &mut out);
        assert_eq!(bits_of(&out), expected, "{backend} if_then_else");

        table.if_then_else_zero(mask, yes, &mut out);
        assert_eq!(bits_of(&out), expected_else_zero, "{backend} if_then_else_zero");

        table.if_then_zero_else(mask, no, &mut out);
        assert_eq!(bits_of(&out), expected_zero_else, "{backend} if_then_zero_else");

        table.if_vec_then_else(&bits, yes, no, &mut out);
        assert_eq!(bits_of(&out), expected, "{backend} if_vec_then_else");
    }

    let mut out = vec![T::default(); len];
    rigel_simd_dispatch::if_then_else(mask, yes, no, &mut out);
    assert_eq!(bits_of(&out), expected, "active if_then_else");
}

fn check_sign_selection<T: DispatchSigned>(v: &[T], yes: &[T], no: &[T]) {
    let len = v.len();
    let expected: Vec<u64> = (0..len)
        .map(|i| {
            let picked = if ref_is_negative(v[i]) { yes[i] } else { no[i] };
            picked.to_bits()
        })
        .collect();

    for backend in supported_backends() {
        let table = SignTable::<T>::new(backend).unwrap();
        let mut out = vec![T::default(); len];

        table.if_negative_then_else(v, yes, no, &mut out);
        assert_eq!(bits_of(&out), expected, "{backend} if_negative_then_else");

        table.if_negative_then_neg_or_undef_if_zero(v, yes, &mut out);
        for i in (0..len).filter(|&i| !ref_is_zero(v[i])) {
            let want = if ref_is_negative(v[i]) {
                yes[i].wrapping_neg()
            } else {
                yes[i]
            };
            assert_eq!(
                out[i].to_bits(),
                want.to_bits(),
                "{backend} if_negative_then_neg_or_undef_if_zero lane {i}"
            );
        }
    }
}

fn check_zero_if_negative<T: DispatchFloat>(v: &[T]) {
    let expected: Vec<u64> = v
        .iter()
        .map(|&x| if ref_is_negative(x) { 0 } else { x.to_bits() })
        .collect();

    for backend in supported_backends() {
        let table = FloatTable::<T>::new(backend).unwrap();
        let mut out = vec![T::default(); v.len()];
        table.zero_if_negative(v, &mut out);
        assert_eq!(bits_of(&out), expected, "{backend}");
    }

    let mut out = vec![T::default(); v.len()];
    rigel_simd_dispatch::zero_if_negative(v, &mut out);
    assert_eq!(bits_of(&out), expected, "active");
}

macro_rules! mask_properties {
    ($($name:ident: $ty:ty),* $(,)?) => {
        $(
            #[test]
            fn $name() {
                proptest!(proptest_config(), |((mask, yes, no) in masked_operands::<$ty>())| {
                    check_mask_selection(&mask, &yes, &no);
                });
            }
        )*
    };
}

macro_rules! sign_properties {
    ($($name:ident: $ty:ty),* $(,)?) => {
        $(
            #[test]
            fn $name() {
                proptest!(proptest_config(), |((v, yes, no) in operands::<$ty>())| {
                    check_sign_selection(&v, &yes, &no);
                });
            }
        )*
    };
}

mask_properties! {
    test_mask_selection_u8: u8,
    test_mask_selection_u16: u16,
    test_mask_selection_u32: u32,
    test_mask_selection_u64: u64,
    test_mask_selection_i8: i8,
    test_mask_selection_i16: i16,
    test_mask_selection_i32: i32,
    test_mask_selection_i64: i64,
    test_mask_selection_f32: f32,
    test_mask_selection_f64: f64,
}

sign_properties! {
    test_sign_selection_i8: i8,
    test_sign_selection_i16: i16,
    test_sign_selection_i32: i32,
    test_sign_selection_i64: i64,
    test_sign_selection_f32: f32,
    test_sign_selection_f64: f64,
}

#[test]
fn test_zero_if_negative_f32() {
    proptest!(proptest_config(), |((v, _, _) in operands::<f32>())| {
        check_zero_if_negative(&v);
    });
}

#[test]
fn test_zero_if_negative_f64() {
    proptest!(proptest_config(), |((v, _, _) in operands::<f64>())| {
        check_zero_if_negative(&v);
    });
}

#[test]
fn test_sign_copy_examples_every_backend() {
    let v = [-3i32, 5, i32::MIN, i32::MAX, -1, 1, -7];
    let w = [10i32; 7];
    let expected = [-10, 10, -10, 10, -10, 10, -10];

    for backend in supported_backends() {
        let mut out = [0i32; 7];
        SignTable::<i32>::new(backend)
            .unwrap()
            .if_negative_then_neg_or_undef_if_zero(&v, &w, &mut out);
        assert_eq!(out, expected, "{backend}");
    }
}

#[test]
#[should_panic(expected = "same length")]
fn test_length_mismatch_panics() {
    let mut out = [0.0f32; 3];
    rigel_simd_dispatch::if_then_else(&[true, false], &[1.0; 3], &[2.0; 3], &mut out);
}
