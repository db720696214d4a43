//! Generic slice kernels
//!
//! Bridges the slice-level API to the vector-level selection primitives. Each kernel
//! is generic over the vector type and is instantiated once per backend variant, inside
//! a function compiled for that variant's target features.
//!
//! Full `LANES` chunks load straight from the input slices. The remainder is staged in
//! a zero-padded `MAX_LANES` buffer and run through the same backend, so every lane of
//! a call sees one backend's semantics.

use rigel_simd::ops::select;
use rigel_simd::{FloatLane, Lane, SignedLane, SimdVector, MAX_LANES};

/// A run of lanes processed as one vector
#[derive(Debug, Clone, Copy)]
struct Window {
    start: usize,
    len: usize,
}

impl Window {
    #[inline(always)]
    fn range(self) -> core::ops::Range<usize> {
        self.start..self.start + self.len
    }
}

#[inline(always)]
fn load<V: SimdVector>(src: &[V::Scalar], window: Window) -> V {
    let src = &src[window.range()];
    if window.len == V::LANES {
        return V::from_slice(src);
    }
    let mut staged = [V::Scalar::from_bits(0); MAX_LANES];
    staged[..window.len].copy_from_slice(src);
    V::from_slice(&staged)
}

/// Scratch lanes for building masks, allocated once per call
type MaskScratch<T> = [T; MAX_LANES];

/// Native mask from `bool` lanes (true lanes become all-ones before conversion)
///
/// Only the first `V::LANES` scratch lanes are written; lanes past the end of a
/// partial window are cleared.
#[inline(always)]
fn load_mask<V: SimdVector>(
    flags: &[bool],
    window: Window,
    scratch: &mut MaskScratch<V::Scalar>,
) -> V::Mask {
    let flags = &flags[window.range()];
    let lanes = &mut scratch[..V::LANES];
    for (i, lane) in lanes.iter_mut().enumerate() {
        let set = i < flags.len() && flags[i];
        *lane = V::Scalar::from_bits(if set { V::Scalar::ALL_ONES } else { 0 });
    }
    V::from_slice(lanes).mask_from_vec()
}

#[inline(always)]
fn mask_scratch<T: Lane>() -> MaskScratch<T> {
    [T::from_bits(0); MAX_LANES]
}

#[inline(always)]
fn store<V: SimdVector>(value: V, out: &mut [V::Scalar], window: Window) {
    if window.len == V::LANES {
        value.to_slice(&mut out[window.range()]);
        return;
    }
    let mut staged = [V::Scalar::from_bits(0); MAX_LANES];
    value.to_slice(&mut staged);
    out[window.range()].copy_from_slice(&staged[..window.len]);
}

/// Run `kernel` over `out` one window at a time
#[inline(always)]
fn for_each_window<V: SimdVector>(out: &mut [V::Scalar], mut kernel: impl FnMut(Window) -> V) {
    let len = out.len();
    let mut start = 0;
    while start < len {
        let window = Window {
            start,
            len: V::LANES.min(len - start),
        };
        store(kernel(window), out, window);
        start += V::LANES;
    }
}

#[inline(always)]
fn assert_same_len(out: usize, inputs: &[usize]) {
    for &len in inputs {
        assert_eq!(
            len, out,
            "Input and output slices must have the same length"
        );
    }
}

/// `out[i] = mask[i] ? yes[i] : no[i]`
#[inline(always)]
pub fn if_then_else<V: SimdVector>(
    mask: &[bool],
    yes: &[V::Scalar],
    no: &[V::Scalar],
    out: &mut [V::Scalar],
) {
    assert_same_len(out.len(), &[mask.len(), yes.len(), no.len()]);
    let mut scratch = mask_scratch();
    for_each_window(out, |w| {
        let m = load_mask::<V>(mask, w, &mut scratch);
        select::if_then_else::<V>(m, load(yes, w), load(no, w))
    });
}

/// `out[i] = mask[i] ? yes[i] : 0`
#[inline(always)]
pub fn if_then_else_zero<V: SimdVector>(mask: &[bool], yes: &[V::Scalar], out: &mut [V::Scalar]) {
    assert_same_len(out.len(), &[mask.len(), yes.len()]);
    let mut scratch = mask_scratch();
    for_each_window(out, |w| {
        select::if_then_else_zero::<V>(load_mask::<V>(mask, w, &mut scratch), load(yes, w))
    });
}

/// `out[i] = mask[i] ? 0 : no[i]`
#[inline(always)]
pub fn if_then_zero_else<V: SimdVector>(mask: &[bool], no: &[V::Scalar], out: &mut [V::Scalar]) {
    assert_same_len(out.len(), &[mask.len(), no.len()]);
    let mut scratch = mask_scratch();
    for_each_window(out, |w| {
        select::if_then_zero_else::<V>(load_mask::<V>(mask, w, &mut scratch), load(no, w))
    });
}

/// `out[i] = bits[i] ? yes[i] : no[i]` for all-ones / all-zeros `bits` lanes
#[inline(always)]
pub fn if_vec_then_else<V: SimdVector>(
    bits: &[V::Scalar],
    yes: &[V::Scalar],
    no: &[V::Scalar],
    out: &mut [V::Scalar],
) {
    assert_same_len(out.len(), &[bits.len(), yes.len(), no.len()]);
    for_each_window(out, |w| {
        select::if_vec_then_else::<V>(load(bits, w), load(yes, w), load(no, w))
    });
}

/// `out[i] = sign_bit(v[i]) ? +0.0 : v[i]`
#[inline(always)]
pub fn zero_if_negative<V>(v: &[V::Scalar], out: &mut [V::Scalar])
where
    V: SimdVector,
    V::Scalar: FloatLane,
{
    assert_same_len(out.len(), &[v.len()]);
    for_each_window(out, |w| select::zero_if_negative::<V>(load(v, w)));
}

/// `out[i] = sign_bit(v[i]) ? yes[i] : no[i]`
#[inline(always)]
pub fn if_negative_then_else<V>(
    v: &[V::Scalar],
    yes: &[V::Scalar],
    no: &[V::Scalar],
    out: &mut [V::Scalar],
) where
    V: SimdVector,
    V::Scalar: SignedLane,
{
    assert_same_len(out.len(), &[v.len(), yes.len(), no.len()]);
    for_each_window(out, |w| {
        select::if_negative_then_else::<V>(load(v, w), load(yes, w), load(no, w))
    });
}

/// `out[i] = v[i] < 0 ? -w[i] : w[i]`, backend-dependent where `v[i]` is zero
#[inline(always)]
pub fn if_negative_then_neg_or_undef_if_zero<V>(
    v: &[V::Scalar],
    w: &[V::Scalar],
    out: &mut [V::Scalar],
) where
    V: SimdVector,
    V::Scalar: SignedLane,
{
    assert_same_len(out.len(), &[v.len(), w.len()]);
    for_each_window(out, |win| {
        select::if_negative_then_neg_or_undef_if_zero::<V>(load(v, win), load(w, win))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use rigel_simd::ScalarVector;

    #[test]
    fn test_tail_goes_through_padded_buffer() {
        let mask = [true, false, true];
        let yes = [1i32, 2, 3];
        let no = [-1i32, -2, -3];
        let mut out = [0i32; 3];
        if_then_else::<ScalarVector<i32>>(&mask, &yes, &no, &mut out);
        assert_eq!(out, [1, -2, 3]);
    }

    #[test]
    fn test_mask_scratch_reused_across_windows() {
        // Every window overwrites the lanes a previous true window set
        let mask = [true, true, false, false, true, false];
        let mut out = [0u16; 6];
        if_then_zero_else::<ScalarVector<u16>>(&mask, &[7; 6], &mut out);
        assert_eq!(out, [0, 0, 7, 7, 0, 7]);
    }

    #[test]
    fn test_load_mask_writes_only_vector_lanes() {
        let mut scratch = [u8::MAX; MAX_LANES];
        let window = Window { start: 2, len: 1 };
        let mask = load_mask::<ScalarVector<u8>>(&[true, true, false], window, &mut scratch);
        assert!(!mask.0);
        assert_eq!(scratch[0], 0);
        assert_eq!(scratch[1], u8::MAX, "lanes past LANES are untouched");
    }

    #[test]
    fn test_empty_slices() {
        let mut out: [f32; 0] = [];
        zero_if_negative::<ScalarVector<f32>>(&[], &mut out);
    }

    #[test]
    #[should_panic(expected = "same length")]
    fn test_length_mismatch_panics() {
        let mut out = [0u8; 4];
        if_then_else_zero::<ScalarVector<u8>>(&[true; 3], &[1; 4], &mut out);
    }
}
