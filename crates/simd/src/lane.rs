//! Lane element types
//!
//! A lane holds one scalar of a fixed bit width. Every backend stores lanes as raw
//! bit patterns, so the only thing the vector types need from an element type is its
//! width, its kind, and a lossless round trip through `u64`.

use core::fmt::Debug;

mod sealed {
    pub trait Sealed {}
}

/// Numeric category of a lane type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaneKind {
    /// Unsigned integer (u8, u16, u32, u64)
    Unsigned,
    /// Two's complement signed integer (i8, i16, i32, i64)
    Signed,
    /// IEEE 754 binary float (f32, f64)
    Float,
}

/// Width of a lane in bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaneWidth {
    /// 8-bit lanes
    W8,
    /// 16-bit lanes
    W16,
    /// 32-bit lanes
    W32,
    /// 64-bit lanes
    W64,
}

impl LaneWidth {
    /// Width in bits
    pub const fn bits(self) -> u32 {
        match self {
            LaneWidth::W8 => 8,
            LaneWidth::W16 => 16,
            LaneWidth::W32 => 32,
            LaneWidth::W64 => 64,
        }
    }
}

/// Scalar element type that can occupy a SIMD lane
///
/// Implemented for `u8 u16 u32 u64 i8 i16 i32 i64 f32 f64`. The trait is sealed:
/// backends rely on `WIDTH` and `KIND` to pick instructions, so foreign
/// implementations could select the wrong ones.
pub trait Lane:
    Copy + Default + PartialEq + PartialOrd + Debug + Send + Sync + 'static + sealed::Sealed
{
    /// Lane width
    const WIDTH: LaneWidth;

    /// Numeric category
    const KIND: LaneKind;

    /// Bit pattern with only the most significant (sign) bit set
    const SIGN_MASK: u64;

    /// Bit pattern with every bit of the lane set
    const ALL_ONES: u64;

    /// Reinterpret the lane as its raw bit pattern, zero-extended to 64 bits
    fn to_bits(self) -> u64;

    /// Reinterpret the low `WIDTH` bits of `bits` as a lane value
    fn from_bits(bits: u64) -> Self;

    /// Negation: wrapping for integers, sign-bit flip for floats
    ///
    /// Negating `i32::MIN` yields `i32::MIN`; negating a float never touches
    /// anything but the sign bit, so NaN payloads and zero survive bit-exact.
    fn wrapping_neg(self) -> Self;

    /// `self + index`, wrapping for integers (used for iota constants)
    fn offset(self, index: usize) -> Self;

    /// True if the sign bit is set
    #[inline(always)]
    fn sign_bit_set(self) -> bool {
        self.to_bits() & Self::SIGN_MASK != 0
    }
}

/// Lane types with a sign bit: signed integers and floats
pub trait SignedLane: Lane {}

/// Floating-point lane types
pub trait FloatLane: SignedLane {}

macro_rules! impl_int_lane {
    ($($ty:ty => $uty:ty, $width:expr, $kind:expr;)*) => {
        $(
            impl sealed::Sealed for $ty {}

            impl Lane for $ty {
                const WIDTH: LaneWidth = $width;
                const KIND: LaneKind = $kind;
                const SIGN_MASK: u64 = 1u64 << ($width.bits() - 1);
                const ALL_ONES: u64 = <$uty>::MAX as u64;

                #[inline(always)]
                fn to_bits(self) -> u64 {
                    self as $uty as u64
                }

                #[inline(always)]
                fn from_bits(bits: u64) -> Self {
                    bits as $uty as $ty
                }

                #[inline(always)]
                fn wrapping_neg(self) -> Self {
                    <$ty>::wrapping_neg(self)
                }

                #[inline(always)]
                fn offset(self, index: usize) -> Self {
                    self.wrapping_add(index as $ty)
                }
            }
        )*
    };
}

impl_int_lane! {
    u8 => u8, LaneWidth::W8, LaneKind::Unsigned;
    u16 => u16, LaneWidth::W16, LaneKind::Unsigned;
    u32 => u32, LaneWidth::W32, LaneKind::Unsigned;
    u64 => u64, LaneWidth::W64, LaneKind::Unsigned;
    i8 => u8, LaneWidth::W8, LaneKind::Signed;
    i16 => u16, LaneWidth::W16, LaneKind::Signed;
    i32 => u32, LaneWidth::W32, LaneKind::Signed;
    i64 => u64, LaneWidth::W64, LaneKind::Signed;
}

macro_rules! impl_float_lane {
    ($($ty:ty => $uty:ty, $width:expr;)*) => {
        $(
            impl sealed::Sealed for $ty {}

            impl Lane for $ty {
                const WIDTH: LaneWidth = $width;
                const KIND: LaneKind = LaneKind::Float;
                const SIGN_MASK: u64 = 1u64 << ($width.bits() - 1);
                const ALL_ONES: u64 = <$uty>::MAX as u64;

                #[inline(always)]
                fn to_bits(self) -> u64 {
                    <$ty>::to_bits(self) as u64
                }

                #[inline(always)]
                fn from_bits(bits: u64) -> Self {
                    <$ty>::from_bits(bits as $uty)
                }

                #[inline(always)]
                fn wrapping_neg(self) -> Self {
                    <$ty>::from_bits(<$ty>::to_bits(self) ^ (Self::SIGN_MASK as $uty))
                }

                #[inline(always)]
                fn offset(self, index: usize) -> Self {
                    self + index as $ty
                }
            }

            impl SignedLane for $ty {}
            impl FloatLane for $ty {}
        )*
    };
}

impl_float_lane! {
    f32 => u32, LaneWidth::W32;
    f64 => u64, LaneWidth::W64;
}

impl SignedLane for i8 {}
impl SignedLane for i16 {}
impl SignedLane for i32 {}
impl SignedLane for i64 {}
