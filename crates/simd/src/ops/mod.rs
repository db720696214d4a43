//! Functional-style vector operations
//!
//! Free functions generic over any [`SimdVector`](crate::SimdVector). The selection
//! primitives in [`select`] are the public surface; [`bits`] and [`compare`] expose
//! the building blocks they are written against.
//!
//! # Module Organization
//!
//! - [`select`]: per-lane conditional selection (mask, bit-vector and sign driven)
//! - [`bits`]: bitwise logic, sign-bit broadcast, mask/vector conversion
//! - [`compare`]: comparison operations returning masks

pub mod bits;
pub mod compare;
pub mod select;

// Re-export all operations for convenience
pub use bits::{
    and, and_not, bitwise_if_then_else, broadcast_sign_bit, mask_from_vec, or, sign_bit,
    vec_from_mask, xor,
};
pub use compare::{eq, gt, lt, ne};
pub use select::{
    if_negative_then_else, if_negative_then_neg_or_undef_if_zero, if_then_else,
    if_then_else_zero, if_then_zero_else, if_vec_then_else, zero_if_negative,
};
