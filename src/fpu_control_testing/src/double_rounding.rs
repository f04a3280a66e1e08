//! `A + B - A` with `A = 2^53 - 2` and `B = 0.5`.
//!
//! The exact sum needs a 54-bit significand. Rounded to 53 bits it ties
//! back down to `A` and the difference is `0.0`; kept at 64 bits it is
//! exact and the difference is `0.5`; rounded to 24 bits it goes up to
//! `2^53` and the difference is `2.0`. The result therefore tells which
//! working precision the sum was computed in.
use std::hint::black_box;

use anyhow::{anyhow, Result};
use fpu_control_common::Precision;

/// `2^53 - 2`, exactly representable as an `f64`
pub const A: f64 = 9_007_199_254_740_990.0;
/// Half of the last place of [`A`]
pub const B: f64 = 0.5;

/// Round a non-negative integer to `bits` significant bits, ties to even
pub fn round_to_significand(value: u128, bits: u32) -> u128 {
    let width = u128::BITS - value.leading_zeros();
    if width <= bits {
        return value;
    }
    let shift = width - bits;
    let kept = value >> shift;
    let dropped = value & ((1_u128 << shift) - 1);
    let half = 1_u128 << (shift - 1);
    let kept = match dropped.cmp(&half) {
        std::cmp::Ordering::Greater => kept + 1,
        std::cmp::Ordering::Equal if kept & 1 == 1 => kept + 1,
        _ => kept,
    };
    kept << shift
}

/// What `A + B - A` yields when every intermediate result is rounded to
/// `precision`
pub fn expected_residue(precision: Precision) -> Result<f64> {
    let bits = precision
        .significand_bits()
        .ok_or_else(|| anyhow!("precision {:?} has no significand width", precision))?;
    // work in units of B so every value is an integer
    let a = (A / B) as u128;
    let sum = round_to_significand(a + 1, bits);
    let difference = round_to_significand(sum - a, bits);
    Ok(difference as f64 * B)
}

/// `A + B - A` computed by the hardware, in whatever precision the calling
/// thread is currently set to
#[inline(never)]
pub fn native_residue() -> f64 {
    let a = black_box(A);
    let b = black_box(B);
    a + b - a
}

/// `A + B - A` with the sum forced through a 64-bit `f64` before the
/// subtraction. Stores narrow the x87 register, so the sum is rounded to
/// 53 bits whatever the working precision is.
#[inline(never)]
pub fn native_residue_stored() -> f64 {
    let a = black_box(A);
    let b = black_box(B);
    let sum: f64 = black_box(a + b);
    sum - a
}
