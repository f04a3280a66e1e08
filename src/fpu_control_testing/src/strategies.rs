use fpu_control_common::{Mask, Precision};
use proptest::prelude::*;
use proptest::sample::select;
use strum::IntoEnumIterator;

/// Any 32-bit register value, reserved bits included
pub fn raw_word() -> impl Strategy<Value = u32> {
    any::<u32>()
}

/// One of the five field masks
pub fn field_mask() -> impl Strategy<Value = Mask> {
    select(Mask::iter().collect::<Vec<_>>())
}

/// One of the precisions the hardware defines
pub fn known_precision() -> impl Strategy<Value = Precision> {
    select(Precision::KNOWN.to_vec())
}
