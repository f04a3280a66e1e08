#![no_std]

#[cfg(test)]
extern crate std;

/// The decoded control word and the masked-update algorithm
pub mod control_word;
/// The individual control word fields and their bit masks
pub mod fields;

pub use control_word::{decode, encode, encode_field, ControlWord};
pub use fields::{
    ControlField, Denormal, ExceptionMask, Infinity, Mask, Precision, ReservedBits, Rounding,
    FIELD_BITS, WHOLE_REGISTER,
};
