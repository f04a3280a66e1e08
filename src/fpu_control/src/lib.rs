//! This crate reads and changes the floating-point control word of the
//! calling thread: rounding mode, working precision, denormal and infinity
//! handling, and which exceptions are masked.
//!
//! The bit-field model itself lives in `fpu-control-common` and is
//! re-exported here. This crate adds the register backends, the
//! [`ControlWordModel`] that drives them, and [`ControlWordGuard`] for
//! scoped save and restore.
//!
//! The control word is per-thread state. Nothing in this crate shares a
//! register between threads.

#[deny(dead_code, missing_docs, unused_mut)]
/// Errors raised by register backends
pub mod error;
/// Scoped save and restore of the control word
#[deny(dead_code, missing_docs, unused_mut)]
pub mod guard;
/// Reading and changing the control word through a backend
#[deny(dead_code, missing_docs, unused_mut)]
pub mod model;
/// The `RegisterAccess` primitive and its implementations
#[deny(missing_docs, unused_mut)]
pub mod register;
#[cfg(test)]
pub(crate) mod testing;

pub use error::FpuControlError;
pub use fpu_control_common::{
    decode, encode, encode_field, ControlField, ControlWord, Denormal, ExceptionMask, Infinity,
    Mask, Precision, ReservedBits, Rounding, FIELD_BITS, WHOLE_REGISTER,
};
pub use guard::ControlWordGuard;
pub use model::ControlWordModel;
pub use register::in_memory::InMemoryRegister;
#[cfg(all(target_os = "windows", feature = "msvcrt"))]
pub use register::msvcrt::MsvcrtControlFp;
#[cfg(all(target_os = "windows", feature = "msvcrt"))]
pub use register::PlatformRegister;
pub use register::RegisterAccess;

/// The result type for control word operations
pub type Result<T> = core::result::Result<T, FpuControlError>;
