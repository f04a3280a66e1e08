use fpu_control_common::{Mask, FIELD_BITS};
use libc::{c_int, c_uint};
use log::debug;
use tracing::{instrument, Span};

use super::RegisterAccess;
use crate::error::FpuControlError::RegisterAccessError;
use crate::{log_then_return, Result};

extern "C" {
    // errno_t __cdecl _controlfp_s(unsigned int *currentControl, unsigned int newControl, unsigned int mask);
    fn _controlfp_s(current_control: *mut c_uint, new_control: c_uint, mask: c_uint) -> c_int;
}

/// The control word of the calling thread, accessed through the C
/// runtime's `_controlfp_s`.
///
/// The C runtime uses the same abstract encoding as
/// [`ControlWord`](fpu_control_common::ControlWord) and translates it to the
/// x87 control word and MXCSR itself.
#[derive(Debug, Default, Clone, Copy)]
pub struct MsvcrtControlFp;

impl MsvcrtControlFp {
    /// Create a handle to the calling thread's control word
    pub fn new() -> Self {
        Self
    }

    fn controlfp(new_value: u32, mask: u32) -> Result<u32> {
        let mut current: c_uint = 0;
        // SAFETY: `current` is a valid, writable `unsigned int` for the
        // duration of the call, and the mask never selects bits the
        // runtime rejects (see `supported_bits`).
        let errno = unsafe { _controlfp_s(&mut current, new_value, mask) };
        if errno != 0 {
            log_then_return!(RegisterAccessError(errno));
        }
        Ok(current)
    }

    /// The bits this runtime accepts in a mask. Outside 32-bit x86 the
    /// runtime raises its invalid parameter handler when the precision
    /// mask is used, so those bits are dropped instead.
    fn supported_bits(&self) -> u32 {
        match self.supports_precision_control() {
            true => FIELD_BITS,
            false => FIELD_BITS & !Mask::PrecisionControl.bits(),
        }
    }
}

impl RegisterAccess for MsvcrtControlFp {
    #[instrument(err(Debug), skip(self), parent = Span::current(), level = "Trace")]
    fn get(&self) -> Result<u32> {
        Self::controlfp(0, 0)
    }

    #[instrument(err(Debug), skip(self), parent = Span::current(), level = "Trace")]
    fn set(&self, new_value: u32, mask: u32) -> Result<u32> {
        let supported = mask & self.supported_bits();
        if supported != mask & FIELD_BITS {
            debug!(
                "precision control is fixed on this platform, ignoring bits {:#010x}",
                new_value & Mask::PrecisionControl.bits()
            );
        }
        let previous = Self::controlfp(0, 0)?;
        Self::controlfp(new_value, supported)?;
        Ok(previous)
    }

    fn supports_precision_control(&self) -> bool {
        cfg!(target_arch = "x86")
    }
}
