use std::cell::Cell;

use fpu_control_common::{encode_field, ControlWord, Mask};
use tracing::{instrument, Span};

use super::RegisterAccess;
use crate::Result;

/// A control word held in memory, honoring the same masked-write contract
/// as the hardware primitive.
///
/// Like the hardware register it stands in for, it belongs to one thread:
/// it is `Send` but not `Sync`.
#[derive(Debug)]
pub struct InMemoryRegister {
    value: Cell<u32>,
    precision_control: bool,
}

impl InMemoryRegister {
    /// Create a register holding `raw`, on which precision writes take
    /// effect
    pub fn new(raw: u32) -> Self {
        Self {
            value: Cell::new(raw),
            precision_control: true,
        }
    }

    /// Model hardware with (`true`) or without (`false`) a configurable
    /// working precision. Without it, writes leave the precision bits as
    /// they are.
    pub fn with_precision_control(self, supported: bool) -> Self {
        Self {
            precision_control: supported,
            ..self
        }
    }

    /// The raw value currently held
    pub fn raw(&self) -> u32 {
        self.value.get()
    }
}

impl Default for InMemoryRegister {
    fn default() -> Self {
        Self::new(ControlWord::DEFAULT.bits())
    }
}

impl RegisterAccess for InMemoryRegister {
    fn get(&self) -> Result<u32> {
        Ok(self.value.get())
    }

    #[instrument(skip(self), parent = Span::current(), level = "Trace")]
    fn set(&self, new_value: u32, mask: u32) -> Result<u32> {
        let mask = match self.precision_control {
            true => mask,
            false => mask & !Mask::PrecisionControl.bits(),
        };
        let previous = self.value.get();
        self.value.set(encode_field(previous, new_value, mask));
        Ok(previous)
    }

    fn supports_precision_control(&self) -> bool {
        self.precision_control
    }
}
