use core::fmt;

#[cfg(feature = "tracing")]
use tracing::{instrument, Span};

use crate::fields::{ControlField, Denormal, ExceptionMask, Infinity, Precision, Rounding};

/// A decoded floating-point control word.
///
/// A `ControlWord` is a value, not a handle: it never refers back to the
/// register it was read from. Changing the live register always goes
/// through a register backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControlWord {
    precision: Precision,
    rounding: Rounding,
    infinity: Infinity,
    denormal: Denormal,
    exception_mask: ExceptionMask,
}

impl ControlWord {
    /// Round to nearest, 53-bit precision, every exception masked.
    ///
    /// This matches what SSE2 hardware computes with, so code produces the
    /// same results whether or not it runs on the legacy 80-bit unit.
    pub const DEFAULT: ControlWord = ControlWord {
        precision: Precision::Double53,
        rounding: Rounding::Near,
        infinity: Infinity::Projective,
        denormal: Denormal::Save,
        exception_mask: ExceptionMask::all(),
    };

    /// Decode a raw register value. Same as [`decode`].
    pub fn from_bits(raw: u32) -> Self {
        decode(raw)
    }

    /// Encode into a raw register value. Same as [`encode`].
    pub fn bits(&self) -> u32 {
        encode(self)
    }

    /// Working precision of intermediate results
    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// Rounding mode
    pub fn rounding(&self) -> Rounding {
        self.rounding
    }

    /// Infinity semantics
    pub fn infinity(&self) -> Infinity {
        self.infinity
    }

    /// Denormal handling
    pub fn denormal(&self) -> Denormal {
        self.denormal
    }

    /// The set of masked (suppressed) exceptions
    pub fn exception_mask(&self) -> ExceptionMask {
        self.exception_mask
    }

    /// A copy of this word with `precision` replaced
    pub fn with_precision(self, precision: Precision) -> Self {
        Self { precision, ..self }
    }

    /// A copy of this word with `rounding` replaced
    pub fn with_rounding(self, rounding: Rounding) -> Self {
        Self { rounding, ..self }
    }

    /// A copy of this word with `infinity` replaced
    pub fn with_infinity(self, infinity: Infinity) -> Self {
        Self { infinity, ..self }
    }

    /// A copy of this word with `denormal` replaced
    pub fn with_denormal(self, denormal: Denormal) -> Self {
        Self { denormal, ..self }
    }

    /// A copy of this word with the exception mask replaced
    pub fn with_exception_mask(self, exception_mask: ExceptionMask) -> Self {
        Self {
            exception_mask,
            ..self
        }
    }

    /// A copy of this word with any single field replaced, going through the
    /// same masked merge a register write uses
    pub fn with_field<F: ControlField>(self, field: F) -> Self {
        decode(encode_field(self.bits(), field.bits(), F::MASK.bits()))
    }
}

impl Default for ControlWord {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<u32> for ControlWord {
    fn from(raw: u32) -> Self {
        decode(raw)
    }
}

impl From<ControlWord> for u32 {
    fn from(word: ControlWord) -> u32 {
        encode(&word)
    }
}

impl fmt::Display for ControlWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "precision:{} round:{}", self.precision, self.rounding)
    }
}

/// Split a raw register value into its fields.
///
/// Total: every bit pattern decodes. Encodings the hardware reserves come
/// back as `Reserved` variants, and bits outside every [`Mask`](crate::fields::Mask) are dropped.
/// Nothing here checks that the hardware honored the value.
#[cfg_attr(feature = "tracing", instrument(skip_all, parent = Span::current(), level= "Trace"))]
pub fn decode(raw: u32) -> ControlWord {
    ControlWord {
        precision: Precision::from_raw(raw),
        rounding: Rounding::from_raw(raw),
        infinity: Infinity::from_raw(raw),
        denormal: Denormal::from_raw(raw),
        exception_mask: ExceptionMask::from_raw(raw),
    }
}

/// Combine every field of `word` into one raw register value. Reserved
/// bits are zero.
#[cfg_attr(feature = "tracing", instrument(skip_all, parent = Span::current(), level= "Trace"))]
pub fn encode(word: &ControlWord) -> u32 {
    word.precision.bits()
        | word.rounding.bits()
        | word.infinity.bits()
        | word.denormal.bits()
        | ControlField::bits(word.exception_mask)
}

/// The masked update: bits selected by `field_mask` come from
/// `field_value`, every other bit comes from `current_raw`.
///
/// `field_value` must already be shifted into the positions of
/// `field_mask`; it is not shifted here. Bits of `field_value` outside the
/// mask are silently ignored.
pub fn encode_field(current_raw: u32, field_value: u32, field_mask: u32) -> u32 {
    (current_raw & !field_mask) | (field_value & field_mask)
}
