use core::fmt;

use bitflags::bitflags;
use strum::{Display, EnumIter, EnumString};

/// The mask selecting every bit of the control word. Writing with this mask
/// replaces the whole register.
pub const WHOLE_REGISTER: u32 = 0xFFFF_FFFF;

/// The fixed bit range occupied by each field of the control word.
///
/// The ranges are pairwise disjoint, so any field can be rewritten without
/// decoding the others. Their union does not cover all 32 bits; the bits
/// outside it are reserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
pub enum Mask {
    /// Denormal operand and result handling
    DenormalControl,
    /// The per-exception interrupt mask bits
    InterruptExceptionMask,
    /// Affine or projective infinity
    InfinityControl,
    /// Rounding mode
    RoundingControl,
    /// Working precision of intermediate results
    PrecisionControl,
}

impl Mask {
    /// The raw bit pattern selected by this mask
    pub const fn bits(self) -> u32 {
        match self {
            Mask::DenormalControl => 0x0300_0000,
            Mask::InterruptExceptionMask => 0x0008_001F,
            Mask::InfinityControl => 0x0004_0000,
            Mask::RoundingControl => 0x0000_0300,
            Mask::PrecisionControl => 0x0003_0000,
        }
    }
}

/// The union of every field mask. Bits outside it are reserved.
pub const FIELD_BITS: u32 = Mask::DenormalControl.bits()
    | Mask::InterruptExceptionMask.bits()
    | Mask::InfinityControl.bits()
    | Mask::RoundingControl.bits()
    | Mask::PrecisionControl.bits();

/// A single field of the control word, stored in the register already
/// shifted into the bit positions of its [`Mask`].
pub trait ControlField: Copy {
    /// The bit range this field occupies
    const MASK: Mask;

    /// The field's bits, pre-shifted into the positions of `MASK`
    fn bits(self) -> u32;

    /// Extract the field from a raw register value. Never fails; bits
    /// outside `MASK` are ignored.
    fn from_raw(raw: u32) -> Self;
}

/// Field bits that name no known mode. Only produced by decoding a raw
/// register value, and re-encoded unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReservedBits(u32);

impl ReservedBits {
    /// The raw field bits, still in their register positions
    pub const fn bits(self) -> u32 {
        self.0
    }
}

/// The precision intermediate results of add, subtract, multiply, divide
/// and square root are rounded to on the legacy 80-bit unit.
///
/// Hardware without that unit rounds every result to the precision of its
/// operand type, so on such platforms this field can be written and read
/// back but changes nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString)]
pub enum Precision {
    /// 24-bit significand (single)
    Single24,
    /// 53-bit significand (double)
    Double53,
    /// 64-bit significand (double extended)
    Extended64,
    /// The reserved precision encoding
    #[strum(disabled)]
    Reserved(ReservedBits),
}

impl Precision {
    /// Every precision the hardware defines
    pub const KNOWN: [Precision; 3] = [
        Precision::Single24,
        Precision::Double53,
        Precision::Extended64,
    ];

    /// The number of significand bits results are rounded to, or `None`
    /// for the reserved encoding
    pub const fn significand_bits(self) -> Option<u32> {
        match self {
            Precision::Single24 => Some(24),
            Precision::Double53 => Some(53),
            Precision::Extended64 => Some(64),
            Precision::Reserved(_) => None,
        }
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Precision::Single24 => f.write_str("Single24"),
            Precision::Double53 => f.write_str("Double53"),
            Precision::Extended64 => f.write_str("Extended64"),
            Precision::Reserved(bits) => write!(f, "Reserved({:#010x})", bits.bits()),
        }
    }
}

impl ControlField for Precision {
    const MASK: Mask = Mask::PrecisionControl;

    fn bits(self) -> u32 {
        match self {
            Precision::Single24 => 0x0002_0000,
            Precision::Double53 => 0x0001_0000,
            Precision::Extended64 => 0x0000_0000,
            Precision::Reserved(bits) => bits.bits(),
        }
    }

    fn from_raw(raw: u32) -> Self {
        match raw & Self::MASK.bits() {
            0x0002_0000 => Precision::Single24,
            0x0001_0000 => Precision::Double53,
            0x0000_0000 => Precision::Extended64,
            other => {
                log::debug!("precision control holds reserved bits {:#010x}", other);
                Precision::Reserved(ReservedBits(other))
            }
        }
    }
}

/// Rounding mode applied to every inexact result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
pub enum Rounding {
    /// Round to nearest, ties to even
    Near,
    /// Round toward negative infinity
    Down,
    /// Round toward positive infinity
    Up,
    /// Truncate
    ToZero,
}

impl ControlField for Rounding {
    const MASK: Mask = Mask::RoundingControl;

    fn bits(self) -> u32 {
        match self {
            Rounding::Near => 0x0000_0000,
            Rounding::Down => 0x0000_0100,
            Rounding::Up => 0x0000_0200,
            Rounding::ToZero => 0x0000_0300,
        }
    }

    fn from_raw(raw: u32) -> Self {
        match raw & Self::MASK.bits() {
            0x0000_0000 => Rounding::Near,
            0x0000_0100 => Rounding::Down,
            0x0000_0200 => Rounding::Up,
            _ => Rounding::ToZero,
        }
    }
}

/// Infinity semantics. `Affine` (distinct +inf and -inf) is the only
/// IEEE 754 conformant option; `Projective` is a legacy of the 8087/80287.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
pub enum Infinity {
    /// Signed infinities
    Affine,
    /// A single unsigned infinity
    Projective,
}

impl ControlField for Infinity {
    const MASK: Mask = Mask::InfinityControl;

    fn bits(self) -> u32 {
        match self {
            Infinity::Affine => 0x0004_0000,
            Infinity::Projective => 0x0000_0000,
        }
    }

    fn from_raw(raw: u32) -> Self {
        match raw & Self::MASK.bits() {
            0 => Infinity::Projective,
            _ => Infinity::Affine,
        }
    }
}

/// Whether subnormal operands and results are kept or forced to zero.
///
/// The legacy x87 unit always preserves them and ignores `Flush`; SSE2 and
/// ARM hardware honor it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString)]
pub enum Denormal {
    /// Preserve subnormal values
    Save,
    /// Flush subnormal values to zero
    Flush,
    /// One of the two reserved encodings
    #[strum(disabled)]
    Reserved(ReservedBits),
}

impl Denormal {
    /// Every denormal mode the hardware defines
    pub const KNOWN: [Denormal; 2] = [Denormal::Save, Denormal::Flush];
}

impl fmt::Display for Denormal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Denormal::Save => f.write_str("Save"),
            Denormal::Flush => f.write_str("Flush"),
            Denormal::Reserved(bits) => write!(f, "Reserved({:#010x})", bits.bits()),
        }
    }
}

impl ControlField for Denormal {
    const MASK: Mask = Mask::DenormalControl;

    fn bits(self) -> u32 {
        match self {
            Denormal::Save => 0x0000_0000,
            Denormal::Flush => 0x0100_0000,
            Denormal::Reserved(bits) => bits.bits(),
        }
    }

    fn from_raw(raw: u32) -> Self {
        match raw & Self::MASK.bits() {
            0x0000_0000 => Denormal::Save,
            0x0100_0000 => Denormal::Flush,
            other => {
                log::debug!("denormal control holds reserved bits {:#010x}", other);
                Denormal::Reserved(ReservedBits(other))
            }
        }
    }
}

bitflags! {
    /// Masked floating-point exceptions. A set bit *suppresses* the
    /// hardware trap for that condition; clearing it enables the trap.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ExceptionMask: u32 {
        /// Invalid operation
        const INVALID = 0x0000_0010;
        /// Denormal operand
        const DENORMAL = 0x0008_0000;
        /// Division by zero
        const ZERO_DIVIDE = 0x0000_0008;
        /// Overflow
        const OVERFLOW = 0x0000_0004;
        /// Underflow
        const UNDERFLOW = 0x0000_0002;
        /// Inexact result
        const INEXACT = 0x0000_0001;
    }
}

impl ControlField for ExceptionMask {
    const MASK: Mask = Mask::InterruptExceptionMask;

    fn bits(self) -> u32 {
        ExceptionMask::bits(&self)
    }

    fn from_raw(raw: u32) -> Self {
        ExceptionMask::from_bits_truncate(raw)
    }
}
