use fpu_control_common::{decode, ControlField, ControlWord, Mask, Precision, WHOLE_REGISTER};
use log::warn;
use tracing::{instrument, Span};

use crate::guard::ControlWordGuard;
use crate::register::RegisterAccess;
use crate::Result;

/// Reads and changes a control word through a [`RegisterAccess`] backend.
///
/// The model holds no state of its own; every read goes to the register
/// and every change is a single masked write. Nothing is cached, buffered
/// or retried.
#[derive(Debug)]
pub struct ControlWordModel<R: RegisterAccess> {
    register: R,
}

impl<R: RegisterAccess> ControlWordModel<R> {
    /// Wrap `register`
    pub fn new(register: R) -> Self {
        Self { register }
    }

    /// The backend this model reads and writes
    pub fn register(&self) -> &R {
        &self.register
    }

    /// Give the backend back
    pub fn into_inner(self) -> R {
        self.register
    }

    /// Whether changing [`Precision`] has any effect on this backend. See
    /// [`RegisterAccess::supports_precision_control`].
    pub fn supports_precision_control(&self) -> bool {
        self.register.supports_precision_control()
    }

    /// Read and decode the current control word. A failed read has no side
    /// effect and is not retried.
    #[instrument(err(Debug), skip(self), parent = Span::current(), level = "Trace")]
    pub fn get_current(&self) -> Result<ControlWord> {
        let raw = self.register.get()?;
        Ok(decode(raw))
    }

    /// Write `field_value` into the bits selected by `field_mask`, leaving
    /// every other bit of the register untouched.
    ///
    /// `field_value` must already be shifted into the positions of
    /// `field_mask`. Bits outside the mask are ignored, not rejected.
    ///
    /// Writing [`Mask::PrecisionControl`] on a backend without precision
    /// control succeeds and changes nothing.
    ///
    /// If the backend fails, the register holds whatever the backend left
    /// in it.
    #[instrument(err(Debug), skip(self), parent = Span::current(), level = "Trace")]
    pub fn set_field(&self, field_value: u32, field_mask: Mask) -> Result<()> {
        if field_mask == Mask::PrecisionControl && !self.supports_precision_control() {
            warn!(
                "precision control is not supported by this register, the write to {:#010x} has no effect",
                field_value
            );
        }
        self.register.set(field_value, field_mask.bits())?;
        Ok(())
    }

    /// Write one typed field under its own mask
    pub fn set<F: ControlField>(&self, field: F) -> Result<()> {
        self.set_field(field.bits(), F::MASK)
    }

    /// Replace the whole control word with `word` in one write.
    ///
    /// On a backend without precision control the precision of `word` is
    /// not applied. A warning is logged when it differs from the current one.
    #[instrument(err(Debug), skip(self, word), fields(word = %word), parent = Span::current(), level = "Trace")]
    pub fn set_all(&self, word: &ControlWord) -> Result<()> {
        if !self.supports_precision_control() {
            let current = decode(self.register.get()?).precision();
            if current != word.precision() {
                warn!(
                    "precision control is not supported by this register, precision stays {} instead of {}",
                    current,
                    word.precision()
                );
            }
        }
        self.register.set(word.bits(), WHOLE_REGISTER)?;
        Ok(())
    }

    /// Install [`ControlWord::DEFAULT`]
    pub fn reset(&self) -> Result<()> {
        self.set_all(&ControlWord::DEFAULT)
    }

    /// Capture the current control word. It is written back when the
    /// returned guard is dropped or explicitly restored.
    pub fn scoped(&self) -> Result<ControlWordGuard<'_, R>> {
        ControlWordGuard::acquire(self)
    }

    /// Run `f` with the working precision set to `precision`, restoring the
    /// previous control word afterwards, including when `f` panics.
    pub fn with_precision<T>(&self, precision: Precision, f: impl FnOnce() -> T) -> Result<T> {
        let guard = self.scoped()?;
        self.set(precision)?;
        let value = f();
        guard.restore()?;
        Ok(value)
    }
}
