use std::marker::PhantomData;

use fpu_control_common::ControlWord;
use log::error;
use tracing::{instrument, Span};

use crate::model::ControlWordModel;
use crate::register::RegisterAccess;
use crate::Result;

/// A snapshot of the control word that is written back when the guard goes
/// out of scope, on every exit path including early returns and unwinding.
///
/// Changes made while the guard is alive are otherwise permanent for the
/// thread: every later floating-point operation on it would run in the
/// modified mode. The guard is `!Send`, since restoring on another thread
/// would overwrite that thread's register instead.
///
/// Dropping cannot report a failed restore, so it is only logged. Call
/// [`restore`](Self::restore) to observe the result.
#[must_use = "the control word is restored as soon as the guard is dropped"]
#[derive(Debug)]
pub struct ControlWordGuard<'a, R: RegisterAccess> {
    model: &'a ControlWordModel<R>,
    saved: ControlWord,
    restored: bool,
    _not_send: PhantomData<*const ()>,
}

impl<'a, R: RegisterAccess> ControlWordGuard<'a, R> {
    /// Capture the current control word of `model`. Fails, without
    /// creating a guard, if it cannot be read.
    #[instrument(err(Debug), skip_all, parent = Span::current(), level = "Trace")]
    pub fn acquire(model: &'a ControlWordModel<R>) -> Result<Self> {
        let saved = model.get_current()?;
        Ok(Self {
            model,
            saved,
            restored: false,
            _not_send: PhantomData,
        })
    }

    /// The control word that will be restored
    pub fn saved(&self) -> ControlWord {
        self.saved
    }

    /// Write the saved control word back now and report the result. The
    /// guard does not try again on drop, whatever the outcome.
    #[instrument(err(Debug), skip_all, parent = Span::current(), level = "Trace")]
    pub fn restore(mut self) -> Result<()> {
        self.restored = true;
        self.model.set_all(&self.saved)
    }
}

impl<R: RegisterAccess> Drop for ControlWordGuard<'_, R> {
    fn drop(&mut self) {
        if self.restored {
            return;
        }
        if let Err(e) = self.model.set_all(&self.saved) {
            error!(
                "[CONTROL WORD LEAK] failed to restore control word {} ({:#010x}): {}",
                self.saved,
                self.saved.bits(),
                e
            );
        }
    }
}
