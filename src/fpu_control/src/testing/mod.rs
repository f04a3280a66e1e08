use std::cell::Cell;

use crate::error::FpuControlError::RegisterAccessError;
use crate::register::RegisterAccess;
use crate::Result;

pub(crate) mod logger;
pub(crate) mod tracing_subscriber;

/// Wraps a register and makes its reads or writes fail with a fixed error
/// code, counting every call. A failing write leaves the wrapped register
/// untouched.
#[derive(Debug)]
pub(crate) struct FaultyRegister<R: RegisterAccess> {
    inner: R,
    get_error: Option<i32>,
    set_error: Option<i32>,
    get_calls: Cell<usize>,
    set_calls: Cell<usize>,
}

impl<R: RegisterAccess> FaultyRegister<R> {
    pub(crate) fn failing_get(inner: R, code: i32) -> Self {
        Self::new(inner, Some(code), None)
    }

    pub(crate) fn failing_set(inner: R, code: i32) -> Self {
        Self::new(inner, None, Some(code))
    }

    fn new(inner: R, get_error: Option<i32>, set_error: Option<i32>) -> Self {
        Self {
            inner,
            get_error,
            set_error,
            get_calls: Cell::new(0),
            set_calls: Cell::new(0),
        }
    }

    pub(crate) fn inner(&self) -> &R {
        &self.inner
    }

    pub(crate) fn get_calls(&self) -> usize {
        self.get_calls.get()
    }

    pub(crate) fn set_calls(&self) -> usize {
        self.set_calls.get()
    }
}

impl<R: RegisterAccess> RegisterAccess for FaultyRegister<R> {
    fn get(&self) -> Result<u32> {
        self.get_calls.set(self.get_calls.get() + 1);
        match self.get_error {
            Some(code) => Err(RegisterAccessError(code)),
            None => self.inner.get(),
        }
    }

    fn set(&self, new_value: u32, mask: u32) -> Result<u32> {
        self.set_calls.set(self.set_calls.get() + 1);
        match self.set_error {
            Some(code) => Err(RegisterAccessError(code)),
            None => self.inner.set(new_value, mask),
        }
    }

    fn supports_precision_control(&self) -> bool {
        self.inner.supports_precision_control()
    }
}
