use thiserror::Error;

/// The error type for control word operations
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FpuControlError {
    /// The platform primitive could not read or write the control word.
    /// The code is whatever the platform reported; it is not interpreted.
    #[error("Control word register access failed with error code {0}")]
    RegisterAccessError(i32),
}

impl FpuControlError {
    /// The platform error code carried by this error
    pub fn code(&self) -> i32 {
        match self {
            FpuControlError::RegisterAccessError(code) => *code,
        }
    }
}

/// Logs the given error at `error` level, then returns it from the
/// enclosing function
#[macro_export]
macro_rules! log_then_return {
    ($err:expr $(,)?) => {{
        let __err: $crate::FpuControlError = $err;
        log::error!("{}", __err);
        return Err(__err.into());
    }};
}
