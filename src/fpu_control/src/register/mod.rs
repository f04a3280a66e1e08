use crate::Result;

/// A software register, for tests and platforms without a backend
pub mod in_memory;

cfg_if::cfg_if! {
    if #[cfg(all(target_os = "windows", feature = "msvcrt"))] {
        /// The Windows C runtime backend
        pub mod msvcrt;

        /// The register backend for the platform this crate was built for
        pub type PlatformRegister = msvcrt::MsvcrtControlFp;
    }
}

/// The primitive that reads and writes the floating-point control word.
///
/// On every supported platform the control word is part of the executing
/// thread's context and is switched by the OS with it. A write made through
/// an implementation is only visible to the thread that made it, and two
/// threads never race on the same register. Implementations therefore need
/// not be `Sync`, and callers must not assume a value read on one thread
/// says anything about another.
pub trait RegisterAccess {
    /// Read the raw control word.
    fn get(&self) -> Result<u32>;

    /// Replace the bits selected by `mask` with the corresponding bits of
    /// `new_value`, leaving every other bit alone, and return the raw value
    /// the register held before. `mask == 0xFFFF_FFFF` replaces the whole
    /// register.
    ///
    /// Each call is assumed to be atomic: either every selected bit is
    /// written or, on error, none is. Whether a given platform actually
    /// guarantees that is not checked.
    fn set(&self, new_value: u32, mask: u32) -> Result<u32>;

    /// Whether writes to the precision field have any effect.
    ///
    /// Hardware without the legacy extended-precision unit rounds every
    /// result to its operand width. There, precision writes are accepted
    /// and do nothing; they are not reported as errors.
    fn supports_precision_control(&self) -> bool;
}

impl<R: RegisterAccess + ?Sized> RegisterAccess for &R {
    fn get(&self) -> Result<u32> {
        (**self).get()
    }

    fn set(&self, new_value: u32, mask: u32) -> Result<u32> {
        (**self).set(new_value, mask)
    }

    fn supports_precision_control(&self) -> bool {
        (**self).supports_precision_control()
    }
}

impl<R: RegisterAccess + ?Sized> RegisterAccess for Box<R> {
    fn get(&self) -> Result<u32> {
        (**self).get()
    }

    fn set(&self, new_value: u32, mask: u32) -> Result<u32> {
        (**self).set(new_value, mask)
    }

    fn supports_precision_control(&self) -> bool {
        (**self).supports_precision_control()
    }
}
