//! Main DTWAIN entry point

use crate::error::{Result, TwainError};
use crate::source::TwainSource;
use dtwain_sys::DTWAIN_HANDLE;

/// Main entry point for DTWAIN operations.
///
/// Creating a `Twain` loads the native library (once per process) and
/// initializes the DTWAIN subsystem. Dropping it tears the subsystem down.
///
/// # Example
///
/// ```no_run
/// use dtwain::Twain;
///
/// let twain = Twain::new()?;
/// let source = twain.select_default_source()?;
/// # Ok::<(), dtwain::TwainError>(())
/// ```
pub struct Twain {
    handle: DTWAIN_HANDLE,
}

impl Twain {
    /// Load the DTWAIN library if needed and initialize the subsystem.
    pub fn new() -> Result<Self> {
        let api = crate::api()?;
        let handle = unsafe { (api.DTWAIN_SysInitialize)() };
        if handle.is_null() {
            return Err(TwainError::InitializationFailed);
        }
        Ok(Self { handle })
    }

    /// Get the raw subsystem handle.
    pub fn handle(&self) -> DTWAIN_HANDLE {
        self.handle
    }

    /// Open the system default TWAIN source.
    pub fn select_default_source(&self) -> Result<TwainSource> {
        let api = crate::api()?;
        let source = unsafe { (api.DTWAIN_SelectDefaultSource)() };
        if source.is_null() {
            let code = unsafe { (api.DTWAIN_GetLastError)() };
            return Err(TwainError::SourceSelectionFailed { code });
        }
        Ok(TwainSource::new(source))
    }

    /// Open a TWAIN source through the source-selection dialog.
    pub fn select_source(&self) -> Result<TwainSource> {
        let api = crate::api()?;
        let source = unsafe { (api.DTWAIN_SelectSource)() };
        if source.is_null() {
            let code = unsafe { (api.DTWAIN_GetLastError)() };
            return Err(TwainError::SourceSelectionFailed { code });
        }
        Ok(TwainSource::new(source))
    }
}

impl Drop for Twain {
    fn drop(&mut self) {
        // The API table is necessarily loaded if a session exists.
        if let Ok(api) = crate::api() {
            unsafe {
                (api.DTWAIN_SysDestroy)();
            }
        }
    }
}
