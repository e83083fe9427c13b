//! Native logger configuration

use std::ffi::CString;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TwainError};
use crate::twain::Twain;
use dtwain_sys::*;

/// Where the native DTWAIN logger writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LoggerDestination {
    /// Write to the configured log file.
    ToFile,
    /// Write to the console.
    ToConsole,
    /// Write to the system debug monitor.
    ToDebug,
    ToFileAndConsole,
    ToFileAndDebug,
    ToConsoleAndDebug,
    ToAll,
    /// Logging is routed by the caller; no native destination bits are set.
    #[default]
    ToCustom,
}

impl LoggerDestination {
    /// Convert to the native destination bitmask.
    pub fn to_ffi(self) -> LONG {
        match self {
            LoggerDestination::ToFile => DTWAIN_LOG_USEFILE,
            LoggerDestination::ToConsole => DTWAIN_LOG_CONSOLE,
            LoggerDestination::ToDebug => DTWAIN_LOG_DEBUGMONITOR,
            LoggerDestination::ToFileAndConsole => DTWAIN_LOG_USEFILE | DTWAIN_LOG_CONSOLE,
            LoggerDestination::ToFileAndDebug => DTWAIN_LOG_USEFILE | DTWAIN_LOG_DEBUGMONITOR,
            LoggerDestination::ToConsoleAndDebug => DTWAIN_LOG_CONSOLE | DTWAIN_LOG_DEBUGMONITOR,
            LoggerDestination::ToAll => {
                DTWAIN_LOG_USEFILE | DTWAIN_LOG_CONSOLE | DTWAIN_LOG_DEBUGMONITOR
            }
            LoggerDestination::ToCustom => 0,
        }
    }
}

/// Logger verbosity, from silent (level 0) to full TWAIN event decoding
/// (level 4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LoggerVerbosity {
    Verbose0,
    Verbose1,
    Verbose2,
    Verbose3,
    Verbose4,
}

/// Native log bitmasks per verbosity level. Each level adds decode
/// categories on top of the previous one.
const VERBOSE_MASKS: [LONG; 5] = [
    0,
    DTWAIN_LOG_CALLSTACK,
    DTWAIN_LOG_CALLSTACK | DTWAIN_LOG_DECODE_DEST | DTWAIN_LOG_DECODE_SOURCE,
    DTWAIN_LOG_CALLSTACK
        | DTWAIN_LOG_DECODE_DEST
        | DTWAIN_LOG_DECODE_SOURCE
        | DTWAIN_LOG_DECODE_TWMEMREF,
    DTWAIN_LOG_CALLSTACK
        | DTWAIN_LOG_DECODE_DEST
        | DTWAIN_LOG_DECODE_SOURCE
        | DTWAIN_LOG_DECODE_TWMEMREF
        | DTWAIN_LOG_DECODE_TWEVENT,
];

/// Configuration for the native DTWAIN logger.
///
/// Builder-style value object: chain the setters, then hand the result to
/// [`apply`](LoggerCharacteristics::apply).
///
/// # Example
///
/// ```no_run
/// use dtwain::{LoggerCharacteristics, LoggerDestination, LoggerVerbosity, Twain};
///
/// let twain = Twain::new()?;
/// LoggerCharacteristics::new()
///     .enable(true)
///     .set_destination(LoggerDestination::ToFile)
///     .set_verbosity(LoggerVerbosity::Verbose2)
///     .set_filename("twain.log")
///     .apply(&twain)?;
/// # Ok::<(), dtwain::TwainError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggerCharacteristics {
    destination: LoggerDestination,
    verbosity: LoggerVerbosity,
    filename: String,
    enabled: bool,
}

impl Default for LoggerCharacteristics {
    fn default() -> Self {
        Self {
            destination: LoggerDestination::ToCustom,
            verbosity: LoggerVerbosity::Verbose1,
            filename: String::new(),
            enabled: false,
        }
    }
}

impl LoggerCharacteristics {
    /// Create a disabled logger configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the logger.
    pub fn enable(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set the log destination.
    pub fn set_destination(mut self, destination: LoggerDestination) -> Self {
        self.destination = destination;
        self
    }

    /// Set the verbosity level.
    pub fn set_verbosity(mut self, verbosity: LoggerVerbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set the log file name, used when the destination includes a file.
    pub fn set_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }

    /// Get the log destination.
    pub fn destination(&self) -> LoggerDestination {
        self.destination
    }

    /// Get the verbosity level.
    pub fn verbosity(&self) -> LoggerVerbosity {
        self.verbosity
    }

    /// Get the log file name.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Whether the logger is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Get the native log bitmask for the configured verbosity level.
    pub fn verbosity_mask(&self) -> LONG {
        VERBOSE_MASKS[self.verbosity as usize]
    }

    /// Forward this configuration to the native logger.
    ///
    /// No-op returning `false` when disabled; otherwise passes through the
    /// native call's boolean result.
    pub fn apply(&self, _twain: &Twain) -> Result<bool> {
        if !self.enabled {
            return Ok(false);
        }
        let api = crate::api()?;
        let filename = CString::new(self.filename.as_str())
            .map_err(|_| TwainError::InvalidString(self.filename.clone()))?;
        let flags = self.destination.to_ffi() | self.verbosity_mask();
        let ok = unsafe { (api.DTWAIN_SetTwainLogA)(flags, filename.as_ptr()) };
        Ok(ok != 0)
    }
}
