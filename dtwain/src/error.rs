//! Error types for dtwain

use thiserror::Error;

/// Result type for dtwain operations
pub type Result<T> = std::result::Result<T, TwainError>;

/// Error types for DTWAIN operations.
///
/// Native DTWAIN calls report success and failure through their own boolean
/// return values, which the wrappers pass through unchanged. `TwainError`
/// covers only the Rust-side edges: loading the shared library, converting
/// strings across the FFI boundary, and null handles from creation calls.
#[derive(Error, Debug)]
pub enum TwainError {
    /// The DTWAIN shared library could not be located or loaded
    #[error("Failed to load the DTWAIN library: {reason}")]
    LibraryLoadFailed { reason: String },

    /// DTWAIN_SysInitialize returned a null handle
    #[error("Failed to initialize the DTWAIN library")]
    InitializationFailed,

    /// No TWAIN source was selected or opened
    #[error("Failed to select TWAIN source (DTWAIN error code: {code})")]
    SourceSelectionFailed { code: i32 },

    /// A DTWAIN array creation call returned a null handle
    #[error("Failed to create DTWAIN array: {reason}")]
    ArrayCreationFailed { reason: String },

    /// A string argument contains an interior NUL byte and cannot cross the
    /// C boundary
    #[error("String contains an interior NUL byte: {0:?}")]
    InvalidString(String),
}
