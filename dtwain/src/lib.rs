//! # dtwain
//!
//! Safe, ergonomic value types over the DTWAIN scanner-control library.
//!
//! DTWAIN drives TWAIN image acquisition devices through a flat C API of
//! opaque handles, integer flags, and output parameters. This crate wraps
//! that surface in small value-like objects: a rectangular [`TwainFrame`],
//! a [`LoggerCharacteristics`] builder, a [`PdfTextElement`] text-overlay
//! descriptor, and a [`TwainArray`] adapter owning a native array handle.
//! Every operation is a thin forward into the native library; device
//! communication, image acquisition, and PDF generation stay on the native
//! side.
//!
//! The native library is resolved at runtime (see [`dtwain_sys`]); set
//! `DTWAIN_LIBRARY_PATH` to point at the shared library explicitly.
//!
//! ## Quick Start
//!
//! ```no_run
//! use dtwain::{copy_to_twain_array_for, PdfTextElement, Twain, XResolution};
//!
//! // Initialize DTWAIN
//! let twain = Twain::new()?;
//! let source = twain.select_default_source()?;
//!
//! // Stamp every page of acquired PDFs
//! PdfTextElement::new()
//!     .set_text("SCANNED")
//!     .set_position(40, 760)
//!     .write(&source)?;
//!
//! // Marshal resolution values into a native capability array
//! let array = copy_to_twain_array_for::<XResolution, f64>(&source, &[150.0, 300.0, 600.0])?;
//! assert_eq!(array.count(), 3);
//! # Ok::<(), dtwain::TwainError>(())
//! ```

mod array;
mod capability;
mod error;
mod frame;
mod logging;
mod pdf_text;
mod source;
mod twain;

pub use array::{
    copy_from_twain_array, copy_from_twain_array_n, copy_to_twain_array, copy_to_twain_array_for,
    ArrayElement, TwainArray,
};
pub use capability::{
    Brightness, Capability, Compression, Contrast, Frames, PixelType, SupportedSizes, Units,
    XResolution, XferCount, XferMech, YResolution,
};
pub use error::{Result, TwainError};
pub use frame::TwainFrame;
pub use logging::{LoggerCharacteristics, LoggerDestination, LoggerVerbosity};
pub use pdf_text::{rgb, PdfPageIgnore, PdfPrintPage, PdfRenderMode, PdfTextElement};
pub use source::TwainSource;
pub use twain::Twain;

/// Fetch the process-wide DTWAIN function table.
pub(crate) fn api() -> Result<&'static dtwain_sys::DtwainApi> {
    dtwain_sys::api().map_err(|reason| TwainError::LibraryLoadFailed { reason })
}
