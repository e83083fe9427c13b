//! TWAIN source handles

use dtwain_sys::DTWAIN_SOURCE;

/// An opened TWAIN source (a scanner or camera).
///
/// Thin handle wrapper: the source itself is owned by the DTWAIN session and
/// torn down with it, so there is no drop behavior here. The handle is what
/// source-scoped calls such as [`PdfTextElement::write`](crate::PdfTextElement::write)
/// and [`copy_to_twain_array`](crate::copy_to_twain_array) take.
pub struct TwainSource {
    handle: DTWAIN_SOURCE,
}

impl TwainSource {
    pub(crate) fn new(handle: DTWAIN_SOURCE) -> Self {
        Self { handle }
    }

    /// Wrap a raw source handle obtained from a native DTWAIN call.
    pub fn from_raw(handle: DTWAIN_SOURCE) -> Self {
        Self::new(handle)
    }

    /// Get the raw source handle.
    pub fn handle(&self) -> DTWAIN_SOURCE {
        self.handle
    }
}
