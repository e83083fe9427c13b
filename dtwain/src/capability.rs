//! Capability identifier tags
//!
//! TWAIN capabilities are integer codes identifying configurable device
//! properties. Array-marshaling calls can take the code either as a plain
//! integer or through one of the zero-sized marker types here, which carry
//! the code as an associated constant.

use dtwain_sys::*;

/// A marker type carrying a TWAIN capability identifier.
pub trait Capability {
    /// The native capability code.
    const CAP_VALUE: LONG;
}

macro_rules! capability_tags {
    ($($(#[$doc:meta])* $name:ident => $value:expr;)*) => {$(
        $(#[$doc])*
        pub struct $name;

        impl Capability for $name {
            const CAP_VALUE: LONG = $value;
        }
    )*};
}

capability_tags! {
    /// Number of images to transfer (CAP_XFERCOUNT).
    XferCount => DTWAIN_CV_CAPXFERCOUNT;
    /// Compression scheme (ICAP_COMPRESSION).
    Compression => DTWAIN_CV_ICAPCOMPRESSION;
    /// Pixel type (ICAP_PIXELTYPE).
    PixelType => DTWAIN_CV_ICAPPIXELTYPE;
    /// Measurement units (ICAP_UNITS).
    Units => DTWAIN_CV_ICAPUNITS;
    /// Transfer mechanism (ICAP_XFERMECH).
    XferMech => DTWAIN_CV_ICAPXFERMECH;
    /// Brightness (ICAP_BRIGHTNESS).
    Brightness => DTWAIN_CV_ICAPBRIGHTNESS;
    /// Contrast (ICAP_CONTRAST).
    Contrast => DTWAIN_CV_ICAPCONTRAST;
    /// Acquisition frames (ICAP_FRAMES).
    Frames => DTWAIN_CV_ICAPFRAMES;
    /// Horizontal resolution (ICAP_XRESOLUTION).
    XResolution => DTWAIN_CV_ICAPXRESOLUTION;
    /// Vertical resolution (ICAP_YRESOLUTION).
    YResolution => DTWAIN_CV_ICAPYRESOLUTION;
    /// Supported paper sizes (ICAP_SUPPORTEDSIZES).
    SupportedSizes => DTWAIN_CV_ICAPSUPPORTEDSIZES;
}
