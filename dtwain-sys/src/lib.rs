//! FFI bindings to the DTWAIN scanner-control library.
//!
//! DTWAIN (Dynarithmic TWAIN) is a native library that drives TWAIN image
//! acquisition devices and exposes a flat C API of handle-based functions and
//! integer constant tables. This crate declares those handles, constants, and
//! function signatures.
//!
//! DTWAIN ships as a dynamic library that is conventionally loaded at runtime
//! rather than linked at build time, so the bindings here are a function table
//! ([`DtwainApi`]) resolved with `libloading`. The table is loaded once per
//! process through [`api`]; set `DTWAIN_LIBRARY_PATH` to override the search
//! for the shared library.
//!
//! ```no_run
//! let api = dtwain_sys::api().expect("DTWAIN library not found");
//! let handle = unsafe { (api.DTWAIN_SysInitialize)() };
//! assert!(!handle.is_null());
//! ```

#![allow(non_upper_case_globals)]
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]

use std::env;
use std::ffi::OsStr;
use std::sync::OnceLock;

use libc::{c_char, c_void};
use libloading::Library;

// ========================================
// Handle and scalar types
// ========================================

/// DTWAIN's 32-bit integer type, fixed-width on every supported platform.
pub type LONG = i32;
pub type LPLONG = *mut LONG;
pub type DTWAIN_BOOL = LONG;
pub type DTWAIN_FLOAT = f64;
pub type LPCSTR = *const c_char;
pub type LPSTR = *mut c_char;

/// Opaque handle to an initialized DTWAIN subsystem.
pub type DTWAIN_HANDLE = *mut c_void;
/// Opaque handle to an opened TWAIN source (a scanner or camera).
pub type DTWAIN_SOURCE = *mut c_void;
/// Opaque handle to a dynamically-typed DTWAIN array or numeric range.
pub type DTWAIN_ARRAY = *mut c_void;
pub type LPDTWAIN_ARRAY = *mut DTWAIN_ARRAY;

pub const DTWAIN_TRUE: DTWAIN_BOOL = 1;
pub const DTWAIN_FALSE: DTWAIN_BOOL = 0;
pub const DTWAIN_NO_ERROR: LONG = 0;

// ========================================
// Array element type tags
// ========================================

pub const DTWAIN_ARRAYLONG: LONG = 1;
pub const DTWAIN_ARRAYFLOAT: LONG = 2;
pub const DTWAIN_ARRAYHANDLE: LONG = 3;
pub const DTWAIN_ARRAYSOURCE: LONG = 4;
pub const DTWAIN_ARRAYSTRING: LONG = 5;
pub const DTWAIN_ARRAYFRAME: LONG = 6;
pub const DTWAIN_ARRAYLONG64: LONG = 7;
pub const DTWAIN_ARRAYANSISTRING: LONG = 8;
pub const DTWAIN_ARRAYWIDESTRING: LONG = 9;

// ========================================
// Logging flags
// ========================================

// Decode categories, OR'd into the verbosity mask.
pub const DTWAIN_LOG_DECODE_SOURCE: LONG = 0x0001;
pub const DTWAIN_LOG_DECODE_DEST: LONG = 0x0002;
pub const DTWAIN_LOG_DECODE_TWMEMREF: LONG = 0x0004;
pub const DTWAIN_LOG_DECODE_TWEVENT: LONG = 0x0008;
pub const DTWAIN_LOG_CALLSTACK: LONG = 0x0010;

// Destinations, disjoint from the decode categories.
pub const DTWAIN_LOG_USEFILE: LONG = 0x10000;
pub const DTWAIN_LOG_DEBUGMONITOR: LONG = 0x20000;
pub const DTWAIN_LOG_CONSOLE: LONG = 0x40000;

// ========================================
// PDF text overlay flags
// ========================================

// Page selectors occupy the low byte.
pub const DTWAIN_PDFTEXT_ALLPAGES: LONG = 0x0001;
pub const DTWAIN_PDFTEXT_EVENPAGES: LONG = 0x0002;
pub const DTWAIN_PDFTEXT_ODDPAGES: LONG = 0x0004;
pub const DTWAIN_PDFTEXT_FIRSTPAGE: LONG = 0x0008;
pub const DTWAIN_PDFTEXT_LASTPAGE: LONG = 0x0010;
pub const DTWAIN_PDFTEXT_CURRENTPAGE: LONG = 0x0020;

// Ignore flags live above the page selectors so both fit one mask.
pub const DTWAIN_PDFTEXT_NOSCALING: LONG = 0x0100;
pub const DTWAIN_PDFTEXT_NOCHARSPACING: LONG = 0x0200;
pub const DTWAIN_PDFTEXT_NOWORDSPACING: LONG = 0x0400;
pub const DTWAIN_PDFTEXT_NORENDERMODE: LONG = 0x0800;
pub const DTWAIN_PDFTEXT_NORGBCOLOR: LONG = 0x1000;
pub const DTWAIN_PDFTEXT_NOFONTSIZE: LONG = 0x2000;
pub const DTWAIN_PDFTEXT_IGNOREALL: LONG = DTWAIN_PDFTEXT_NOSCALING
    | DTWAIN_PDFTEXT_NOCHARSPACING
    | DTWAIN_PDFTEXT_NOWORDSPACING
    | DTWAIN_PDFTEXT_NORENDERMODE
    | DTWAIN_PDFTEXT_NORGBCOLOR
    | DTWAIN_PDFTEXT_NOFONTSIZE;

// PDF text render modes.
pub const DTWAIN_PDFRENDER_FILL: LONG = 0;
pub const DTWAIN_PDFRENDER_STROKE: LONG = 1;
pub const DTWAIN_PDFRENDER_FILLSTROKE: LONG = 2;
pub const DTWAIN_PDFRENDER_INVISIBLE: LONG = 3;

// ========================================
// Capability identifiers
// ========================================

// TWAIN capability codes, DTWAIN_CV-prefixed as in dtwain.h.
pub const DTWAIN_CV_CAPXFERCOUNT: LONG = 0x0001;
pub const DTWAIN_CV_ICAPCOMPRESSION: LONG = 0x0100;
pub const DTWAIN_CV_ICAPPIXELTYPE: LONG = 0x0101;
pub const DTWAIN_CV_ICAPUNITS: LONG = 0x0102;
pub const DTWAIN_CV_ICAPXFERMECH: LONG = 0x0103;
pub const DTWAIN_CV_ICAPBRIGHTNESS: LONG = 0x1100;
pub const DTWAIN_CV_ICAPCONTRAST: LONG = 0x1103;
pub const DTWAIN_CV_ICAPFRAMES: LONG = 0x1114;
pub const DTWAIN_CV_ICAPXRESOLUTION: LONG = 0x1118;
pub const DTWAIN_CV_ICAPYRESOLUTION: LONG = 0x1119;
pub const DTWAIN_CV_ICAPSUPPORTEDSIZES: LONG = 0x1122;

// ========================================
// Runtime-loaded function table
// ========================================

/// Shared-library names probed when `DTWAIN_LIBRARY_PATH` is not set.
#[cfg(target_os = "windows")]
pub const DEFAULT_LIBRARY_NAMES: &[&str] =
    &["dtwain64u.dll", "dtwain64.dll", "dtwain32u.dll", "dtwain32.dll"];

#[cfg(target_os = "macos")]
pub const DEFAULT_LIBRARY_NAMES: &[&str] = &["libdtwain.dylib"];

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
pub const DEFAULT_LIBRARY_NAMES: &[&str] = &["libdtwain.so"];

macro_rules! dtwain_api {
    ($(
        $(#[$doc:meta])*
        fn $name:ident($($arg:ident: $ty:ty),* $(,)?) -> $ret:ty;
    )*) => {
        /// Function table over a loaded DTWAIN shared library.
        ///
        /// Every field is a plain `extern "C"` function pointer resolved at
        /// load time. The table owns the underlying [`Library`], so the
        /// pointers stay valid for the table's lifetime.
        pub struct DtwainApi {
            _lib: Library,
            $(
                $(#[$doc])*
                pub $name: unsafe extern "C" fn($($arg: $ty),*) -> $ret,
            )*
        }

        impl DtwainApi {
            /// Load the DTWAIN library from an explicit path or name and
            /// resolve every symbol in the table.
            pub fn load_from(path: impl AsRef<OsStr>) -> Result<Self, libloading::Error> {
                unsafe {
                    let lib = Library::new(path.as_ref())?;
                    $(
                        let $name = *lib.get::<unsafe extern "C" fn($($ty),*) -> $ret>(
                            concat!(stringify!($name), "\0").as_bytes(),
                        )?;
                    )*
                    Ok(Self {
                        _lib: lib,
                        $($name,)*
                    })
                }
            }
        }
    };
}

dtwain_api! {
    // Session lifecycle
    fn DTWAIN_SysInitialize() -> DTWAIN_HANDLE;
    fn DTWAIN_SysDestroy() -> DTWAIN_BOOL;
    fn DTWAIN_GetLastError() -> LONG;

    // Source selection
    fn DTWAIN_SelectSource() -> DTWAIN_SOURCE;
    fn DTWAIN_SelectDefaultSource() -> DTWAIN_SOURCE;

    // Array lifecycle
    fn DTWAIN_ArrayCreate(nEnumType: LONG, nInitialSize: LONG) -> DTWAIN_ARRAY;
    fn DTWAIN_ArrayCreateFromCap(Source: DTWAIN_SOURCE, lCapType: LONG, lSize: LONG) -> DTWAIN_ARRAY;
    fn DTWAIN_ArrayCreateCopy(Source: DTWAIN_ARRAY) -> DTWAIN_ARRAY;
    fn DTWAIN_ArrayDestroy(pArray: DTWAIN_ARRAY) -> DTWAIN_BOOL;
    fn DTWAIN_ArrayResize(pArray: DTWAIN_ARRAY, NewSize: LONG) -> DTWAIN_BOOL;

    // Array element access
    fn DTWAIN_ArrayGetCount(pArray: DTWAIN_ARRAY) -> LONG;
    fn DTWAIN_ArrayGetBuffer(pArray: DTWAIN_ARRAY, nPos: LONG) -> *mut c_void;
    fn DTWAIN_ArrayGetMaxStringLength(pArray: DTWAIN_ARRAY) -> LONG;
    fn DTWAIN_ArrayGetAtStringA(pArray: DTWAIN_ARRAY, nWhere: LONG, pStr: LPSTR) -> DTWAIN_BOOL;
    fn DTWAIN_ArraySetAtStringA(pArray: DTWAIN_ARRAY, nWhere: LONG, pStr: LPCSTR) -> DTWAIN_BOOL;
    fn DTWAIN_ArrayFrameGetAt(
        pArray: DTWAIN_ARRAY,
        nWhere: LONG,
        pLeft: *mut DTWAIN_FLOAT,
        pTop: *mut DTWAIN_FLOAT,
        pRight: *mut DTWAIN_FLOAT,
        pBottom: *mut DTWAIN_FLOAT,
    ) -> DTWAIN_BOOL;
    fn DTWAIN_ArrayFrameSetAt(
        pArray: DTWAIN_ARRAY,
        nWhere: LONG,
        Left: DTWAIN_FLOAT,
        Top: DTWAIN_FLOAT,
        Right: DTWAIN_FLOAT,
        Bottom: DTWAIN_FLOAT,
    ) -> DTWAIN_BOOL;

    // Numeric ranges
    fn DTWAIN_RangeCreate(nEnumType: LONG) -> DTWAIN_ARRAY;
    fn DTWAIN_RangeSetAllLong(
        pRange: DTWAIN_ARRAY,
        lLow: LONG,
        lUp: LONG,
        lStep: LONG,
        lDefault: LONG,
        lCurrent: LONG,
    ) -> DTWAIN_BOOL;
    fn DTWAIN_RangeSetAllFloat(
        pRange: DTWAIN_ARRAY,
        dLow: DTWAIN_FLOAT,
        dUp: DTWAIN_FLOAT,
        dStep: DTWAIN_FLOAT,
        dDefault: DTWAIN_FLOAT,
        dCurrent: DTWAIN_FLOAT,
    ) -> DTWAIN_BOOL;
    fn DTWAIN_RangeIsValid(pRange: DTWAIN_ARRAY, pStatus: LPLONG) -> DTWAIN_BOOL;
    fn DTWAIN_RangeGetCount(pRange: DTWAIN_ARRAY) -> LONG;
    fn DTWAIN_RangeExpand(pRange: DTWAIN_ARRAY, pArray: LPDTWAIN_ARRAY) -> DTWAIN_BOOL;

    // PDF text overlay
    fn DTWAIN_AddPDFTextA(
        Source: DTWAIN_SOURCE,
        szText: LPCSTR,
        xPos: LONG,
        yPos: LONG,
        fontName: LPCSTR,
        fontSize: DTWAIN_FLOAT,
        colorRGB: LONG,
        renderMode: LONG,
        scaling: DTWAIN_FLOAT,
        charSpacing: DTWAIN_FLOAT,
        wordSpacing: DTWAIN_FLOAT,
        strokeWidth: LONG,
        Flags: LONG,
    ) -> DTWAIN_BOOL;

    // Logging
    fn DTWAIN_SetTwainLogA(LogFlags: LONG, lpszLogFile: LPCSTR) -> DTWAIN_BOOL;
}

impl DtwainApi {
    /// Load the DTWAIN library.
    ///
    /// Honors `DTWAIN_LIBRARY_PATH` if set, otherwise probes the
    /// platform-conventional names in [`DEFAULT_LIBRARY_NAMES`].
    pub fn load() -> Result<Self, libloading::Error> {
        if let Some(path) = env::var_os("DTWAIN_LIBRARY_PATH") {
            return Self::load_from(path);
        }
        let mut result = Self::load_from(DEFAULT_LIBRARY_NAMES[0]);
        for name in &DEFAULT_LIBRARY_NAMES[1..] {
            if result.is_ok() {
                break;
            }
            result = Self::load_from(name);
        }
        result
    }
}

static API: OnceLock<DtwainApi> = OnceLock::new();

/// Load and cache the process-wide DTWAIN function table.
///
/// Only a successful load is cached; a failed search is retried on the next
/// call, so setting `DTWAIN_LIBRARY_PATH` after an early failure still takes
/// effect within the process.
pub fn api() -> Result<&'static DtwainApi, String> {
    if let Some(api) = API.get() {
        return Ok(api);
    }
    let loaded = DtwainApi::load().map_err(|e| e.to_string())?;
    // A concurrent load may have won the race; the extra table is dropped.
    Ok(API.get_or_init(|| loaded))
}
