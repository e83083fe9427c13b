//! Native array adapter and container marshaling
//!
//! DTWAIN hands capability values around as dynamically-typed array handles
//! (numeric, string, or frame-valued) or as numeric ranges. [`TwainArray`]
//! owns one such handle for its lifetime; the [`ArrayElement`] trait and the
//! `copy_from_twain_array` / `copy_to_twain_array` functions marshal element
//! values between the handle and ordinary Rust collections, dispatched by
//! the container's element type the way the native API dispatches on its
//! array type tags.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use crate::capability::Capability;
use crate::error::{Result, TwainError};
use crate::frame::TwainFrame;
use crate::source::TwainSource;
use dtwain_sys::*;

/// Owner of a single native `DTWAIN_ARRAY` handle.
///
/// The adapter is the sole owner of the handle: it is destroyed exactly once
/// on drop, ownership transfers on move, and `Clone` asks the library for a
/// deep copy. Whether the handle is a range-type array (an interval
/// description rather than discrete elements) is queried from the library
/// when the handle is acquired.
pub struct TwainArray {
    handle: DTWAIN_ARRAY,
    is_range: bool,
}

impl TwainArray {
    /// Create a native array of the given element type tag
    /// (`DTWAIN_ARRAYLONG`, `DTWAIN_ARRAYFLOAT`, ...) and initial size.
    pub fn new(element_type: LONG, size: usize) -> Result<Self> {
        let api = crate::api()?;
        let handle = unsafe { (api.DTWAIN_ArrayCreate)(element_type, size as LONG) };
        if handle.is_null() {
            return Err(TwainError::ArrayCreationFailed {
                reason: format!("DTWAIN_ArrayCreate returned null for type tag {element_type}"),
            });
        }
        Ok(Self::from_raw(handle))
    }

    /// Create a native array typed for the element type `T`.
    pub fn for_element<T: ArrayElement>(size: usize) -> Result<Self> {
        Self::new(T::ARRAY_TYPE, size)
    }

    /// Create a native array typed for a capability of the given source.
    pub fn from_cap(source: &TwainSource, cap: LONG, size: usize) -> Result<Self> {
        let api = crate::api()?;
        let handle =
            unsafe { (api.DTWAIN_ArrayCreateFromCap)(source.handle(), cap, size as LONG) };
        if handle.is_null() {
            return Err(TwainError::ArrayCreationFailed {
                reason: format!("DTWAIN_ArrayCreateFromCap returned null for capability {cap}"),
            });
        }
        Ok(Self::from_raw(handle))
    }

    /// Take ownership of a raw handle obtained from a native call,
    /// classifying it as a range by asking the library.
    pub fn from_raw(handle: DTWAIN_ARRAY) -> Self {
        let is_range = if handle.is_null() {
            false
        } else {
            match crate::api() {
                Ok(api) => unsafe { (api.DTWAIN_RangeIsValid)(handle, ptr::null_mut()) != 0 },
                Err(_) => false,
            }
        };
        Self { handle, is_range }
    }

    /// Get the raw array handle.
    pub fn handle(&self) -> DTWAIN_ARRAY {
        self.handle
    }

    /// Get a pointer to the owned handle, for native calls taking an
    /// `LPDTWAIN_ARRAY` out parameter. A handle written through the pointer
    /// becomes owned by this adapter; call [`set_handle`](Self::set_handle)
    /// instead when the old handle must be released first.
    pub fn handle_ptr(&mut self) -> LPDTWAIN_ARRAY {
        &mut self.handle
    }

    /// Replace the owned handle, releasing the previous one and
    /// re-classifying the new one.
    pub fn set_handle(&mut self, handle: DTWAIN_ARRAY) {
        self.release();
        *self = Self::from_raw(handle);
    }

    /// Whether the handle is a range-type array.
    pub fn is_range(&self) -> bool {
        self.is_range
    }

    /// Number of elements, or -1 when no handle is held.
    pub fn count(&self) -> LONG {
        if self.handle.is_null() {
            return -1;
        }
        match crate::api() {
            Ok(api) => unsafe { (api.DTWAIN_ArrayGetCount)(self.handle) },
            Err(_) => -1,
        }
    }

    /// Resize the native array. Failures are the library's to report and are
    /// ignored here, per the pass-through error model.
    pub fn resize(&self, size: usize) {
        if self.handle.is_null() {
            return;
        }
        if let Ok(api) = crate::api() {
            unsafe {
                (api.DTWAIN_ArrayResize)(self.handle, size as LONG);
            }
        }
    }

    /// Get the native element buffer reinterpreted as `T`, or null when no
    /// handle is held.
    ///
    /// The pointee type is the caller's claim; dereferencing the pointer is
    /// only valid when `T` matches the array's native element layout
    /// (`LONG` for integer arrays, `f64` for float arrays).
    pub fn buffer<T>(&self) -> *mut T {
        if self.handle.is_null() {
            return ptr::null_mut();
        }
        match crate::api() {
            Ok(api) => unsafe { (api.DTWAIN_ArrayGetBuffer)(self.handle, 0) as *mut T },
            Err(_) => ptr::null_mut(),
        }
    }

    /// Number of discrete elements a range describes, or 0 for non-range
    /// arrays.
    pub fn expanded_count(&self) -> LONG {
        if !self.is_range {
            return 0;
        }
        match crate::api() {
            Ok(api) => unsafe { (api.DTWAIN_RangeGetCount)(self.handle) },
            Err(_) => 0,
        }
    }

    /// Materialize a range into a discrete element array, replacing the
    /// owned handle with the expansion.
    ///
    /// Returns `false` (leaving the adapter untouched) when the handle is
    /// not a range or the library reports failure.
    pub fn expand_range_replace(&mut self) -> bool {
        match self.expand_range() {
            Some(expanded) => {
                *self = expanded;
                true
            }
            None => false,
        }
    }

    /// Materialize a range and copy the discrete elements into `out`.
    ///
    /// Returns `false` when the handle is not a range or the library reports
    /// failure.
    pub fn expand_range_into<T: ArrayElement>(&self, out: &mut Vec<T>) -> bool {
        match self.expand_range() {
            Some(expanded) => {
                copy_from_twain_array(&expanded, out);
                true
            }
            None => false,
        }
    }

    fn expand_range(&self) -> Option<TwainArray> {
        if !self.is_range {
            return None;
        }
        let api = crate::api().ok()?;
        let mut expanded: DTWAIN_ARRAY = ptr::null_mut();
        let ok = unsafe { (api.DTWAIN_RangeExpand)(self.handle, &mut expanded) };
        if ok == 0 || expanded.is_null() {
            return None;
        }
        Some(TwainArray::from_raw(expanded))
    }

    fn release(&mut self) {
        if self.handle.is_null() {
            return;
        }
        // Arrays only exist once the API table is loaded.
        if let Ok(api) = crate::api() {
            unsafe {
                (api.DTWAIN_ArrayDestroy)(self.handle);
            }
        }
        self.handle = ptr::null_mut();
        self.is_range = false;
    }
}

impl Default for TwainArray {
    /// An adapter holding no handle: count -1, not a range, drop is a no-op.
    fn default() -> Self {
        Self {
            handle: ptr::null_mut(),
            is_range: false,
        }
    }
}

impl Clone for TwainArray {
    /// Deep copy through the library. A failed native copy leaves the clone
    /// with no handle.
    fn clone(&self) -> Self {
        if self.handle.is_null() {
            return Self::default();
        }
        let handle = match crate::api() {
            Ok(api) => unsafe { (api.DTWAIN_ArrayCreateCopy)(self.handle) },
            Err(_) => ptr::null_mut(),
        };
        Self {
            handle,
            is_range: self.is_range,
        }
    }
}

impl Drop for TwainArray {
    fn drop(&mut self) {
        self.release();
    }
}

/// An element type that can be marshaled to and from a native DTWAIN array.
///
/// Implementations exist for the numeric primitives (which travel through
/// the native buffer as `LONG` or `f64`), `String` (via the per-element
/// string accessors), and [`TwainFrame`] (via the per-element frame
/// accessors). This is the Rust rendering of the native API's array type
/// tag dispatch.
pub trait ArrayElement: Sized {
    /// Native array type tag used when creating arrays of this element.
    const ARRAY_TYPE: LONG;

    /// Append `count` elements from the native array to `out`.
    fn copy_from(array: &TwainArray, count: usize, out: &mut Vec<Self>);

    /// Store `items` into the native array, which must already have at
    /// least `items.len()` slots.
    fn copy_to(array: &TwainArray, items: &[Self]) -> Result<()>;
}

macro_rules! numeric_array_element {
    ($($t:ty => $tag:expr, $native:ty;)*) => {$(
        impl ArrayElement for $t {
            const ARRAY_TYPE: LONG = $tag;

            fn copy_from(array: &TwainArray, count: usize, out: &mut Vec<Self>) {
                let buffer = array.buffer::<$native>();
                if buffer.is_null() {
                    return;
                }
                let values = unsafe { std::slice::from_raw_parts(buffer, count) };
                out.extend(values.iter().map(|&v| v as $t));
            }

            fn copy_to(array: &TwainArray, items: &[Self]) -> Result<()> {
                let buffer = array.buffer::<$native>();
                if buffer.is_null() {
                    return Ok(());
                }
                for (i, &v) in items.iter().enumerate() {
                    unsafe {
                        *buffer.add(i) = v as $native;
                    }
                }
                Ok(())
            }
        }
    )*};
}

numeric_array_element! {
    i16 => DTWAIN_ARRAYLONG, LONG;
    u16 => DTWAIN_ARRAYLONG, LONG;
    i32 => DTWAIN_ARRAYLONG, LONG;
    u32 => DTWAIN_ARRAYLONG, LONG;
    i64 => DTWAIN_ARRAYLONG64, i64;
    f32 => DTWAIN_ARRAYFLOAT, DTWAIN_FLOAT;
    f64 => DTWAIN_ARRAYFLOAT, DTWAIN_FLOAT;
}

impl ArrayElement for String {
    const ARRAY_TYPE: LONG = DTWAIN_ARRAYANSISTRING;

    fn copy_from(array: &TwainArray, count: usize, out: &mut Vec<Self>) {
        let Ok(api) = crate::api() else {
            return;
        };
        let max_len = unsafe { (api.DTWAIN_ArrayGetMaxStringLength)(array.handle()) };
        if max_len < 0 {
            return;
        }
        let mut buf: Vec<c_char> = vec![0; max_len as usize + 1];
        for i in 0..count {
            let ok =
                unsafe { (api.DTWAIN_ArrayGetAtStringA)(array.handle(), i as LONG, buf.as_mut_ptr()) };
            if ok == 0 {
                continue;
            }
            let s = unsafe { CStr::from_ptr(buf.as_ptr()) };
            out.push(s.to_string_lossy().into_owned());
        }
    }

    fn copy_to(array: &TwainArray, items: &[Self]) -> Result<()> {
        let api = crate::api()?;
        for (i, s) in items.iter().enumerate() {
            let c = CString::new(s.as_str()).map_err(|_| TwainError::InvalidString(s.clone()))?;
            unsafe {
                (api.DTWAIN_ArraySetAtStringA)(array.handle(), i as LONG, c.as_ptr());
            }
        }
        Ok(())
    }
}

impl ArrayElement for TwainFrame {
    const ARRAY_TYPE: LONG = DTWAIN_ARRAYFRAME;

    fn copy_from(array: &TwainArray, count: usize, out: &mut Vec<Self>) {
        let Ok(api) = crate::api() else {
            return;
        };
        for i in 0..count {
            let mut frame = TwainFrame::default();
            let ok = unsafe {
                (api.DTWAIN_ArrayFrameGetAt)(
                    array.handle(),
                    i as LONG,
                    &mut frame.left,
                    &mut frame.top,
                    &mut frame.right,
                    &mut frame.bottom,
                )
            };
            if ok != 0 {
                out.push(frame);
            }
        }
    }

    fn copy_to(array: &TwainArray, items: &[Self]) -> Result<()> {
        let api = crate::api()?;
        for (i, frame) in items.iter().enumerate() {
            unsafe {
                (api.DTWAIN_ArrayFrameSetAt)(
                    array.handle(),
                    i as LONG,
                    frame.left,
                    frame.top,
                    frame.right,
                    frame.bottom,
                );
            }
        }
        Ok(())
    }
}

/// Append every element of the native array to `out`.
pub fn copy_from_twain_array<T: ArrayElement>(array: &TwainArray, out: &mut Vec<T>) {
    let count = array.count();
    if count > 0 {
        T::copy_from(array, count as usize, out);
    }
}

/// Append the first `count` elements of the native array to `out`.
pub fn copy_from_twain_array_n<T: ArrayElement>(array: &TwainArray, count: usize, out: &mut Vec<T>) {
    T::copy_from(array, count, out);
}

/// Create a native array typed for the given capability of `source` and
/// fill it from `items`.
pub fn copy_to_twain_array<T: ArrayElement>(
    source: &TwainSource,
    cap: LONG,
    items: &[T],
) -> Result<TwainArray> {
    let array = TwainArray::from_cap(source, cap, items.len())?;
    T::copy_to(&array, items)?;
    Ok(array)
}

/// Like [`copy_to_twain_array`], with the capability identifier carried by
/// a [`Capability`] marker type.
pub fn copy_to_twain_array_for<C: Capability, T: ArrayElement>(
    source: &TwainSource,
    items: &[T],
) -> Result<TwainArray> {
    copy_to_twain_array(source, C::CAP_VALUE, items)
}
