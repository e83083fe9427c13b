//! Comprehensive tests for dtwain
//!
//! Tests cover:
//! - Frame value semantics
//! - Logger configuration (verbosity table, chaining, serialization)
//! - PDF text element (defaults, chaining, flag assembly)
//! - Array adapter behavior without a handle
//! - Session, logging, and array round trips against a live DTWAIN
//!   library (skipped when the library cannot be loaded)

use dtwain::{
    copy_from_twain_array, copy_to_twain_array, LoggerCharacteristics, LoggerDestination,
    LoggerVerbosity, PdfPageIgnore, PdfPrintPage, PdfRenderMode, PdfTextElement, Twain, TwainArray,
    TwainFrame,
};
use serial_test::serial;
use tempfile::tempdir;

/// Whether the native DTWAIN library can be loaded in this environment.
fn library_available() -> bool {
    dtwain_sys::api().is_ok()
}

macro_rules! require_library {
    () => {
        if !library_available() {
            eprintln!("skipping: DTWAIN library not available");
            return;
        }
    };
}

// ============================================================================
// Frame Tests
// ============================================================================

#[test]
fn test_frame_constructors() {
    assert_eq!(TwainFrame::default(), TwainFrame::new(0.0, 0.0, 0.0, 0.0));
    assert_eq!(TwainFrame::uniform(2.5), TwainFrame::new(2.5, 2.5, 2.5, 2.5));

    let letter = TwainFrame::new(0.0, 0.0, 8.5, 11.0);
    assert_eq!(letter.right, 8.5);
    assert_eq!(letter.bottom, 11.0);
}

#[test]
fn test_frame_serde_round_trip() {
    let frame = TwainFrame::new(1.0, 2.0, 3.0, 4.0);
    let json = serde_json::to_string(&frame).unwrap();
    let back: TwainFrame = serde_json::from_str(&json).unwrap();
    assert_eq!(back, frame);
}

// ============================================================================
// Logger Configuration Tests
// ============================================================================

#[test]
fn test_logger_verbosity_masks_increase() {
    let levels = [
        LoggerVerbosity::Verbose0,
        LoggerVerbosity::Verbose1,
        LoggerVerbosity::Verbose2,
        LoggerVerbosity::Verbose3,
        LoggerVerbosity::Verbose4,
    ];
    let masks: Vec<_> = levels
        .iter()
        .map(|&v| LoggerCharacteristics::new().set_verbosity(v).verbosity_mask())
        .collect();
    for pair in masks.windows(2) {
        assert!(pair[1] > pair[0], "masks must grow with verbosity: {masks:?}");
    }
    assert_eq!(masks[0], 0);
}

#[test]
fn test_logger_builder_chaining() {
    let logger = LoggerCharacteristics::new()
        .enable(true)
        .set_destination(LoggerDestination::ToFileAndConsole)
        .set_filename("session.log");
    assert!(logger.is_enabled());
    assert_eq!(logger.destination(), LoggerDestination::ToFileAndConsole);
    assert_eq!(logger.filename(), "session.log");
}

#[test]
fn test_logger_serde_round_trip() {
    let logger = LoggerCharacteristics::new()
        .enable(true)
        .set_destination(LoggerDestination::ToFile)
        .set_verbosity(LoggerVerbosity::Verbose3)
        .set_filename("twain.log");
    let json = serde_json::to_string(&logger).unwrap();
    let back: LoggerCharacteristics = serde_json::from_str(&json).unwrap();
    assert_eq!(back, logger);
}

// ============================================================================
// PDF Text Element Tests
// ============================================================================

#[test]
fn test_pdf_text_element_defaults_and_chaining() {
    let element = PdfTextElement::new()
        .set_text("Page stamp")
        .set_position(72, 720)
        .set_render_mode(PdfRenderMode::Stroke)
        .set_stroke_width(2);
    assert_eq!(element.text(), "Page stamp");
    assert_eq!(element.position(), (72, 720));
    assert_eq!(element.render_mode(), PdfRenderMode::Stroke);
    assert_eq!(element.stroke_width(), 2);
    // Untouched fields keep their defaults.
    assert_eq!(element.font(), "Helvetica");
    assert_eq!(element.which_pages(), PdfPrintPage::CurrentPage);
}

#[test]
fn test_pdf_text_element_flag_assembly() {
    let with_ignores = PdfTextElement::new()
        .set_which_pages(PdfPrintPage::OddPages)
        .set_ignore_flags(vec![PdfPageIgnore::RgbColor, PdfPageIgnore::RenderMode]);
    let base = PdfPrintPage::OddPages.to_ffi();
    assert_eq!(
        with_ignores.flags(),
        base | PdfPageIgnore::RgbColor.to_ffi() | PdfPageIgnore::RenderMode.to_ffi()
    );

    // Sentinel wins over every other flag in the list.
    let with_sentinel = with_ignores
        .clone()
        .set_ignore_flags(vec![PdfPageIgnore::RgbColor, PdfPageIgnore::IgnoreNone]);
    assert_eq!(with_sentinel.flags(), base);
}

#[test]
fn test_pdf_text_element_serde_round_trip() {
    let element = PdfTextElement::new()
        .set_text("CONFIDENTIAL")
        .set_font("Courier")
        .set_which_pages(PdfPrintPage::AllPages);
    let json = serde_json::to_string(&element).unwrap();
    let back: PdfTextElement = serde_json::from_str(&json).unwrap();
    assert_eq!(back, element);
}

// ============================================================================
// Array Adapter Tests (no native handle)
// ============================================================================

#[test]
fn test_adapter_without_handle_is_inert() {
    let mut array = TwainArray::default();
    assert_eq!(array.count(), -1);
    assert!(!array.is_range());
    assert!(!array.expand_range_replace());
    array.resize(16);
    assert_eq!(array.count(), -1);
}

#[test]
fn test_copy_helpers_tolerate_empty_adapter() {
    let array = TwainArray::default();
    let mut longs: Vec<i32> = Vec::new();
    let mut strings: Vec<String> = Vec::new();
    let mut frames: Vec<TwainFrame> = Vec::new();
    copy_from_twain_array(&array, &mut longs);
    copy_from_twain_array(&array, &mut strings);
    copy_from_twain_array(&array, &mut frames);
    assert!(longs.is_empty());
    assert!(strings.is_empty());
    assert!(frames.is_empty());
}

// ============================================================================
// Live Library Tests (skipped without the native library)
// ============================================================================

#[test]
#[serial]
fn test_session_initializes_and_tears_down() {
    require_library!();
    let twain = Twain::new().expect("DTWAIN should initialize");
    assert!(!twain.handle().is_null());
    drop(twain);

    // A second session must work after the first tears down.
    let again = Twain::new().expect("reinitialization should succeed");
    assert!(!again.handle().is_null());
}

#[test]
#[serial]
fn test_numeric_array_round_trip() {
    require_library!();
    let _twain = Twain::new().expect("DTWAIN should initialize");

    let array = TwainArray::for_element::<i32>(4).expect("array creation");
    assert_eq!(array.count(), 4);

    let values: Vec<i32> = vec![10, 20, 30, 40];
    <i32 as dtwain::ArrayElement>::copy_to(&array, &values).expect("copy in");

    let mut back: Vec<i32> = Vec::new();
    copy_from_twain_array(&array, &mut back);
    assert_eq!(back, values);

    // Deep copy through the library, then diverge the original.
    let copy = array.clone();
    array.resize(2);
    assert_eq!(array.count(), 2);
    assert_eq!(copy.count(), 4);
}

/// Build a discrete LONG range (low..=up by step) through the native API.
fn make_long_range(low: i32, up: i32, step: i32) -> TwainArray {
    let api = dtwain_sys::api().expect("library availability checked by caller");
    let raw = unsafe { (api.DTWAIN_RangeCreate)(dtwain_sys::DTWAIN_ARRAYLONG) };
    assert!(!raw.is_null(), "DTWAIN_RangeCreate failed");
    let ok = unsafe { (api.DTWAIN_RangeSetAllLong)(raw, low, up, step, low, low) };
    assert_ne!(ok, 0, "DTWAIN_RangeSetAllLong failed");
    TwainArray::from_raw(raw)
}

#[test]
#[serial]
fn test_string_array_round_trip() {
    require_library!();
    let _twain = Twain::new().expect("DTWAIN should initialize");

    let array = TwainArray::for_element::<String>(3).expect("array creation");
    let formats = vec!["TIFF".to_string(), "PDF".to_string(), "BMP".to_string()];
    <String as dtwain::ArrayElement>::copy_to(&array, &formats).expect("copy in");

    let mut back: Vec<String> = Vec::new();
    copy_from_twain_array(&array, &mut back);
    assert_eq!(back, formats);
}

#[test]
#[serial]
fn test_frame_array_round_trip() {
    require_library!();
    let _twain = Twain::new().expect("DTWAIN should initialize");

    let array = TwainArray::for_element::<TwainFrame>(2).expect("array creation");
    let frames = vec![TwainFrame::new(0.0, 0.0, 8.5, 11.0), TwainFrame::uniform(1.0)];
    <TwainFrame as dtwain::ArrayElement>::copy_to(&array, &frames).expect("copy in");

    let mut back: Vec<TwainFrame> = Vec::new();
    copy_from_twain_array(&array, &mut back);
    assert_eq!(back, frames);
}

#[test]
#[serial]
fn test_range_expands_into_container_and_in_place() {
    require_library!();
    let _twain = Twain::new().expect("DTWAIN should initialize");

    let mut range = make_long_range(100, 500, 100);
    assert!(range.is_range());
    assert_eq!(range.expanded_count(), 5);

    // Expansion into a caller container leaves the range untouched.
    let mut values: Vec<i32> = Vec::new();
    assert!(range.expand_range_into(&mut values));
    assert_eq!(values, vec![100, 200, 300, 400, 500]);
    assert!(range.is_range());

    // In-place expansion swaps the handle for a discrete array.
    assert!(range.expand_range_replace());
    assert!(!range.is_range());
    assert_eq!(range.count(), 5);
    let mut replaced: Vec<i32> = Vec::new();
    copy_from_twain_array(&range, &mut replaced);
    assert_eq!(replaced, values);
}

#[test]
#[serial]
fn test_capability_array_from_source() {
    require_library!();
    let twain = Twain::new().expect("DTWAIN should initialize");
    let Ok(source) = twain.select_default_source() else {
        eprintln!("skipping: no default TWAIN source");
        return;
    };

    let resolutions = [150.0f64, 300.0, 600.0];
    let array =
        copy_to_twain_array(&source, dtwain_sys::DTWAIN_CV_ICAPXRESOLUTION, &resolutions[..])
            .expect("capability array");
    let mut back: Vec<f64> = Vec::new();
    copy_from_twain_array(&array, &mut back);
    assert_eq!(back, resolutions);
}

#[test]
#[serial]
fn test_logger_applies_to_file() {
    require_library!();
    let twain = Twain::new().expect("DTWAIN should initialize");
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("dtwain.log");

    let applied = LoggerCharacteristics::new()
        .enable(true)
        .set_destination(LoggerDestination::ToFile)
        .set_verbosity(LoggerVerbosity::Verbose2)
        .set_filename(path.to_string_lossy())
        .apply(&twain)
        .expect("apply should not hit a Rust-side error");
    assert!(applied);

    // Disabled configurations are a no-op regardless of the library.
    let skipped = LoggerCharacteristics::new().apply(&twain).expect("no-op");
    assert!(!skipped);
}
