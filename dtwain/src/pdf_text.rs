//! PDF text overlay descriptors

use std::ffi::CString;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TwainError};
use crate::source::TwainSource;
use dtwain_sys::*;

/// How overlay text glyphs are painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PdfRenderMode {
    #[default]
    Fill,
    Stroke,
    FillStroke,
    Invisible,
}

impl PdfRenderMode {
    /// Convert to the native render mode constant.
    pub fn to_ffi(self) -> LONG {
        match self {
            PdfRenderMode::Fill => DTWAIN_PDFRENDER_FILL,
            PdfRenderMode::Stroke => DTWAIN_PDFRENDER_STROKE,
            PdfRenderMode::FillStroke => DTWAIN_PDFRENDER_FILLSTROKE,
            PdfRenderMode::Invisible => DTWAIN_PDFRENDER_INVISIBLE,
        }
    }
}

/// Which produced pages receive the overlay text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PdfPrintPage {
    AllPages,
    EvenPages,
    OddPages,
    FirstPage,
    LastPage,
    #[default]
    CurrentPage,
}

impl PdfPrintPage {
    /// Convert to the native page selector value.
    pub fn to_ffi(self) -> LONG {
        match self {
            PdfPrintPage::AllPages => DTWAIN_PDFTEXT_ALLPAGES,
            PdfPrintPage::EvenPages => DTWAIN_PDFTEXT_EVENPAGES,
            PdfPrintPage::OddPages => DTWAIN_PDFTEXT_ODDPAGES,
            PdfPrintPage::FirstPage => DTWAIN_PDFTEXT_FIRSTPAGE,
            PdfPrintPage::LastPage => DTWAIN_PDFTEXT_LASTPAGE,
            PdfPrintPage::CurrentPage => DTWAIN_PDFTEXT_CURRENTPAGE,
        }
    }
}

/// Per-element attributes the PDF writer should ignore in favor of its
/// global defaults.
///
/// `IgnoreNone` is a sentinel: when it appears anywhere in an element's
/// ignore list, no ignore bits are emitted at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PdfPageIgnore {
    #[default]
    IgnoreNone,
    Scaling,
    CharSpacing,
    WordSpacing,
    RenderMode,
    RgbColor,
    FontSize,
    IgnoreAll,
}

impl PdfPageIgnore {
    /// Convert to the native ignore flag value.
    pub fn to_ffi(self) -> LONG {
        match self {
            PdfPageIgnore::IgnoreNone => 0,
            PdfPageIgnore::Scaling => DTWAIN_PDFTEXT_NOSCALING,
            PdfPageIgnore::CharSpacing => DTWAIN_PDFTEXT_NOCHARSPACING,
            PdfPageIgnore::WordSpacing => DTWAIN_PDFTEXT_NOWORDSPACING,
            PdfPageIgnore::RenderMode => DTWAIN_PDFTEXT_NORENDERMODE,
            PdfPageIgnore::RgbColor => DTWAIN_PDFTEXT_NORGBCOLOR,
            PdfPageIgnore::FontSize => DTWAIN_PDFTEXT_NOFONTSIZE,
            PdfPageIgnore::IgnoreAll => DTWAIN_PDFTEXT_IGNOREALL,
        }
    }
}

/// Pack red, green, and blue channels into the COLORREF-style value the
/// native PDF writer takes.
pub fn rgb(r: u8, g: u8, b: u8) -> u32 {
    (r as u32) | ((g as u32) << 8) | ((b as u32) << 16)
}

/// Saturate a `u32` into the native signed 32-bit type instead of wrapping.
fn clamp_long(value: u32) -> LONG {
    LONG::try_from(value).unwrap_or(LONG::MAX)
}

/// A text overlay written onto pages of a PDF produced during acquisition.
///
/// Builder-style descriptor: chain the setters, then call
/// [`write`](PdfTextElement::write) to forward everything to the native PDF
/// writer in one call.
///
/// # Example
///
/// ```no_run
/// use dtwain::{PdfPrintPage, PdfTextElement, Twain};
///
/// let twain = Twain::new()?;
/// let source = twain.select_default_source()?;
///
/// let ok = PdfTextElement::new()
///     .set_text("CONFIDENTIAL")
///     .set_position(100, 700)
///     .set_font_size(24.0)
///     .set_which_pages(PdfPrintPage::AllPages)
///     .write(&source)?;
/// # Ok::<(), dtwain::TwainError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PdfTextElement {
    text: String,
    position: (u32, u32),
    font: String,
    font_size: f64,
    color: u32,
    render_mode: PdfRenderMode,
    scaling: f64,
    char_spacing: f64,
    word_spacing: f64,
    stroke_width: u32,
    print_page: PdfPrintPage,
    ignore_flags: Vec<PdfPageIgnore>,
}

impl Default for PdfTextElement {
    fn default() -> Self {
        Self {
            text: String::new(),
            position: (0, 0),
            font: "Helvetica".to_string(),
            font_size: 10.0,
            color: rgb(0, 0, 0),
            render_mode: PdfRenderMode::Fill,
            scaling: 100.0,
            char_spacing: 0.0,
            word_spacing: 0.0,
            stroke_width: 0,
            print_page: PdfPrintPage::CurrentPage,
            ignore_flags: vec![PdfPageIgnore::IgnoreNone],
        }
    }
}

impl PdfTextElement {
    /// Create a descriptor with default settings (Helvetica 10pt, black,
    /// fill mode, current page).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the overlay text.
    pub fn set_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set the text position in PDF page coordinates.
    ///
    /// The native call takes signed 32-bit coordinates; values above
    /// `i32::MAX` saturate when written.
    pub fn set_position(mut self, x: u32, y: u32) -> Self {
        self.position = (x, y);
        self
    }

    /// Set the font name.
    pub fn set_font(mut self, font: impl Into<String>) -> Self {
        self.font = font.into();
        self
    }

    /// Set the font size in points.
    pub fn set_font_size(mut self, size: f64) -> Self {
        self.font_size = size;
        self
    }

    /// Set the text color (see [`rgb`]).
    pub fn set_color(mut self, color: u32) -> Self {
        self.color = color;
        self
    }

    /// Set the glyph render mode.
    pub fn set_render_mode(mut self, mode: PdfRenderMode) -> Self {
        self.render_mode = mode;
        self
    }

    /// Set horizontal scaling as a percentage (100.0 = no scaling).
    pub fn set_scaling(mut self, scaling: f64) -> Self {
        self.scaling = scaling;
        self
    }

    /// Set extra spacing between characters, in points.
    pub fn set_char_spacing(mut self, spacing: f64) -> Self {
        self.char_spacing = spacing;
        self
    }

    /// Set extra spacing between words, in points.
    pub fn set_word_spacing(mut self, spacing: f64) -> Self {
        self.word_spacing = spacing;
        self
    }

    /// Set the stroke width for stroked render modes. Values above
    /// `i32::MAX` saturate when written.
    pub fn set_stroke_width(mut self, width: u32) -> Self {
        self.stroke_width = width;
        self
    }

    /// Select which pages receive the text.
    pub fn set_which_pages(mut self, pages: PdfPrintPage) -> Self {
        self.print_page = pages;
        self
    }

    /// Replace the list of ignore flags.
    pub fn set_ignore_flags(mut self, flags: Vec<PdfPageIgnore>) -> Self {
        self.ignore_flags = flags;
        self
    }

    /// Get the overlay text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the text position.
    pub fn position(&self) -> (u32, u32) {
        self.position
    }

    /// Get the font name.
    pub fn font(&self) -> &str {
        &self.font
    }

    /// Get the font size in points.
    pub fn font_size(&self) -> f64 {
        self.font_size
    }

    /// Get the text color.
    pub fn color(&self) -> u32 {
        self.color
    }

    /// Get the glyph render mode.
    pub fn render_mode(&self) -> PdfRenderMode {
        self.render_mode
    }

    /// Get the horizontal scaling percentage.
    pub fn scaling(&self) -> f64 {
        self.scaling
    }

    /// Get the character spacing.
    pub fn char_spacing(&self) -> f64 {
        self.char_spacing
    }

    /// Get the word spacing.
    pub fn word_spacing(&self) -> f64 {
        self.word_spacing
    }

    /// Get the stroke width.
    pub fn stroke_width(&self) -> u32 {
        self.stroke_width
    }

    /// Get the page selector.
    pub fn which_pages(&self) -> PdfPrintPage {
        self.print_page
    }

    /// Get the ignore flags.
    pub fn ignore_flags(&self) -> &[PdfPageIgnore] {
        &self.ignore_flags
    }

    /// Get a mutable reference to the ignore flags.
    pub fn ignore_flags_mut(&mut self) -> &mut Vec<PdfPageIgnore> {
        &mut self.ignore_flags
    }

    /// Assemble the native flags mask: the OR of the ignore flags, unless
    /// the sentinel `IgnoreNone` appears in the list, OR'd with the page
    /// selector.
    pub fn flags(&self) -> LONG {
        let mut flags: LONG = 0;
        if !self.ignore_flags.contains(&PdfPageIgnore::IgnoreNone) {
            for flag in &self.ignore_flags {
                flags |= flag.to_ffi();
            }
        }
        flags | self.print_page.to_ffi()
    }

    /// Forward every field to the native PDF writer for the given source.
    ///
    /// The boolean result of the native call passes through unchanged.
    pub fn write(&self, source: &TwainSource) -> Result<bool> {
        let api = crate::api()?;
        let text =
            CString::new(self.text.as_str()).map_err(|_| TwainError::InvalidString(self.text.clone()))?;
        let font =
            CString::new(self.font.as_str()).map_err(|_| TwainError::InvalidString(self.font.clone()))?;
        let ok = unsafe {
            (api.DTWAIN_AddPDFTextA)(
                source.handle(),
                text.as_ptr(),
                clamp_long(self.position.0),
                clamp_long(self.position.1),
                font.as_ptr(),
                self.font_size,
                self.color as LONG,
                self.render_mode.to_ffi(),
                self.scaling,
                self.char_spacing,
                self.word_spacing,
                clamp_long(self.stroke_width),
                self.flags(),
            )
        };
        Ok(ok != 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let element = PdfTextElement::new();
        assert_eq!(element.font(), "Helvetica");
        assert_eq!(element.font_size(), 10.0);
        assert_eq!(element.color(), rgb(0, 0, 0));
        assert_eq!(element.render_mode(), PdfRenderMode::Fill);
        assert_eq!(element.scaling(), 100.0);
        assert_eq!(element.which_pages(), PdfPrintPage::CurrentPage);
        assert_eq!(element.ignore_flags(), &[PdfPageIgnore::IgnoreNone]);
    }

    #[test]
    fn test_setters_chain_last_write_wins() {
        let element = PdfTextElement::new()
            .set_text("draft")
            .set_text("final")
            .set_position(10, 20)
            .set_font("Courier")
            .set_font_size(12.0)
            .set_font_size(14.0)
            .set_color(rgb(255, 0, 0));
        assert_eq!(element.text(), "final");
        assert_eq!(element.position(), (10, 20));
        assert_eq!(element.font(), "Courier");
        assert_eq!(element.font_size(), 14.0);
        assert_eq!(element.color(), rgb(255, 0, 0));
    }

    #[test]
    fn test_flags_with_default_sentinel() {
        // The default list holds only IgnoreNone: just the page selector.
        let element = PdfTextElement::new();
        assert_eq!(element.flags(), DTWAIN_PDFTEXT_CURRENTPAGE);
    }

    #[test]
    fn test_flags_or_ignore_bits() {
        let element = PdfTextElement::new()
            .set_which_pages(PdfPrintPage::AllPages)
            .set_ignore_flags(vec![PdfPageIgnore::Scaling, PdfPageIgnore::FontSize]);
        assert_eq!(
            element.flags(),
            DTWAIN_PDFTEXT_ALLPAGES | DTWAIN_PDFTEXT_NOSCALING | DTWAIN_PDFTEXT_NOFONTSIZE
        );
    }

    #[test]
    fn test_sentinel_suppresses_other_ignore_bits() {
        let element = PdfTextElement::new().set_ignore_flags(vec![
            PdfPageIgnore::Scaling,
            PdfPageIgnore::IgnoreNone,
            PdfPageIgnore::FontSize,
        ]);
        assert_eq!(element.flags(), DTWAIN_PDFTEXT_CURRENTPAGE);
    }

    #[test]
    fn test_ignore_all_flag() {
        let element = PdfTextElement::new()
            .set_which_pages(PdfPrintPage::EvenPages)
            .set_ignore_flags(vec![PdfPageIgnore::IgnoreAll]);
        assert_eq!(
            element.flags(),
            DTWAIN_PDFTEXT_EVENPAGES | DTWAIN_PDFTEXT_IGNOREALL
        );
    }

    #[test]
    fn test_clamp_long_saturates_instead_of_wrapping() {
        assert_eq!(clamp_long(0), 0);
        assert_eq!(clamp_long(7), 7);
        assert_eq!(clamp_long(i32::MAX as u32), i32::MAX);
        assert_eq!(clamp_long(i32::MAX as u32 + 1), i32::MAX);
        assert_eq!(clamp_long(u32::MAX), i32::MAX);
    }

    #[test]
    fn test_rgb_packs_colorref_order() {
        assert_eq!(rgb(0, 0, 0), 0);
        assert_eq!(rgb(255, 0, 0), 0x0000FF);
        assert_eq!(rgb(0, 255, 0), 0x00FF00);
        assert_eq!(rgb(0, 0, 255), 0xFF0000);
    }
}
