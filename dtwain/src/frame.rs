//! Rectangular acquisition frames

use serde::{Deserialize, Serialize};

/// A rectangular frame in source units (left, top, right, bottom).
///
/// Pure value type used for acquisition areas and frame-valued capability
/// arrays. Arithmetic ordering of the bounds (left <= right, top <= bottom)
/// is the caller's responsibility; DTWAIN itself does not enforce it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TwainFrame {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl TwainFrame {
    /// Create a frame from its four bounds.
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Create a frame with all four bounds set to the same value.
    pub fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }
}

impl From<(f64, f64, f64, f64)> for TwainFrame {
    fn from((left, top, right, bottom): (f64, f64, f64, f64)) -> Self {
        Self::new(left, top, right, bottom)
    }
}

impl From<TwainFrame> for (f64, f64, f64, f64) {
    fn from(frame: TwainFrame) -> Self {
        (frame.left, frame.top, frame.right, frame.bottom)
    }
}
