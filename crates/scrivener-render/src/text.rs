//! Text measurement.
//!
//! Widgets never resolve fonts themselves. They ask a [`TextMeasurer`] for the
//! bounding box of a string and lay text out from those numbers, so hosts can
//! plug in a real shaping engine while tests use [`MonospaceMeasurer`].

use unicode_segmentation::UnicodeSegmentation;

use crate::types::Size;

/// Style flags that influence measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextStyle {
    /// Bold weight.
    pub bold: bool,
    /// Italic slant.
    pub italic: bool,
    /// Fixed-width face.
    pub monospace: bool,
}

impl TextStyle {
    /// Regular upright text.
    pub const REGULAR: Self = Self {
        bold: false,
        italic: false,
        monospace: false,
    };

    /// Fixed-width text.
    pub const MONOSPACE: Self = Self {
        bold: false,
        italic: false,
        monospace: true,
    };
}

/// Computes the bounding box of a run of text.
///
/// Implementations must be pure: the same input always yields the same size,
/// and the width of a prefix never exceeds the width of the whole string.
pub trait TextMeasurer: Send + Sync {
    /// Measure `text` at `font_size` points.
    ///
    /// The height is the line height for the font even when `text` is empty.
    fn measure(&self, text: &str, font_size: f32, style: TextStyle) -> Size;
}

/// A measurer that gives every grapheme cluster the same advance.
///
/// Useful for headless hosts and deterministic tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasurer {
    advance_ratio: f32,
    line_height_ratio: f32,
}

impl MonospaceMeasurer {
    /// Create a measurer with explicit ratios relative to the font size.
    pub fn new(advance_ratio: f32, line_height_ratio: f32) -> Self {
        Self {
            advance_ratio: advance_ratio.max(0.0),
            line_height_ratio: line_height_ratio.max(0.0),
        }
    }

    /// Advance of a single grapheme at `font_size`.
    pub fn advance(&self, font_size: f32) -> f32 {
        font_size * self.advance_ratio
    }

    /// Line height at `font_size`.
    pub fn line_height(&self, font_size: f32) -> f32 {
        font_size * self.line_height_ratio
    }
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self::new(0.5, 1.25)
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn measure(&self, text: &str, font_size: f32, _style: TextStyle) -> Size {
        let clusters = text.graphemes(true).count();
        Size::new(
            clusters as f32 * self.advance(font_size),
            self.line_height(font_size),
        )
    }
}

static_assertions::assert_impl_all!(MonospaceMeasurer: Send, Sync);
