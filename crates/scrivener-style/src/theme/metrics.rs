//! Size metrics shared by text widgets.

/// Sizes, in logical pixels, that text widgets lay themselves out with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemeMetrics {
    /// Font size for body text.
    pub text_size: f32,
    /// Inner padding between a widget's border and its text.
    pub padding: f32,
    /// Width of the text caret.
    pub cursor_width: f32,
    /// Width of input borders.
    pub border_width: f32,
    /// Rows shown by default in a multi-line entry.
    pub multi_line_rows: u32,
}

impl ThemeMetrics {
    /// Default metrics: 14pt text with 4px padding.
    pub const DEFAULT: Self = Self {
        text_size: 14.0,
        padding: 4.0,
        cursor_width: 2.0,
        border_width: 1.0,
        multi_line_rows: 3,
    };
}

impl Default for ThemeMetrics {
    fn default() -> Self {
        Self::DEFAULT
    }
}
