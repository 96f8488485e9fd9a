//! Mapping between widget-local pixels and text positions.
//!
//! Rows are laid out top to bottom at a fixed row height, each starting at the
//! left padding. Columns are resolved by measuring row prefixes, so any
//! [`TextMeasurer`] works, including proportional ones.

use scrivener_render::{Point, TextMeasurer, TextStyle};
use scrivener_style::Theme;
use unicode_segmentation::UnicodeSegmentation;

use super::selection::CursorPosition;

/// Measurements shared by hit testing and painting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutMetrics {
    pub text_size: f32,
    /// Inset of the first row and of every row's first glyph.
    pub padding: f32,
    pub row_height: f32,
    pub style: TextStyle,
}

impl LayoutMetrics {
    /// Derive metrics from a theme. The row height is the height of `M`.
    pub fn from_theme(theme: &Theme, measurer: &dyn TextMeasurer, style: TextStyle) -> Self {
        let metrics = theme.metrics();
        let row_height = measurer.measure("M", metrics.text_size, style).height;
        Self {
            text_size: metrics.text_size,
            padding: metrics.padding,
            row_height,
            style,
        }
    }

    /// Width of `text` at these metrics.
    pub fn width_of(&self, measurer: &dyn TextMeasurer, text: &str) -> f32 {
        measurer.measure(text, self.text_size, self.style).width
    }
}

/// The row under `y`, clamped to `0..row_count`.
pub fn row_at(y: f32, row_count: usize, metrics: &LayoutMetrics) -> usize {
    let last = row_count.saturating_sub(1);
    if metrics.row_height <= 0.0 {
        return 0;
    }
    let row = ((y - metrics.padding) / metrics.row_height).floor();
    if row.is_nan() || row <= 0.0 {
        0
    } else {
        (row as usize).min(last)
    }
}

/// The column in `row` nearest to `x`.
///
/// The caret goes before a glyph when `x` lies on or before the glyph's
/// horizontal midpoint, and after it otherwise. Glyphs are grapheme clusters;
/// the returned column counts codepoints.
pub fn column_at(x: f32, row: &str, measurer: &dyn TextMeasurer, metrics: &LayoutMetrics) -> usize {
    let target = x - metrics.padding;
    if target <= 0.0 {
        return 0;
    }

    let mut column = 0;
    let mut left = 0.0;
    for (offset, cluster) in row.grapheme_indices(true) {
        let end = offset + cluster.len();
        let right = metrics.width_of(measurer, &row[..end]);
        if target <= (left + right) / 2.0 {
            return column;
        }
        column += cluster.chars().count();
        left = right;
    }
    column
}

/// Map a widget-local point onto a text position.
///
/// Points above or left of the text clamp to its start; points past a row's
/// end clamp to that row's end, and points below the last row land on it.
pub fn pixel_to_position<S: AsRef<str>>(
    point: Point,
    rows: &[S],
    measurer: &dyn TextMeasurer,
    metrics: &LayoutMetrics,
) -> CursorPosition {
    let row = row_at(point.y, rows.len(), metrics);
    let column = rows
        .get(row)
        .map_or(0, |text| column_at(point.x, text.as_ref(), measurer, metrics));
    CursorPosition::new(row, column)
}

/// The top-left corner of the caret at `position`.
pub fn position_to_pixel<S: AsRef<str>>(
    position: CursorPosition,
    rows: &[S],
    measurer: &dyn TextMeasurer,
    metrics: &LayoutMetrics,
) -> Point {
    let prefix_width = rows.get(position.row).map_or(0.0, |text| {
        let prefix: String = text.as_ref().chars().take(position.column).collect();
        metrics.width_of(measurer, &prefix)
    });
    Point::new(
        metrics.padding + prefix_width,
        metrics.padding + position.row as f32 * metrics.row_height,
    )
}
