//! Row layout cache and painting for [`Entry`].

use scrivener_core::logging::span_names;
use scrivener_render::{Rect, Stroke, TextRun, TextStyle};

use super::position::{LayoutMetrics, position_to_pixel};
use super::text_model::TextBuffer;
use super::{EchoMode, Entry};
use crate::widget::context::WidgetContext;
use crate::widget::traits::PaintContext;

/// Glyph drawn in place of every codepoint in password mode.
pub const PASSWORD_CHAR: char = '•';

/// The rows an entry displays, with the metrics they were laid out at.
///
/// Masked rows keep one glyph per codepoint, so columns computed against the
/// display rows are columns of the real text.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct EntryLayout {
    pub rows: Vec<String>,
    pub metrics: LayoutMetrics,
}

impl EntryLayout {
    pub fn build(buffer: &TextBuffer, echo_mode: EchoMode, ctx: &WidgetContext) -> Self {
        let metrics = LayoutMetrics::from_theme(&ctx.theme, ctx.measurer.as_ref(), TextStyle::REGULAR);
        let rows = match echo_mode {
            EchoMode::Normal => buffer.rows(),
            EchoMode::Password => (0..buffer.row_count())
                .map(|row| std::iter::repeat_n(PASSWORD_CHAR, buffer.row_len(row)).collect())
                .collect(),
        };
        Self { rows, metrics }
    }

    /// Width of the first `column` codepoints of `row`.
    fn prefix_width(&self, ctx: &WidgetContext, row: usize, column: usize) -> f32 {
        let prefix: String = self
            .rows
            .get(row)
            .map(|text| text.chars().take(column).collect())
            .unwrap_or_default();
        self.metrics.width_of(ctx.measurer.as_ref(), &prefix)
    }
}

impl Entry {
    /// Run `f` against the current layout, building it if the cache is cold.
    pub(super) fn with_layout<R>(&self, f: impl FnOnce(&EntryLayout) -> R) -> R {
        if let Some(layout) = self.layout.read().as_ref() {
            return f(layout);
        }
        let layout = EntryLayout::build(&self.buffer, self.echo_mode, &self.ctx);
        let result = f(&layout);
        *self.layout.write() = Some(layout);
        result
    }

    pub(super) fn invalidate_layout(&self) {
        *self.layout.write() = None;
    }

    pub(super) fn paint_entry(&self, ctx: &mut PaintContext<'_>) {
        let _span = tracing::trace_span!(span_names::PAINT, widget = "Entry").entered();
        let theme = &self.ctx.theme;
        let palette = &theme.palette;
        let rect = ctx.rect();
        let focused = self.base.has_focus();

        ctx.renderer().fill_rect(rect, palette.input_background);
        let border = if focused { palette.primary } else { palette.border };
        ctx.renderer()
            .stroke_rect(rect, &Stroke::new(border, theme.metrics().border_width));

        self.with_layout(|layout| {
            let metrics = &layout.metrics;
            let row_y = |row: usize| metrics.padding + row as f32 * metrics.row_height;

            if self.buffer.is_empty() && !self.placeholder.is_empty() {
                ctx.renderer().draw_text(TextRun {
                    origin: (metrics.padding, row_y(0)).into(),
                    text: self.placeholder.clone(),
                    font_size: metrics.text_size,
                    style: metrics.style,
                    color: palette.text_disabled,
                });
            }

            if focused && let Some((low, high)) = self.selection.range() {
                for row in low.row..=high.row {
                    let start = if row == low.row { low.column } else { 0 };
                    let end = if row == high.row {
                        high.column
                    } else {
                        self.buffer.row_len(row)
                    };
                    let x0 = layout.prefix_width(&self.ctx, row, start);
                    let x1 = layout.prefix_width(&self.ctx, row, end);
                    if x1 > x0 {
                        ctx.renderer().fill_rect(
                            Rect::new(metrics.padding + x0, row_y(row), x1 - x0, metrics.row_height),
                            palette.selection,
                        );
                    }
                }
            }

            let color = if self.base.is_enabled() {
                palette.text_primary
            } else {
                palette.text_disabled
            };
            for (row, text) in layout.rows.iter().enumerate() {
                if text.is_empty() {
                    continue;
                }
                ctx.renderer().draw_text(TextRun {
                    origin: (metrics.padding, row_y(row)).into(),
                    text: text.clone(),
                    font_size: metrics.text_size,
                    style: metrics.style,
                    color,
                });
            }

            if focused {
                let caret = position_to_pixel(self.cursor, &layout.rows, self.ctx.measurer.as_ref(), metrics);
                ctx.renderer().fill_rect(
                    Rect::new(caret.x, caret.y, theme.metrics().cursor_width, metrics.row_height),
                    palette.primary,
                );
            }
        });
    }
}
