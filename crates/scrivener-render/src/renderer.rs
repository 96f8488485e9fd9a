//! Core renderer trait defining the 2D drawing interface.
//!
//! Widgets paint through [`Renderer`]. The backend that turns these calls into
//! pixels lives outside this crate; [`DisplayList`] records the calls so that
//! headless hosts and tests can inspect what a widget drew.

use crate::text::TextStyle;
use crate::types::{Color, Point, Rect};

/// Stroke parameters for outlines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    /// Stroke color.
    pub color: Color,
    /// Line width in pixels.
    pub width: f32,
}

impl Stroke {
    /// Create a new stroke.
    pub fn new(color: Color, width: f32) -> Self {
        Self { color, width }
    }
}

/// A run of text to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    /// Top-left of the line box.
    pub origin: Point,
    /// The text to draw.
    pub text: String,
    /// Font size in points.
    pub font_size: f32,
    /// Style flags.
    pub style: TextStyle,
    /// Fill color.
    pub color: Color,
}

/// The core 2D rendering trait.
///
/// The renderer keeps a stack of translations so that containers can paint
/// children in child-local coordinates:
///
/// ```ignore
/// renderer.save();
/// renderer.translate(10.0, 10.0);
/// renderer.fill_rect(rect, Color::WHITE);
/// renderer.restore();
/// ```
pub trait Renderer {
    /// Save the current translation.
    fn save(&mut self);

    /// Restore the previously saved translation.
    fn restore(&mut self);

    /// Translate subsequent drawing.
    fn translate(&mut self, dx: f32, dy: f32);

    // =========================================================================
    // Drawing
    // =========================================================================

    /// Fill a rectangle with a solid color.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Outline a rectangle.
    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke);

    /// Draw a run of text.
    fn draw_text(&mut self, run: TextRun);
}

/// A recorded drawing command, in device coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// A solid rectangle.
    FillRect { rect: Rect, color: Color },
    /// A rectangle outline.
    StrokeRect { rect: Rect, stroke: Stroke },
    /// A run of text.
    Text(TextRun),
}

/// A [`Renderer`] that records commands instead of drawing them.
#[derive(Debug, Default)]
pub struct DisplayList {
    commands: Vec<DrawCommand>,
    offset: Point,
    stack: Vec<Point>,
}

impl DisplayList {
    /// Create an empty display list.
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded commands, in paint order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Text runs only, in paint order.
    pub fn text_runs(&self) -> impl Iterator<Item = &TextRun> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Text(run) => Some(run),
            _ => None,
        })
    }

    /// Number of recorded commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Discard all commands and reset the translation.
    pub fn clear(&mut self) {
        self.commands.clear();
        self.offset = Point::ZERO;
        self.stack.clear();
    }

    fn map_rect(&self, rect: Rect) -> Rect {
        Rect {
            origin: rect.origin.offset(self.offset.x, self.offset.y),
            size: rect.size,
        }
    }
}

impl Renderer for DisplayList {
    fn save(&mut self) {
        self.stack.push(self.offset);
    }

    fn restore(&mut self) {
        if let Some(offset) = self.stack.pop() {
            self.offset = offset;
        }
    }

    fn translate(&mut self, dx: f32, dy: f32) {
        self.offset = self.offset.offset(dx, dy);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let rect = self.map_rect(rect);
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke) {
        let rect = self.map_rect(rect);
        self.commands.push(DrawCommand::StrokeRect {
            rect,
            stroke: *stroke,
        });
    }

    fn draw_text(&mut self, mut run: TextRun) {
        run.origin = run.origin.offset(self.offset.x, self.offset.y);
        self.commands.push(DrawCommand::Text(run));
    }
}
