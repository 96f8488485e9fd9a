//! Core widget trait definitions.
//!
//! - [`Widget`] - Base trait for all UI elements
//! - [`PaintContext`] - Rendering context passed to [`Widget::paint`]

use scrivener_core::Object;
use scrivener_render::{Point, Rect, Renderer, Size};

use super::base::WidgetBase;
use super::cursor::CursorShape;
use super::events::WidgetEvent;
use super::geometry::SizeHint;

/// Context provided during widget painting.
///
/// Wraps a renderer already translated to the widget's origin, together with
/// the widget's local rectangle.
pub struct PaintContext<'a> {
    renderer: &'a mut dyn Renderer,
    widget_rect: Rect,
}

impl<'a> PaintContext<'a> {
    /// Create a new paint context.
    pub fn new(renderer: &'a mut dyn Renderer, widget_rect: Rect) -> Self {
        Self {
            renderer,
            widget_rect,
        }
    }

    /// The renderer to draw with.
    #[inline]
    pub fn renderer(&mut self) -> &mut dyn Renderer {
        &mut *self.renderer
    }

    /// The widget's local rectangle (origin always 0,0).
    #[inline]
    pub fn rect(&self) -> Rect {
        self.widget_rect
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.widget_rect.width()
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.widget_rect.height()
    }
}

/// The base trait for all widgets.
///
/// Implementors provide access to their [`WidgetBase`], a [`SizeHint`] and a
/// paint routine. Geometry, visibility and focus accessors delegate to the
/// base by default; input arrives through [`event`](Self::event).
///
/// ```ignore
/// impl Widget for ColorBox {
///     fn widget_base(&self) -> &WidgetBase { &self.base }
///     fn widget_base_mut(&mut self) -> &mut WidgetBase { &mut self.base }
///
///     fn size_hint(&self) -> SizeHint {
///         SizeHint::from_dimensions(100.0, 100.0)
///     }
///
///     fn paint(&self, ctx: &mut PaintContext<'_>) {
///         let rect = ctx.rect();
///         ctx.renderer().fill_rect(rect, self.color);
///     }
/// }
/// ```
pub trait Widget: Object + Send + Sync {
    // =========================================================================
    // Required Methods
    // =========================================================================

    /// Get a reference to the widget's base.
    fn widget_base(&self) -> &WidgetBase;

    /// Get a mutable reference to the widget's base.
    fn widget_base_mut(&mut self) -> &mut WidgetBase;

    /// The widget's preferred, minimum and maximum size.
    fn size_hint(&self) -> SizeHint;

    /// Paint the widget.
    ///
    /// The renderer is translated so that (0, 0) is the widget's top-left.
    fn paint(&self, ctx: &mut PaintContext<'_>);

    // =========================================================================
    // Geometry
    // =========================================================================

    fn geometry(&self) -> Rect {
        self.widget_base().geometry()
    }

    fn set_geometry(&mut self, rect: Rect) {
        self.widget_base_mut().set_geometry(rect);
    }

    fn pos(&self) -> Point {
        self.widget_base().pos()
    }

    fn size(&self) -> Size {
        self.widget_base().size()
    }

    fn resize(&mut self, size: Size) {
        self.widget_base_mut().set_size(size);
    }

    // =========================================================================
    // State
    // =========================================================================

    fn is_visible(&self) -> bool {
        self.widget_base().is_visible()
    }

    fn is_enabled(&self) -> bool {
        self.widget_base().is_enabled()
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.widget_base_mut().set_enabled(enabled);
    }

    /// Whether a primary click should give this widget focus.
    fn accepts_click_focus(&self) -> bool {
        let base = self.widget_base();
        base.is_focusable() && base.is_enabled() && base.is_visible()
    }

    fn has_focus(&self) -> bool {
        self.widget_base().has_focus()
    }

    /// The pointer shape to show while hovering the widget.
    fn cursor_shape(&self) -> CursorShape {
        CursorShape::Arrow
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Handle an event. Returns `true` if the event was consumed.
    fn event(&mut self, _event: &mut WidgetEvent) -> bool {
        false
    }
}
