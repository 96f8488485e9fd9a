//! Widget base implementation.
//!
//! This module provides [`WidgetBase`], the common state every widget embeds:
//! identity, geometry, visibility, enabled and focus flags, and the link to
//! the canvas refresh queue.

use std::sync::Arc;

use parking_lot::Mutex;
use scrivener_core::ObjectId;
use scrivener_render::{Point, Rect, Size};

/// A shared queue of widgets waiting to be redrawn.
///
/// Requests are fire-and-forget: a widget pushes its id and carries on, and
/// the host drains the queue when it schedules the next frame. Duplicate
/// requests for the same widget collapse into one.
#[derive(Debug, Clone, Default)]
pub struct RefreshHandle {
    pending: Arc<Mutex<Vec<ObjectId>>>,
}

impl RefreshHandle {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for `id` to be redrawn.
    pub fn request(&self, id: ObjectId) {
        let mut pending = self.pending.lock();
        if !pending.contains(&id) {
            pending.push(id);
        }
    }

    /// Take every pending request, oldest first.
    pub fn drain(&self) -> Vec<ObjectId> {
        std::mem::take(&mut *self.pending.lock())
    }

    /// Whether any request is waiting.
    pub fn is_pending(&self) -> bool {
        !self.pending.lock().is_empty()
    }
}

/// The base implementation for all widgets.
///
/// Widget implementations include this as a field and delegate common
/// operations to it.
#[derive(Debug)]
pub struct WidgetBase {
    id: ObjectId,
    /// Position relative to the canvas, and size.
    geometry: Rect,
    visible: bool,
    /// Whether the widget accepts input.
    enabled: bool,
    focusable: bool,
    focused: bool,
    needs_repaint: bool,
    refresh: Option<RefreshHandle>,
}

impl Default for WidgetBase {
    fn default() -> Self {
        Self::new()
    }
}

impl WidgetBase {
    /// Create a new widget base with a fresh id.
    pub fn new() -> Self {
        Self {
            id: ObjectId::next(),
            geometry: Rect::ZERO,
            visible: true,
            enabled: true,
            focusable: false,
            focused: false,
            needs_repaint: true,
            refresh: None,
        }
    }

    /// Get the widget's unique object ID.
    #[inline]
    pub fn object_id(&self) -> ObjectId {
        self.id
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// The widget's geometry in canvas coordinates.
    #[inline]
    pub fn geometry(&self) -> Rect {
        self.geometry
    }

    /// Set the widget's geometry.
    pub fn set_geometry(&mut self, rect: Rect) {
        if self.geometry != rect {
            self.geometry = rect;
            self.update();
        }
    }

    /// The widget's top-left corner.
    #[inline]
    pub fn pos(&self) -> Point {
        self.geometry.origin
    }

    /// The widget's size.
    #[inline]
    pub fn size(&self) -> Size {
        self.geometry.size
    }

    /// Resize the widget, keeping its position.
    pub fn set_size(&mut self, size: Size) {
        let origin = self.geometry.origin;
        self.set_geometry(Rect { origin, size });
    }

    /// The widget's rectangle in local coordinates (origin is 0,0).
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_size(self.geometry.size)
    }

    /// Map a canvas point into local coordinates.
    #[inline]
    pub fn map_from_canvas(&self, point: Point) -> Point {
        Point::new(point.x - self.geometry.origin.x, point.y - self.geometry.origin.y)
    }

    /// Check if a canvas point lies inside the widget.
    #[inline]
    pub fn contains_point(&self, point: Point) -> bool {
        self.geometry.contains(point)
    }

    // =========================================================================
    // State
    // =========================================================================

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        if self.visible != visible {
            self.visible = visible;
            self.update();
        }
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            self.enabled = enabled;
            self.update();
        }
    }

    #[inline]
    pub fn is_focusable(&self) -> bool {
        self.focusable
    }

    pub fn set_focusable(&mut self, focusable: bool) {
        self.focusable = focusable;
    }

    /// Whether the widget currently has keyboard focus.
    #[inline]
    pub fn has_focus(&self) -> bool {
        self.focused
    }

    /// Set by the canvas when focus moves.
    pub fn set_focused(&mut self, focused: bool) {
        if self.focused != focused {
            self.focused = focused;
            self.update();
        }
    }

    // =========================================================================
    // Repaint
    // =========================================================================

    /// Whether the widget has changed since it was last painted.
    #[inline]
    pub fn needs_repaint(&self) -> bool {
        self.needs_repaint
    }

    /// Schedule a repaint and notify the owning canvas, if any.
    pub fn update(&mut self) {
        self.needs_repaint = true;
        if let Some(refresh) = &self.refresh {
            refresh.request(self.id);
        }
    }

    /// Mark the widget as painted.
    pub fn clear_repaint(&mut self) {
        self.needs_repaint = false;
    }

    /// Attach (or detach) the queue that repaint requests go to.
    pub fn set_refresh_handle(&mut self, handle: Option<RefreshHandle>) {
        self.refresh = handle;
    }
}
