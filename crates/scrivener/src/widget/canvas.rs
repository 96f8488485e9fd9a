//! The canvas a widget tree is drawn into.
//!
//! A [`Canvas`] owns one content widget, tracks which widget holds keyboard
//! focus, and collects refresh requests. Hosts feed it input through
//! [`dispatch`](Canvas::dispatch), drain [`take_refreshes`](Canvas::take_refreshes)
//! when scheduling a frame, and call [`paint`](Canvas::paint) to draw.

use std::any::Any;
use std::fmt;

use scrivener_core::ObjectId;
use scrivener_core::logging::{span_names, targets};
use scrivener_render::{Rect, Renderer, Size};

use super::base::RefreshHandle;
use super::events::{
    FocusInEvent, FocusOutEvent, FocusReason, KeyPressEvent, MouseButton, WidgetEvent,
};
use super::traits::{PaintContext, Widget};

type KeyHook = Box<dyn FnMut(&KeyPressEvent) + Send + Sync>;

/// A drawing surface holding a single content widget.
pub struct Canvas {
    content: Option<Box<dyn Widget>>,
    focused: Option<ObjectId>,
    /// Set while a pointer press on the content has not been released.
    pointer_grab: bool,
    size: Size,
    scale: f32,
    on_key_down: Option<KeyHook>,
    refresh: RefreshHandle,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    /// Create an empty canvas at scale 1.0.
    pub fn new() -> Self {
        Self {
            content: None,
            focused: None,
            pointer_grab: false,
            size: Size::ZERO,
            scale: 1.0,
            on_key_down: None,
            refresh: RefreshHandle::new(),
        }
    }

    // =========================================================================
    // Content
    // =========================================================================

    /// The content widget, if any.
    pub fn content(&self) -> Option<&dyn Widget> {
        self.content.as_deref()
    }

    /// Mutable access to the content widget.
    pub fn content_mut(&mut self) -> Option<&mut dyn Widget> {
        match self.content.as_mut() {
            Some(content) => Some(content.as_mut()),
            None => None,
        }
    }

    /// The content widget downcast to its concrete type.
    pub fn content_as<T: Widget>(&self) -> Option<&T> {
        let any: &dyn Any = self.content.as_deref()?;
        any.downcast_ref::<T>()
    }

    /// Mutable access to the content widget as its concrete type.
    pub fn content_as_mut<T: Widget>(&mut self) -> Option<&mut T> {
        let any: &mut dyn Any = self.content.as_deref_mut()?;
        any.downcast_mut::<T>()
    }

    /// Replace the content widget, returning the previous one.
    ///
    /// The new content fills the canvas and is scheduled for a repaint. Focus
    /// held by the previous content is dropped.
    pub fn set_content(&mut self, content: Box<dyn Widget>) -> Option<Box<dyn Widget>> {
        let previous = self.take_content();
        let mut content = content;
        content
            .widget_base_mut()
            .set_refresh_handle(Some(self.refresh.clone()));
        if !self.size.is_empty() {
            content.set_geometry(Rect::from_size(self.size));
        }
        tracing::debug!(target: targets::CANVAS, id = %content.object_id(), "content set");
        self.content = Some(content);
        self.refresh_content();
        previous
    }

    /// Remove the content widget.
    pub fn take_content(&mut self) -> Option<Box<dyn Widget>> {
        self.unfocus();
        self.pointer_grab = false;
        let mut previous = self.content.take()?;
        previous.widget_base_mut().set_refresh_handle(None);
        Some(previous)
    }

    // =========================================================================
    // Size and scale
    // =========================================================================

    /// The canvas size in logical pixels.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Resize the canvas; the content is stretched to fill it.
    pub fn resize(&mut self, size: Size) {
        self.size = size;
        if let Some(content) = self.content.as_mut() {
            content.set_geometry(Rect::from_size(size));
        }
    }

    /// Device pixels per logical pixel.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Change the scale factor. Non-positive or non-finite values are ignored.
    pub fn set_scale(&mut self, scale: f32) {
        if !scale.is_finite() || scale <= 0.0 {
            tracing::warn!(target: targets::CANVAS, scale, "ignoring invalid canvas scale");
            return;
        }
        if (self.scale - scale).abs() > f32::EPSILON {
            self.scale = scale;
            self.refresh_content();
        }
    }

    /// The canvas size in device pixels.
    pub fn physical_size(&self) -> Size {
        self.size.scaled(self.scale)
    }

    // =========================================================================
    // Refresh
    // =========================================================================

    /// Ask for `id` to be redrawn on the next frame.
    pub fn refresh(&self, id: ObjectId) {
        tracing::trace!(target: targets::CANVAS, %id, "refresh requested");
        self.refresh.request(id);
    }

    /// A handle widgets can use to request refreshes on this canvas.
    pub fn refresh_handle(&self) -> RefreshHandle {
        self.refresh.clone()
    }

    /// Take all pending refresh requests.
    pub fn take_refreshes(&self) -> Vec<ObjectId> {
        self.refresh.drain()
    }

    fn refresh_content(&mut self) {
        if let Some(content) = self.content.as_mut() {
            content.widget_base_mut().update();
        }
    }

    // =========================================================================
    // Focus
    // =========================================================================

    /// The widget holding keyboard focus.
    pub fn focused(&self) -> Option<ObjectId> {
        self.focused
    }

    /// Give keyboard focus to `id`.
    ///
    /// Returns `false` if `id` is not a focusable widget on this canvas.
    pub fn focus(&mut self, id: ObjectId) -> bool {
        self.focus_with_reason(id, FocusReason::Other)
    }

    fn focus_with_reason(&mut self, id: ObjectId, reason: FocusReason) -> bool {
        if self.focused == Some(id) {
            return true;
        }
        let Some(content) = self.content.as_mut() else {
            return false;
        };
        if content.object_id() != id || !content.widget_base().is_focusable() {
            tracing::debug!(target: targets::CANVAS, %id, "focus refused");
            return false;
        }

        self.unfocus();
        let Some(content) = self.content.as_mut() else {
            return false;
        };
        content.widget_base_mut().set_focused(true);
        content.event(&mut WidgetEvent::FocusIn(FocusInEvent::new(reason)));
        self.focused = Some(id);
        tracing::debug!(target: targets::CANVAS, %id, ?reason, "focus gained");
        true
    }

    /// Clear keyboard focus.
    pub fn unfocus(&mut self) {
        let Some(id) = self.focused.take() else {
            return;
        };
        if let Some(content) = self.content.as_mut()
            && content.object_id() == id
        {
            content.widget_base_mut().set_focused(false);
            content.event(&mut WidgetEvent::FocusOut(FocusOutEvent::new(FocusReason::Other)));
        }
        tracing::debug!(target: targets::CANVAS, %id, "focus lost");
    }

    // =========================================================================
    // Keyboard hook
    // =========================================================================

    /// Install a handler for key presses that arrive while nothing has focus.
    pub fn set_on_key_down<F>(&mut self, hook: F)
    where
        F: FnMut(&KeyPressEvent) + Send + Sync + 'static,
    {
        self.on_key_down = Some(Box::new(hook));
    }

    /// Whether a key-down handler is installed.
    pub fn has_on_key_down(&self) -> bool {
        self.on_key_down.is_some()
    }

    /// Remove the key-down handler.
    pub fn clear_on_key_down(&mut self) {
        self.on_key_down = None;
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Route an input event.
    ///
    /// Pointer events carry canvas coordinates and are translated into the
    /// content's local space. A primary press on the content focuses it; the
    /// content keeps receiving moves and the release until the button is let
    /// go, even outside its bounds. Key events go to the focused widget. With
    /// nothing focused, key presses go to the key-down handler instead.
    ///
    /// Returns `true` if the event was consumed.
    pub fn dispatch(&mut self, event: WidgetEvent) -> bool {
        let _span = tracing::trace_span!(span_names::DISPATCH).entered();
        let mut event = event;

        if event.is_key_event() {
            if self.focused.is_some() {
                return self.content.as_mut().is_some_and(|content| content.event(&mut event));
            }
            if let WidgetEvent::KeyPress(press) = &event
                && let Some(hook) = self.on_key_down.as_mut()
            {
                hook(press);
                return true;
            }
            return false;
        }

        let Some(content) = self.content.as_ref() else {
            return false;
        };
        let content_id = content.object_id();
        let base = content.widget_base();
        let inside = match &event {
            WidgetEvent::MousePress(e) => base.contains_point(e.local_pos),
            WidgetEvent::DoubleClick(e) => base.contains_point(e.local_pos),
            WidgetEvent::MouseRelease(e) => base.contains_point(e.local_pos),
            WidgetEvent::MouseMove(e) => base.contains_point(e.local_pos),
            WidgetEvent::FocusIn(_) | WidgetEvent::FocusOut(_) => true,
            WidgetEvent::KeyPress(_) | WidgetEvent::KeyRelease(_) => false,
        };
        let accepts_click_focus = content.accepts_click_focus();

        match &event {
            WidgetEvent::MousePress(e) if inside => {
                self.pointer_grab = true;
                if e.button == MouseButton::Left && accepts_click_focus {
                    self.focus_with_reason(content_id, FocusReason::Mouse);
                }
            }
            WidgetEvent::MousePress(_) => {
                self.unfocus();
                return false;
            }
            WidgetEvent::MouseMove(_) | WidgetEvent::MouseRelease(_) | WidgetEvent::DoubleClick(_)
                if !inside && !self.pointer_grab =>
            {
                return false;
            }
            _ => {}
        }
        if matches!(event, WidgetEvent::MouseRelease(_)) {
            self.pointer_grab = false;
        }

        let Some(content) = self.content.as_mut() else {
            return false;
        };
        let origin = content.pos();
        translate(&mut event, -origin.x, -origin.y);
        content.event(&mut event)
    }

    // =========================================================================
    // Painting
    // =========================================================================

    /// Paint the content into `renderer`.
    pub fn paint(&mut self, renderer: &mut dyn Renderer) {
        let Some(content) = self.content.as_mut() else {
            return;
        };
        if !content.is_visible() {
            return;
        }
        let geometry = content.geometry();
        renderer.save();
        renderer.translate(geometry.origin.x, geometry.origin.y);
        content.paint(&mut PaintContext::new(renderer, Rect::from_size(geometry.size)));
        renderer.restore();
        content.widget_base_mut().clear_repaint();
    }
}

impl fmt::Debug for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Canvas")
            .field("content", &self.content.as_ref().map(|c| c.object_id()))
            .field("focused", &self.focused)
            .field("size", &self.size)
            .field("scale", &self.scale)
            .finish_non_exhaustive()
    }
}

fn translate(event: &mut WidgetEvent, dx: f32, dy: f32) {
    let pos = match event {
        WidgetEvent::MousePress(e) => &mut e.local_pos,
        WidgetEvent::DoubleClick(e) => &mut e.local_pos,
        WidgetEvent::MouseRelease(e) => &mut e.local_pos,
        WidgetEvent::MouseMove(e) => &mut e.local_pos,
        _ => return,
    };
    *pos = pos.offset(dx, dy);
}

static_assertions::assert_impl_all!(Canvas: Send, Sync);

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;
    use scrivener_core::Object;
    use scrivener_render::{Color, DisplayList, DrawCommand, Point};

    use super::*;
    use crate::widget::base::WidgetBase;
    use crate::widget::events::{Key, KeyboardModifiers, MouseMoveEvent, MousePressEvent, MouseReleaseEvent};
    use crate::widget::geometry::SizeHint;

    /// Records the events it receives; consumes everything except keys.
    struct Probe {
        base: WidgetBase,
        seen: Vec<&'static str>,
    }

    impl Probe {
        fn new(focusable: bool) -> Self {
            let mut base = WidgetBase::new();
            base.set_focusable(focusable);
            Self {
                base,
                seen: Vec::new(),
            }
        }
    }

    impl Object for Probe {
        fn object_id(&self) -> ObjectId {
            self.base.object_id()
        }
    }

    impl Widget for Probe {
        fn widget_base(&self) -> &WidgetBase {
            &self.base
        }

        fn widget_base_mut(&mut self) -> &mut WidgetBase {
            &mut self.base
        }

        fn size_hint(&self) -> SizeHint {
            SizeHint::from_dimensions(10.0, 10.0)
        }

        fn paint(&self, ctx: &mut PaintContext<'_>) {
            let rect = ctx.rect();
            ctx.renderer().fill_rect(rect, Color::BLACK);
        }

        fn event(&mut self, event: &mut WidgetEvent) -> bool {
            let name = match event {
                WidgetEvent::MousePress(_) => "press",
                WidgetEvent::DoubleClick(_) => "double",
                WidgetEvent::MouseRelease(_) => "release",
                WidgetEvent::MouseMove(_) => "move",
                WidgetEvent::FocusIn(_) => "focus_in",
                WidgetEvent::FocusOut(_) => "focus_out",
                WidgetEvent::KeyPress(_) => "key",
                WidgetEvent::KeyRelease(_) => "key_up",
            };
            self.seen.push(name);
            !event.is_key_event()
        }
    }

    fn canvas_with(probe: Probe) -> (Canvas, ObjectId) {
        let id = probe.object_id();
        let mut canvas = Canvas::new();
        canvas.resize(Size::new(100.0, 40.0));
        canvas.set_content(Box::new(probe));
        (canvas, id)
    }

    fn press_at(x: f32, y: f32) -> WidgetEvent {
        WidgetEvent::MousePress(MousePressEvent::new(
            MouseButton::Left,
            Point::new(x, y),
            KeyboardModifiers::NONE,
        ))
    }

    fn seen(canvas: &Canvas) -> Vec<&'static str> {
        canvas.content_as::<Probe>().map(|p| p.seen.clone()).unwrap_or_default()
    }

    #[test]
    fn test_content_fills_canvas() {
        let (mut canvas, id) = canvas_with(Probe::new(true));
        assert_eq!(canvas.content().map(|c| c.object_id()), Some(id));
        assert_eq!(canvas.content().map(|c| c.size()), Some(Size::new(100.0, 40.0)));

        canvas.resize(Size::new(50.0, 20.0));
        assert_eq!(canvas.content().map(|c| c.size()), Some(Size::new(50.0, 20.0)));
        assert!(canvas.content_as::<Probe>().is_some());
    }

    #[test]
    fn test_press_focuses_and_outside_press_unfocuses() {
        let (mut canvas, id) = canvas_with(Probe::new(true));
        assert!(canvas.dispatch(press_at(5.0, 5.0)));
        assert_eq!(canvas.focused(), Some(id));
        assert!(canvas.content().is_some_and(|c| c.has_focus()));

        assert!(!canvas.dispatch(press_at(500.0, 5.0)));
        assert_eq!(canvas.focused(), None);
        assert_eq!(seen(&canvas), vec!["focus_in", "press", "focus_out"]);
    }

    #[test]
    fn test_unfocusable_content_is_not_focused() {
        let (mut canvas, id) = canvas_with(Probe::new(false));
        canvas.dispatch(press_at(5.0, 5.0));
        assert_eq!(canvas.focused(), None);
        assert!(!canvas.focus(id));
    }

    #[test]
    fn test_pointer_grab_follows_drag_outside() {
        let (mut canvas, _) = canvas_with(Probe::new(true));
        let outside = Point::new(300.0, 300.0);
        let moved = WidgetEvent::MouseMove(MouseMoveEvent::new(outside, KeyboardModifiers::NONE));
        assert!(!canvas.dispatch(moved.clone()));

        canvas.dispatch(press_at(5.0, 5.0));
        assert!(canvas.dispatch(moved.clone()));
        canvas.dispatch(WidgetEvent::MouseRelease(MouseReleaseEvent::new(
            MouseButton::Left,
            outside,
            KeyboardModifiers::NONE,
        )));
        assert!(!canvas.dispatch(moved));
        assert_eq!(seen(&canvas), vec!["focus_in", "press", "move", "release"]);
    }

    #[test]
    fn test_key_hook_only_without_focus() {
        let (mut canvas, id) = canvas_with(Probe::new(true));
        let keys = Arc::new(Mutex::new(Vec::new()));
        let sink = keys.clone();
        canvas.set_on_key_down(move |event| sink.lock().push(event.key));
        assert!(canvas.has_on_key_down());

        let key = || WidgetEvent::KeyPress(KeyPressEvent::key(Key::Escape, KeyboardModifiers::NONE));
        assert!(canvas.dispatch(key()));
        assert!(seen(&canvas).is_empty());
        assert_eq!(*keys.lock(), vec![Key::Escape]);

        // The focused probe ignores keys; they are not handed to the hook.
        canvas.focus(id);
        assert!(!canvas.dispatch(key()));
        assert_eq!(*keys.lock(), vec![Key::Escape]);
        assert_eq!(seen(&canvas), vec!["focus_in", "key"]);

        canvas.unfocus();
        canvas.clear_on_key_down();
        assert!(!canvas.dispatch(key()));
    }

    #[test]
    fn test_refresh_queue() {
        let (canvas, id) = canvas_with(Probe::new(true));
        assert_eq!(canvas.take_refreshes(), vec![id]);

        canvas.refresh(id);
        canvas.refresh(id);
        assert_eq!(canvas.take_refreshes(), vec![id]);
        assert!(canvas.take_refreshes().is_empty());
    }

    #[test]
    fn test_scale() {
        let (mut canvas, id) = canvas_with(Probe::new(true));
        canvas.take_refreshes();

        canvas.set_scale(2.0);
        assert_eq!(canvas.scale(), 2.0);
        assert_eq!(canvas.physical_size(), Size::new(200.0, 80.0));
        assert_eq!(canvas.take_refreshes(), vec![id]);

        canvas.set_scale(0.0);
        canvas.set_scale(f32::NAN);
        assert_eq!(canvas.scale(), 2.0);
        assert!(canvas.take_refreshes().is_empty());
    }

    #[test]
    fn test_paint_clears_repaint_flag() {
        let (mut canvas, _) = canvas_with(Probe::new(true));
        let mut list = DisplayList::new();
        canvas.paint(&mut list);

        assert_eq!(
            list.commands(),
            &[DrawCommand::FillRect {
                rect: Rect::new(0.0, 0.0, 100.0, 40.0),
                color: Color::BLACK
            }]
        );
        assert!(canvas.content().is_some_and(|c| !c.widget_base().needs_repaint()));
    }

    #[test]
    fn test_take_content_drops_focus() {
        let (mut canvas, id) = canvas_with(Probe::new(true));
        canvas.focus(id);
        let taken = canvas.take_content();
        assert!(taken.is_some());
        assert_eq!(canvas.focused(), None);
        assert!(canvas.content().is_none());
    }
}
