//! Widget system for Scrivener.
//!
//! This module provides the pieces a text entry is built from:
//!
//! - [`Widget`] trait: the base trait for all UI elements
//! - [`WidgetBase`]: common state every widget embeds
//! - [`Canvas`]: owns the content widget, focus and the refresh queue
//! - [`WidgetContext`]: theme, text measurer and clipboard handed to widgets
//! - [`WidgetEvent`]: pointer, keyboard and focus input
//!
//! # Example
//!
//! ```
//! use scrivener::render::{Point, Size};
//! use scrivener::widget::events::{KeyboardModifiers, MouseButton, MousePressEvent};
//! use scrivener::widget::widgets::Entry;
//! use scrivener::widget::{Canvas, WidgetContext, WidgetEvent};
//!
//! let ctx = WidgetContext::default();
//! let mut canvas = Canvas::new();
//! canvas.resize(Size::new(200.0, 30.0));
//! canvas.set_content(Box::new(Entry::new(&ctx).with_text("Hello")));
//!
//! let press = MousePressEvent::new(MouseButton::Left, Point::new(10.0, 10.0), KeyboardModifiers::NONE);
//! canvas.dispatch(WidgetEvent::MousePress(press));
//! assert!(canvas.focused().is_some());
//! ```

mod base;
mod canvas;
mod context;
mod cursor;
pub mod events;
mod geometry;
mod traits;
pub mod widgets;

pub use base::{RefreshHandle, WidgetBase};
pub use canvas::Canvas;
pub use context::{SharedClipboard, WidgetContext, shared};
pub use cursor::CursorShape;
pub use events::WidgetEvent;
pub use geometry::SizeHint;
pub use traits::{PaintContext, Widget};
