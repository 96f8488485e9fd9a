//! Scrivener - text entry widgets for Rust GUI hosts.
//!
//! This is the umbrella crate that re-exports the public APIs of the
//! workspace and provides the widget system itself.
//!
//! # Example
//!
//! ```
//! use scrivener::widget::WidgetContext;
//! use scrivener::widget::widgets::Entry;
//!
//! let ctx = WidgetContext::default();
//! let mut entry = Entry::multi_line(&ctx);
//! entry.set_text("Testing\nTesting");
//! entry.select_all();
//! assert_eq!(entry.selected_text(), "Testing\nTesting");
//! ```

pub use scrivener_core::*;

/// Geometry, text measurement and drawing.
pub mod render {
    pub use scrivener_render::*;
}

/// Themes and their configuration.
pub mod style {
    pub use scrivener_style::*;
}

pub mod platform;
pub mod widget;
