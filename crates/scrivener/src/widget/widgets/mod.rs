//! Concrete widgets.

pub mod entry;

pub use entry::{CursorPosition, EchoMode, Entry, Shortcut, WordSeparators};
