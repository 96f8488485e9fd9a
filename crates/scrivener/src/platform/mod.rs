//! Platform services.
//!
//! Currently this is clipboard access: the [`Clipboard`] seam that entries
//! copy to and paste from, with a system-backed and an in-memory implementation.

mod clipboard;

pub use clipboard::{Clipboard, ClipboardError, MemoryClipboard, SystemClipboard};
