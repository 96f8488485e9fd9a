//! Clipboard access for copy/paste operations.
//!
//! Widgets talk to a [`Clipboard`] trait object. [`SystemClipboard`] forwards
//! to the OS through `arboard`; [`MemoryClipboard`] keeps text in process for
//! headless hosts and tests.
//!
//! # Example
//!
//! ```
//! use scrivener::platform::{Clipboard, MemoryClipboard};
//!
//! let mut clipboard = MemoryClipboard::new();
//! clipboard.set_content("Hello, world!")?;
//! assert_eq!(clipboard.content()?, "Hello, world!");
//! # Ok::<(), scrivener::platform::ClipboardError>(())
//! ```

use scrivener_core::logging::targets;

/// Error type for clipboard operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClipboardError {
    /// The clipboard holds no text.
    #[error("clipboard is empty")]
    Empty,
    /// The clipboard could not be opened.
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
    /// The platform backend reported a failure.
    #[error("clipboard error: {0}")]
    Backend(String),
}

impl From<arboard::Error> for ClipboardError {
    fn from(err: arboard::Error) -> Self {
        match err {
            arboard::Error::ContentNotAvailable => Self::Empty,
            arboard::Error::ClipboardNotSupported | arboard::Error::ClipboardOccupied => {
                Self::Unavailable(err.to_string())
            }
            other => Self::Backend(other.to_string()),
        }
    }
}

/// Text clipboard source and sink.
pub trait Clipboard: Send {
    /// Current text content.
    fn content(&mut self) -> Result<String, ClipboardError>;

    /// Replace the text content.
    fn set_content(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The operating system clipboard.
///
/// A platform handle is opened for each operation and dropped afterwards, so
/// the value itself holds no OS resources.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl SystemClipboard {
    /// Create a handle to the system clipboard.
    pub fn new() -> Self {
        Self
    }
}

impl Clipboard for SystemClipboard {
    fn content(&mut self) -> Result<String, ClipboardError> {
        let mut inner = arboard::Clipboard::new()?;
        let text = inner.get_text()?;
        tracing::trace!(target: targets::CLIPBOARD, len = text.len(), "read system clipboard");
        Ok(text)
    }

    fn set_content(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut inner = arboard::Clipboard::new()?;
        inner.set_text(text)?;
        tracing::trace!(target: targets::CLIPBOARD, len = text.len(), "wrote system clipboard");
        Ok(())
    }
}

/// An in-process clipboard.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemoryClipboard {
    text: Option<String>,
}

impl MemoryClipboard {
    /// Create an empty clipboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clipboard holding `text`.
    pub fn with_content(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }

    /// Empty the clipboard.
    pub fn clear(&mut self) {
        self.text = None;
    }
}

impl Clipboard for MemoryClipboard {
    fn content(&mut self) -> Result<String, ClipboardError> {
        self.text.clone().ok_or(ClipboardError::Empty)
    }

    fn set_content(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.text = Some(text.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_clipboard_roundtrip() {
        let mut clipboard = MemoryClipboard::new();
        assert_eq!(clipboard.content(), Err(ClipboardError::Empty));

        clipboard.set_content("test").unwrap();
        assert_eq!(clipboard.content().unwrap(), "test");

        clipboard.clear();
        assert_eq!(clipboard.content(), Err(ClipboardError::Empty));
    }

    #[test]
    fn test_arboard_error_mapping() {
        assert_eq!(
            ClipboardError::from(arboard::Error::ContentNotAvailable),
            ClipboardError::Empty
        );
        assert!(matches!(
            ClipboardError::from(arboard::Error::ClipboardOccupied),
            ClipboardError::Unavailable(_)
        ));
    }
}
