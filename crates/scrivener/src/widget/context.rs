//! Services injected into widgets at construction.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use scrivener_render::{MonospaceMeasurer, TextMeasurer};
use scrivener_style::Theme;

use crate::platform::{Clipboard, MemoryClipboard, SystemClipboard};

/// A clipboard shared between widgets.
pub type SharedClipboard = Arc<Mutex<dyn Clipboard>>;

/// The theme, text measurer and clipboard a widget works against.
///
/// Cloning is cheap; every field is reference counted. The default context is
/// headless: light theme, [`MonospaceMeasurer`], in-memory clipboard.
#[derive(Clone)]
pub struct WidgetContext {
    pub theme: Arc<Theme>,
    pub measurer: Arc<dyn TextMeasurer>,
    pub clipboard: SharedClipboard,
}

impl WidgetContext {
    /// Create a context from its parts.
    pub fn new(theme: Theme, measurer: impl TextMeasurer + 'static, clipboard: SharedClipboard) -> Self {
        Self {
            theme: Arc::new(theme),
            measurer: Arc::new(measurer),
            clipboard,
        }
    }

    /// A context that talks to the operating system clipboard.
    pub fn system(theme: Theme, measurer: impl TextMeasurer + 'static) -> Self {
        Self::new(theme, measurer, shared(SystemClipboard::new()))
    }

    /// Replace the theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = Arc::new(theme);
        self
    }

    /// Replace the clipboard.
    pub fn with_clipboard(mut self, clipboard: SharedClipboard) -> Self {
        self.clipboard = clipboard;
        self
    }
}

impl Default for WidgetContext {
    fn default() -> Self {
        Self::new(
            Theme::light(),
            MonospaceMeasurer::default(),
            shared(MemoryClipboard::new()),
        )
    }
}

impl fmt::Debug for WidgetContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetContext")
            .field("theme", &self.theme.mode)
            .finish_non_exhaustive()
    }
}

/// Wrap a clipboard for sharing through a [`WidgetContext`].
pub fn shared(clipboard: impl Clipboard + 'static) -> SharedClipboard {
    Arc::new(Mutex::new(clipboard))
}

static_assertions::assert_impl_all!(WidgetContext: Send, Sync);
