//! Theming for Scrivener widgets.
//!
//! A [`Theme`] bundles a [`ColorPalette`] with [`ThemeMetrics`]. Widgets receive
//! the theme at construction and read colors and sizes from it when they lay
//! out and paint.
//!
//! # Example
//!
//! ```
//! use scrivener_style::Theme;
//!
//! let theme = Theme::from_toml_str("mode = \"dark\"\n[metrics]\ntext_size = 16.0\n")?;
//! assert_eq!(theme.metrics().text_size, 16.0);
//! # Ok::<(), scrivener_style::Error>(())
//! ```

pub mod error;
pub mod theme;

pub use error::{Error, Result};
pub use theme::{ColorPalette, Theme, ThemeMetrics, ThemeMode};
