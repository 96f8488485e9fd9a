//! Theme system with built-in themes.

mod builtin;
mod config;
mod metrics;
mod palette;

pub use builtin::{Theme, ThemeMode};
pub use metrics::ThemeMetrics;
pub use palette::ColorPalette;
