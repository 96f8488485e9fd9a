//! Built-in themes.

use scrivener_render::Color;

use super::{ColorPalette, ThemeMetrics};

/// Theme mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

/// A complete theme with colors and metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Theme mode.
    pub mode: ThemeMode,
    /// Color palette.
    pub palette: ColorPalette,
    /// Size metrics.
    pub metrics: ThemeMetrics,
}

impl Theme {
    /// Create a light theme.
    pub fn light() -> Self {
        Self::custom(ThemeMode::Light, ColorPalette::light())
    }

    /// Create a dark theme.
    pub fn dark() -> Self {
        Self::custom(ThemeMode::Dark, ColorPalette::dark())
    }

    /// Create the built-in theme for a mode.
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark => Self::dark(),
        }
    }

    /// Create a custom theme from a palette with default metrics.
    pub fn custom(mode: ThemeMode, palette: ColorPalette) -> Self {
        Self {
            mode,
            palette,
            metrics: ThemeMetrics::default(),
        }
    }

    /// Replace the metrics.
    pub fn with_metrics(mut self, metrics: ThemeMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Size metrics for text widgets.
    pub fn metrics(&self) -> ThemeMetrics {
        self.metrics
    }

    /// Get the primary color.
    pub fn primary(&self) -> Color {
        self.palette.primary
    }

    /// Get the text color.
    pub fn text_color(&self) -> Color {
        self.palette.text_primary
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_modes() {
        assert_eq!(Theme::light().mode, ThemeMode::Light);
        assert_eq!(Theme::dark().mode, ThemeMode::Dark);
        assert_eq!(Theme::for_mode(ThemeMode::Dark), Theme::dark());
        assert_ne!(Theme::light().palette, Theme::dark().palette);
    }

    #[test]
    fn test_default_metrics() {
        let metrics = Theme::default().metrics();
        assert_eq!(metrics.text_size, 14.0);
        assert_eq!(metrics.padding, 4.0);
    }
}
