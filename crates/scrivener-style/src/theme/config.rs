//! Loading themes from TOML documents.
//!
//! A theme file starts from a built-in theme and overrides what it names:
//!
//! ```toml
//! mode = "dark"
//!
//! [metrics]
//! text_size = 16.0
//! padding = 6.0
//!
//! [palette]
//! primary = "#ff9500"
//! selection = "#ff950055"
//! ```

use std::path::Path;

use scrivener_core::logging::targets;
use scrivener_render::Color;
use serde::Deserialize;

use super::{Theme, ThemeMode};
use crate::error::{Error, Result};

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ThemeFile {
    mode: Option<ModeFile>,
    #[serde(default)]
    metrics: MetricsFile,
    #[serde(default)]
    palette: PaletteFile,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ModeFile {
    Light,
    Dark,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct MetricsFile {
    text_size: Option<f32>,
    padding: Option<f32>,
    cursor_width: Option<f32>,
    border_width: Option<f32>,
    multi_line_rows: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PaletteFile {
    primary: Option<String>,
    background: Option<String>,
    input_background: Option<String>,
    text_primary: Option<String>,
    text_disabled: Option<String>,
    selection: Option<String>,
    border: Option<String>,
}

impl Theme {
    /// Parse a theme from a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let file: ThemeFile = toml::from_str(source).map_err(|err| {
            let (line, column) = err
                .span()
                .map(|span| line_column(source, span.start))
                .unwrap_or((0, 0));
            Error::parse(err.message(), line, column)
        })?;

        let mode = match file.mode {
            Some(ModeFile::Dark) => ThemeMode::Dark,
            Some(ModeFile::Light) | None => ThemeMode::Light,
        };
        let mut theme = Theme::for_mode(mode);
        file.metrics.apply(&mut theme)?;
        file.palette.apply(&mut theme)?;

        tracing::debug!(target: targets::THEME, ?mode, "loaded theme document");
        Ok(theme)
    }

    /// Read and parse a theme file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|err| Error::io(path, err))?;
        Self::from_toml_str(&source)
    }
}

impl MetricsFile {
    fn apply(&self, theme: &mut Theme) -> Result<()> {
        let metrics = &mut theme.metrics;
        if let Some(size) = self.text_size {
            metrics.text_size = positive("metrics.text_size", size)?;
        }
        if let Some(padding) = self.padding {
            metrics.padding = non_negative("metrics.padding", padding)?;
        }
        if let Some(width) = self.cursor_width {
            metrics.cursor_width = positive("metrics.cursor_width", width)?;
        }
        if let Some(width) = self.border_width {
            metrics.border_width = non_negative("metrics.border_width", width)?;
        }
        if let Some(rows) = self.multi_line_rows {
            if rows == 0 {
                return Err(Error::invalid_value(
                    "metrics.multi_line_rows",
                    "must be at least 1",
                ));
            }
            metrics.multi_line_rows = rows;
        }
        Ok(())
    }
}

impl PaletteFile {
    fn apply(&self, theme: &mut Theme) -> Result<()> {
        let palette = &mut theme.palette;
        let slots: [(&str, &Option<String>, &mut Color); 7] = [
            ("palette.primary", &self.primary, &mut palette.primary),
            ("palette.background", &self.background, &mut palette.background),
            (
                "palette.input_background",
                &self.input_background,
                &mut palette.input_background,
            ),
            ("palette.text_primary", &self.text_primary, &mut palette.text_primary),
            ("palette.text_disabled", &self.text_disabled, &mut palette.text_disabled),
            ("palette.selection", &self.selection, &mut palette.selection),
            ("palette.border", &self.border, &mut palette.border),
        ];
        for (property, value, slot) in slots {
            if let Some(hex) = value {
                *slot = Color::from_hex(hex).ok_or_else(|| {
                    Error::invalid_value(property, format!("'{hex}' is not a #rrggbb[aa] color"))
                })?;
            }
        }
        Ok(())
    }
}

fn positive(property: &str, value: f32) -> Result<f32> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(Error::invalid_value(property, "must be greater than zero"))
    }
}

fn non_negative(property: &str, value: f32) -> Result<f32> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(Error::invalid_value(property, "must not be negative"))
    }
}

/// One-based line and column of a byte offset.
fn line_column(source: &str, offset: usize) -> (u32, u32) {
    let prefix = source.get(..offset).unwrap_or(source);
    let line = prefix.matches('\n').count() + 1;
    let column = prefix
        .rsplit('\n')
        .next()
        .map(|tail| tail.chars().count() + 1)
        .unwrap_or(1);
    (line as u32, column as u32)
}
