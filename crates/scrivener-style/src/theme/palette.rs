//! Color palette definitions.

use scrivener_render::Color;

/// A color palette for theming text inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorPalette {
    /// Accent color used for focus borders and the caret.
    pub primary: Color,
    /// Window background.
    pub background: Color,
    /// Background of editable fields.
    pub input_background: Color,
    /// Primary text color.
    pub text_primary: Color,
    /// Placeholder and disabled text color.
    pub text_disabled: Color,
    /// Fill behind selected text.
    pub selection: Color,
    /// Standard border color.
    pub border: Color,
}

const fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::from_rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
}

impl ColorPalette {
    /// Create a light theme palette.
    pub fn light() -> Self {
        let primary = rgb(0x00, 0x7A, 0xFF);
        Self {
            primary,
            background: Color::WHITE,
            input_background: rgb(0xF8, 0xF9, 0xFA),
            text_primary: rgb(0x21, 0x25, 0x29),
            text_disabled: rgb(0xAD, 0xB5, 0xBD),
            selection: primary.with_alpha(0.25),
            border: rgb(0xCE, 0xD4, 0xDA),
        }
    }

    /// Create a dark theme palette.
    pub fn dark() -> Self {
        let primary = rgb(0x0A, 0x84, 0xFF);
        Self {
            primary,
            background: rgb(0x1C, 0x1C, 0x1E),
            input_background: rgb(0x2C, 0x2C, 0x2E),
            text_primary: rgb(0xF2, 0xF2, 0xF7),
            text_disabled: rgb(0x63, 0x63, 0x66),
            selection: primary.with_alpha(0.35),
            border: rgb(0x48, 0x48, 0x4A),
        }
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::light()
    }
}
