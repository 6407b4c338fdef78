//! Color palette definitions.

use trellis_render::Color;

/// The handful of semantic colors a built-in theme is derived from.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorPalette {
    /// Window background.
    pub background: Color,
    /// Raised surfaces: buttons, panels, checkbox boxes.
    pub surface: Color,
    /// Surface under the pointer.
    pub surface_hovered: Color,
    /// Surface while pressed.
    pub surface_pressed: Color,
    /// Primary text.
    pub text: Color,
    /// Text drawn on the accent color.
    pub on_accent: Color,
    /// Accent used for selection and check marks.
    pub accent: Color,
    /// Weaker accent used for hover bands.
    pub accent_muted: Color,
    /// Borders and separators.
    pub border: Color,
}

impl ColorPalette {
    /// Dark palette.
    pub fn dark() -> Self {
        Self {
            background: Color::from_rgb8(30, 30, 30),
            surface: Color::from_rgb8(64, 64, 64),
            surface_hovered: Color::from_rgb8(80, 80, 80),
            surface_pressed: Color::from_rgb8(48, 48, 48),
            text: Color::from_rgb8(230, 230, 230),
            on_accent: Color::WHITE,
            accent: Color::from_rgb8(38, 79, 120),
            accent_muted: Color::from_rgb8(44, 52, 64),
            border: Color::from_rgb8(96, 96, 96),
        }
    }

    /// Light palette.
    pub fn light() -> Self {
        Self {
            background: Color::from_rgb8(240, 240, 240),
            surface: Color::from_rgb8(225, 225, 225),
            surface_hovered: Color::from_rgb8(210, 225, 240),
            surface_pressed: Color::from_rgb8(190, 205, 225),
            text: Color::from_rgb8(20, 20, 20),
            on_accent: Color::WHITE,
            accent: Color::from_rgb8(0, 120, 215),
            accent_muted: Color::from_rgb8(204, 228, 247),
            border: Color::from_rgb8(160, 160, 160),
        }
    }
}
