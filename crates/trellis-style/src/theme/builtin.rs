//! Built-in themes and theme documents.

use std::collections::HashMap;
use std::path::Path;

use serde_json::Value;
use trellis_render::Color;

use super::ColorPalette;
use crate::error::{Error, Result};
use crate::property::ThemeProperty;
use crate::value::Variant;

/// Theme mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

/// A complete mapping from every [`ThemeProperty`] to a value.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Theme mode.
    pub mode: ThemeMode,
    /// Palette the defaults were derived from.
    pub palette: ColorPalette,
    values: HashMap<ThemeProperty, Variant>,
}

impl Theme {
    /// Create the dark theme.
    pub fn dark() -> Self {
        Self::custom(ThemeMode::Dark, ColorPalette::dark())
    }

    /// Create the light theme.
    pub fn light() -> Self {
        Self::custom(ThemeMode::Light, ColorPalette::light())
    }

    /// Create a theme from a palette.
    pub fn custom(mode: ThemeMode, palette: ColorPalette) -> Self {
        let values = property_defaults(&palette);
        Self {
            mode,
            palette,
            values,
        }
    }

    /// Value of a property.
    pub fn get(&self, property: ThemeProperty) -> Variant {
        self.values
            .get(&property)
            .copied()
            .unwrap_or(Variant::Color(Color::TRANSPARENT))
    }

    /// Color value of a property.
    pub fn color(&self, property: ThemeProperty) -> Color {
        self.get(property).to_color()
    }

    /// Numeric value of a property.
    pub fn float(&self, property: ThemeProperty) -> f32 {
        self.get(property).to_float()
    }

    /// Replace a property's value. Values of the wrong kind are ignored.
    pub fn set(&mut self, property: ThemeProperty, value: impl Into<Variant>) -> bool {
        let value = value.into();
        if !value.matches(property.kind()) {
            tracing::warn!(
                target: "trellis::style",
                property = property.name(),
                ?value,
                "ignoring theme value of the wrong kind"
            );
            return false;
        }
        self.values.insert(property, value);
        true
    }

    /// Apply a `{"PropertyName": value, ...}` document over this theme.
    ///
    /// Unknown names and undecodable values are skipped. Returns the number
    /// of properties applied.
    pub fn load_json(&mut self, document: &Value) -> Result<usize> {
        let map = document.as_object().ok_or(Error::NotAnObject)?;
        let mut applied = 0;
        for (name, raw) in map {
            let Some(property) = ThemeProperty::from_name(name) else {
                tracing::debug!(target: "trellis::style", name = %name, "unknown theme property");
                continue;
            };
            if let Some(value) = Variant::from_json(raw)
                && self.set(property, value)
            {
                applied += 1;
            }
        }
        Ok(applied)
    }

    /// Parse a theme document, applied over the dark theme.
    pub fn from_json_str(source: &str) -> Result<Self> {
        let document: Value = serde_json::from_str(source)?;
        let mut theme = Self::dark();
        theme.load_json(&document)?;
        Ok(theme)
    }

    /// Read a theme document from disk, applied over the dark theme.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_json_str(&source)
    }

    /// Every property and its value, sorted by property.
    pub fn to_json(&self) -> Value {
        let mut map = serde_json::Map::new();
        for &property in ThemeProperty::ALL {
            map.insert(property.name().to_owned(), self.get(property).to_json());
        }
        Value::Object(map)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

fn property_defaults(palette: &ColorPalette) -> HashMap<ThemeProperty, Variant> {
    use ThemeProperty::*;

    let entries: [(ThemeProperty, Variant); 16] = [
        (Background, palette.background.into()),
        (Text, palette.text.into()),
        (TextHighlight, palette.on_accent.into()),
        (FontSize, Variant::Float(16.0)),
        (Selection, palette.accent.into()),
        (SelectionHovered, palette.accent_muted.into()),
        (Button, palette.surface.into()),
        (ButtonHovered, palette.surface_hovered.into()),
        (ButtonPressed, palette.surface_pressed.into()),
        (CheckBox, palette.surface.into()),
        (Check, palette.accent.into()),
        (Panel, palette.surface.into()),
        (Outline, palette.border.into()),
        (OutlineThickness, Variant::Float(1.0)),
        (Separator, palette.border.into()),
        (Toggle, palette.text.into()),
    ];
    debug_assert_eq!(entries.len(), ThemeProperty::ALL.len());
    entries.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_every_property_has_a_value() {
        let theme = Theme::light();
        for &property in ThemeProperty::ALL {
            assert!(theme.get(property).matches(property.kind()), "{property:?}");
        }
    }

    #[test]
    fn test_load_json_ignores_unknown_names() {
        let mut theme = Theme::dark();
        let applied = theme
            .load_json(&json!({
                "Button": [255, 0, 0],
                "FontSize": 20,
                "NoSuchProperty": [1, 2, 3],
                "Panel": "not a color",
                "Separator": 3.0
            }))
            .unwrap();

        assert_eq!(applied, 2);
        assert_eq!(theme.color(ThemeProperty::Button), Color::from_rgb8(255, 0, 0));
        assert_eq!(theme.float(ThemeProperty::FontSize), 20.0);
        assert_eq!(theme.get(ThemeProperty::Panel), Theme::dark().get(ThemeProperty::Panel));
        assert_eq!(theme.get(ThemeProperty::Separator), Theme::dark().get(ThemeProperty::Separator));
    }

    #[test]
    fn test_from_json_str_errors() {
        assert!(matches!(Theme::from_json_str("{"), Err(Error::Parse(_))));
        assert!(matches!(Theme::from_json_str("[1]"), Err(Error::NotAnObject)));
    }

    #[test]
    fn test_to_json_round_trip() {
        let mut theme = Theme::light();
        theme.set(ThemeProperty::Text, Color::from_rgb8(1, 2, 3));
        let mut reloaded = Theme::dark();
        reloaded.load_json(&theme.to_json()).unwrap();
        assert_eq!(reloaded.color(ThemeProperty::Text), Color::from_rgb8(1, 2, 3));
        assert_eq!(reloaded.color(ThemeProperty::Background), theme.color(ThemeProperty::Background));
    }
}
