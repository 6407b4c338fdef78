//! Dynamically typed theme values.

use serde_json::{Value, json};
use trellis_render::Color;

use crate::property::PropertyKind;

/// A theme property value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Variant {
    Color(Color),
    Float(f32),
    Bool(bool),
}

impl Variant {
    /// The color, or transparent black for non-color values.
    pub fn to_color(self) -> Color {
        match self {
            Variant::Color(c) => c,
            _ => Color::TRANSPARENT,
        }
    }

    /// The number, or zero for non-numeric values.
    pub fn to_float(self) -> f32 {
        match self {
            Variant::Float(f) => f,
            Variant::Bool(b) => f32::from(u8::from(b)),
            Variant::Color(_) => 0.0,
        }
    }

    /// Whether this value can stand for a property of `kind`.
    pub fn matches(self, kind: PropertyKind) -> bool {
        matches!(
            (self, kind),
            (Variant::Color(_), PropertyKind::Color) | (Variant::Float(_), PropertyKind::Float)
        )
    }

    /// Decode a document value.
    ///
    /// Colors are `[r, g, b]` or `[r, g, b, a]` arrays of 0-255 integers or
    /// `"#RRGGBB[AA]"` strings; numbers become floats.
    pub fn from_json(value: &Value) -> Option<Variant> {
        match value {
            Value::Bool(b) => Some(Variant::Bool(*b)),
            Value::Number(n) => n.as_f64().map(|f| Variant::Float(f as f32)),
            Value::String(s) => Color::from_hex(s).map(Variant::Color),
            Value::Array(items) if items.len() == 3 || items.len() == 4 => {
                let mut channels = [255u8; 4];
                for (slot, item) in channels.iter_mut().zip(items) {
                    *slot = u8::try_from(item.as_u64()?).ok()?;
                }
                let [r, g, b, a] = channels;
                Some(Variant::Color(Color::from_rgba8(r, g, b, a)))
            }
            _ => None,
        }
    }

    /// Encode as a document value; the inverse of [`Variant::from_json`].
    pub fn to_json(self) -> Value {
        match self {
            Variant::Color(c) => json!(c.to_rgba8()),
            Variant::Float(f) => json!(f),
            Variant::Bool(b) => json!(b),
        }
    }
}

impl From<Color> for Variant {
    fn from(c: Color) -> Self {
        Variant::Color(c)
    }
}

impl From<f32> for Variant {
    fn from(f: f32) -> Self {
        Variant::Float(f)
    }
}
