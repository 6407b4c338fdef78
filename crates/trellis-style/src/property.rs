//! Theme property keys.

/// The kind of value a [`ThemeProperty`] holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    Color,
    Float,
}

macro_rules! theme_properties {
    ($($(#[$doc:meta])* $variant:ident => $name:literal : $kind:ident,)+) => {
        /// A themable visual property.
        ///
        /// Each property has a stable name used as its key in theme and
        /// description documents.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum ThemeProperty {
            $($(#[$doc])* $variant,)+
        }

        impl ThemeProperty {
            /// Every property, in declaration order.
            pub const ALL: &'static [ThemeProperty] = &[$(ThemeProperty::$variant,)+];

            /// The document key for this property.
            pub fn name(self) -> &'static str {
                match self {
                    $(ThemeProperty::$variant => $name,)+
                }
            }

            /// Look up a property by its document key.
            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($name => Some(ThemeProperty::$variant),)+
                    _ => None,
                }
            }

            /// The kind of value this property expects.
            pub fn kind(self) -> PropertyKind {
                match self {
                    $(ThemeProperty::$variant => PropertyKind::$kind,)+
                }
            }
        }
    };
}

theme_properties! {
    /// Window clear color.
    Background => "Background": Color,
    /// Default text color.
    Text => "Text": Color,
    /// Text color of a hovered or selected row.
    TextHighlight => "TextHighlight": Color,
    /// Default font size.
    FontSize => "FontSize": Float,
    /// Band behind the selected row.
    Selection => "Selection": Color,
    /// Band behind the hovered row.
    SelectionHovered => "SelectionHovered": Color,
    /// Button face.
    Button => "Button": Color,
    /// Button face while hovered.
    ButtonHovered => "ButtonHovered": Color,
    /// Button face while pressed.
    ButtonPressed => "ButtonPressed": Color,
    /// Checkbox box fill.
    CheckBox => "CheckBox": Color,
    /// Checkbox check mark.
    Check => "Check": Color,
    /// Panel fill.
    Panel => "Panel": Color,
    /// Panel and checkbox outline.
    Outline => "Outline": Color,
    /// Outline thickness.
    OutlineThickness => "OutlineThickness": Float,
    /// Separator line.
    Separator => "Separator": Color,
    /// Tint applied to expand/collapse glyphs.
    Toggle => "Toggle": Color,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for &property in ThemeProperty::ALL {
            assert_eq!(ThemeProperty::from_name(property.name()), Some(property));
        }
        assert_eq!(ThemeProperty::from_name("NotAProperty"), None);
    }

    #[test]
    fn test_kinds() {
        assert_eq!(ThemeProperty::FontSize.kind(), PropertyKind::Float);
        assert_eq!(ThemeProperty::Button.kind(), PropertyKind::Color);
    }
}
