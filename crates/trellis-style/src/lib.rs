//! Theming for Trellis.
//!
//! A [`Theme`] maps every [`ThemeProperty`] to a [`Variant`]. Controls look
//! properties up through their own [`PropertyOverrides`] first and fall
//! back to the window theme.
//!
//! ```
//! use trellis_style::{Theme, ThemeProperty};
//!
//! let theme = Theme::from_json_str(r#"{ "FontSize": 20 }"#).unwrap();
//! assert_eq!(theme.float(ThemeProperty::FontSize), 20.0);
//! ```

pub mod error;
pub mod overrides;
pub mod property;
pub mod theme;
pub mod value;

pub use error::{Error, Result};
pub use overrides::PropertyOverrides;
pub use property::{PropertyKind, ThemeProperty};
pub use theme::{ColorPalette, Theme, ThemeMode};
pub use value::Variant;
