//! Theme system with built-in themes.

mod builtin;
mod palette;

pub use builtin::{Theme, ThemeMode};
pub use palette::ColorPalette;
