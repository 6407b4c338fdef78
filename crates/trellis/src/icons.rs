//! Icon atlas lookup.

use trellis_render::{Rect, TextureId};

/// A glyph in the icon atlas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    /// Shown on an expanded tree row.
    Expand,
    /// Shown on a collapsed tree row.
    Collapse,
    /// Check mark.
    Check,
}

/// Where each [`Icon`] lives in the atlas texture.
#[derive(Debug, Clone, PartialEq)]
pub struct IconSet {
    texture: TextureId,
    expand: Rect,
    collapse: Rect,
    check: Rect,
}

impl IconSet {
    pub fn new(texture: TextureId, expand: Rect, collapse: Rect, check: Rect) -> Self {
        Self {
            texture,
            expand,
            collapse,
            check,
        }
    }

    pub fn texture(&self) -> TextureId {
        self.texture
    }

    /// Atlas rectangle of an icon, in texture pixels.
    pub fn uv(&self, icon: Icon) -> Rect {
        match icon {
            Icon::Expand => self.expand,
            Icon::Collapse => self.collapse,
            Icon::Check => self.check,
        }
    }
}

impl Default for IconSet {
    /// Three 12x12 glyphs in a row on texture 0.
    fn default() -> Self {
        Self::new(
            TextureId(0),
            Rect::new(0.0, 0.0, 12.0, 12.0),
            Rect::new(12.0, 0.0, 12.0, 12.0),
            Rect::new(24.0, 0.0, 12.0, 12.0),
        )
    }
}
