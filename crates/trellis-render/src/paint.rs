//! Retained draw commands.
//!
//! Controls paint into a [`DrawList`] rather than calling a renderer
//! directly. The list can be inspected (tests do this) and replayed into
//! any [`Renderer`] once per frame.

use crate::renderer::Renderer;
use crate::types::{Color, Point, Rect};

/// Handle to a texture owned by the renderer back-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextureId(pub u32);

/// A single draw primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Solid filled rectangle.
    Rectangle { rect: Rect, color: Color },
    /// Rectangle outline of the given thickness, drawn inside `rect`.
    RectangleOutline { rect: Rect, color: Color, thickness: f32 },
    /// A sub-rectangle (`uv`, in texture pixels) of a texture stretched over `rect`.
    Textured {
        rect: Rect,
        texture: TextureId,
        uv: Rect,
        tint: Color,
    },
    /// A run of text with its top-left corner at `position`.
    Text {
        position: Point,
        text: String,
        font_size: f32,
        color: Color,
    },
}

impl DrawCommand {
    /// The command's primary color.
    pub fn color(&self) -> Color {
        match self {
            Self::Rectangle { color, .. }
            | Self::RectangleOutline { color, .. }
            | Self::Text { color, .. } => *color,
            Self::Textured { tint, .. } => *tint,
        }
    }
}

/// An ordered list of draw commands for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    /// Create an empty draw list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a filled rectangle. Empty rectangles are dropped.
    pub fn rectangle(&mut self, rect: Rect, color: Color) {
        if !rect.is_empty() {
            self.commands.push(DrawCommand::Rectangle { rect, color });
        }
    }

    /// Append a rectangle outline.
    pub fn rectangle_outline(&mut self, rect: Rect, color: Color, thickness: f32) {
        if !rect.is_empty() && thickness > 0.0 {
            self.commands.push(DrawCommand::RectangleOutline {
                rect,
                color,
                thickness,
            });
        }
    }

    /// Append a textured quad.
    pub fn textured(&mut self, rect: Rect, texture: TextureId, uv: Rect, tint: Color) {
        if !rect.is_empty() {
            self.commands.push(DrawCommand::Textured {
                rect,
                texture,
                uv,
                tint,
            });
        }
    }

    /// Append a text run. Empty strings are dropped.
    pub fn text(&mut self, position: Point, text: impl Into<String>, font_size: f32, color: Color) {
        let text = text.into();
        if !text.is_empty() {
            self.commands.push(DrawCommand::Text {
                position,
                text,
                font_size,
                color,
            });
        }
    }

    /// The recorded commands in paint order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Remove all commands, keeping the allocation.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Issue every command, in order, to a renderer.
    ///
    /// Frame begin/end is the caller's responsibility.
    pub fn replay<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        for command in &self.commands {
            match command {
                DrawCommand::Rectangle { rect, color } => renderer.fill_rect(*rect, *color),
                DrawCommand::RectangleOutline {
                    rect,
                    color,
                    thickness,
                } => renderer.stroke_rect(*rect, *color, *thickness),
                DrawCommand::Textured {
                    rect,
                    texture,
                    uv,
                    tint,
                } => renderer.draw_texture(*rect, *texture, *uv, *tint),
                DrawCommand::Text {
                    position,
                    text,
                    font_size,
                    color,
                } => renderer.draw_text(*position, text, *font_size, *color),
            }
        }
        tracing::trace!(target: "trellis::render", commands = self.commands.len(), "replayed draw list");
    }
}
