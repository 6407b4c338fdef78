//! Renderer interface.
//!
//! This module defines the [`Renderer`] trait that platform back-ends
//! implement. The toolkit never talks to a GPU itself: it records a
//! [`DrawList`](crate::DrawList) and replays it here.

use crate::error::{RenderError, RenderResult};
use crate::paint::{DrawCommand, TextureId};
use crate::types::{Color, Point, Rect, Size};

/// Statistics from a frame render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Number of draw calls submitted.
    pub draw_calls: u32,
}

/// The 2D drawing interface a back-end provides.
///
/// # Frame Lifecycle
///
/// ```ignore
/// renderer.begin_frame(clear_color, viewport_size);
/// draw_list.replay(&mut renderer);
/// let stats = renderer.end_frame()?;
/// ```
pub trait Renderer {
    /// Begin a new frame cleared to `clear_color`.
    fn begin_frame(&mut self, clear_color: Color, viewport_size: Size);

    /// End the current frame and present it.
    fn end_frame(&mut self) -> RenderResult<FrameStats>;

    /// Fill a rectangle with a solid color.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Stroke the inside edge of a rectangle.
    fn stroke_rect(&mut self, rect: Rect, color: Color, thickness: f32);

    /// Draw the `uv` region of a texture into `rect`.
    fn draw_texture(&mut self, rect: Rect, texture: TextureId, uv: Rect, tint: Color);

    /// Draw a text run with its top-left corner at `position`.
    fn draw_text(&mut self, position: Point, text: &str, font_size: f32, color: Color);
}

/// A headless renderer that records what it is asked to draw.
///
/// Useful for tests and for running the toolkit without a window.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    commands: Vec<DrawCommand>,
    clear_color: Color,
    viewport: Size,
    in_frame: bool,
    frames: u64,
}

impl RecordingRenderer {
    /// Commands recorded during the most recent frame.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Clear color of the most recent frame.
    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    /// Viewport of the most recent frame.
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Number of frames completed.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for RecordingRenderer {
    fn begin_frame(&mut self, clear_color: Color, viewport_size: Size) {
        self.commands.clear();
        self.clear_color = clear_color;
        self.viewport = viewport_size;
        self.in_frame = true;
    }

    fn end_frame(&mut self) -> RenderResult<FrameStats> {
        if !self.in_frame {
            return Err(RenderError::NoFrame);
        }
        self.in_frame = false;
        self.frames += 1;
        Ok(FrameStats {
            draw_calls: self.commands.len() as u32,
        })
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::Rectangle { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, thickness: f32) {
        self.commands.push(DrawCommand::RectangleOutline {
            rect,
            color,
            thickness,
        });
    }

    fn draw_texture(&mut self, rect: Rect, texture: TextureId, uv: Rect, tint: Color) {
        self.commands.push(DrawCommand::Textured {
            rect,
            texture,
            uv,
            tint,
        });
    }

    fn draw_text(&mut self, position: Point, text: &str, font_size: f32, color: Color) {
        self.commands.push(DrawCommand::Text {
            position,
            text: text.to_owned(),
            font_size,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_frame_without_begin() {
        let mut renderer = RecordingRenderer::default();
        assert!(matches!(renderer.end_frame(), Err(RenderError::NoFrame)));
    }

    #[test]
    fn test_begin_frame_resets_commands() {
        let mut renderer = RecordingRenderer::default();
        renderer.begin_frame(Color::BLACK, Size::new(10.0, 10.0));
        renderer.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::WHITE);
        assert_eq!(renderer.end_frame().unwrap().draw_calls, 1);

        renderer.begin_frame(Color::WHITE, Size::new(20.0, 20.0));
        assert!(renderer.commands().is_empty());
        assert_eq!(renderer.end_frame().unwrap().draw_calls, 0);
        assert_eq!(renderer.frames(), 2);
        assert_eq!(renderer.viewport(), Size::new(20.0, 20.0));
    }
}
