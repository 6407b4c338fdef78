//! Rendering primitives for Trellis.
//!
//! This crate holds the pieces of the paint pipeline that do not depend on
//! the control tree:
//!
//! - **Geometry**: [`Point`], [`Size`], [`Rect`], [`Color`]
//! - **Draw lists**: [`DrawList`] records [`DrawCommand`]s in paint order
//! - **Back-ends**: the [`Renderer`] trait, plus [`RecordingRenderer`] for
//!   headless use
//!
//! Back-ends (GPU, software rasterizer, test doubles) implement
//! [`Renderer`]; the toolkit replays one [`DrawList`] into it per frame.

pub mod error;
pub mod paint;
pub mod renderer;
pub mod types;

pub use error::{RenderError, RenderResult};
pub use paint::{DrawCommand, DrawList, TextureId};
pub use renderer::{FrameStats, RecordingRenderer, Renderer};
pub use types::{Color, Point, Rect, Size};
