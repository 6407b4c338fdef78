//! Error types for the render crate.

use thiserror::Error;

/// Errors a [`Renderer`](crate::Renderer) back-end can report.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The back-end failed to submit or present the frame.
    #[error("render back-end failure: {0}")]
    Backend(String),

    /// Invalid surface dimensions (zero width or height).
    #[error("invalid surface dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// `end_frame` was called without a matching `begin_frame`.
    #[error("no frame in progress")]
    NoFrame,
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
