//! Text measurement.
//!
//! Shaping and font loading belong to the platform layer. The toolkit only
//! needs a bounding size per string, which it asks a [`TextMetrics`]
//! implementation for.

use trellis_core::TextMetricsConfig;
use trellis_render::Size;

/// Measures the bounding box of a text run.
pub trait TextMetrics {
    /// Size of `text` at `font_size`. Empty text has zero width and one
    /// line of height.
    fn measure(&self, text: &str, font_size: f32) -> Size;
}

/// Fixed-advance metrics: every character is equally wide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedMetrics {
    advance: f32,
    line_height: f32,
}

impl FixedMetrics {
    /// `advance` and `line_height` are fractions of the font size.
    pub fn new(advance: f32, line_height: f32) -> Self {
        Self {
            advance,
            line_height,
        }
    }
}

impl From<TextMetricsConfig> for FixedMetrics {
    fn from(config: TextMetricsConfig) -> Self {
        Self::new(config.advance, config.line_height)
    }
}

impl Default for FixedMetrics {
    fn default() -> Self {
        TextMetricsConfig::default().into()
    }
}

impl TextMetrics for FixedMetrics {
    fn measure(&self, text: &str, font_size: f32) -> Size {
        let (lines, widest) = text
            .split('\n')
            .fold((0usize, 0usize), |(n, w), line| (n + 1, w.max(line.chars().count())));
        Size::new(
            widest as f32 * self.advance * font_size,
            lines as f32 * self.line_height * font_size,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_metrics() {
        let metrics = FixedMetrics::new(0.5, 1.25);
        assert_eq!(metrics.measure("Hi", 16.0), Size::new(16.0, 20.0));
        assert_eq!(metrics.measure("", 16.0), Size::new(0.0, 20.0));
        assert_eq!(metrics.measure("ab\nabcd", 10.0), Size::new(20.0, 25.0));
    }
}
