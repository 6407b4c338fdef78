//! Toolkit configuration.
//!
//! [`TrellisConfig`] carries the metrics and default sizes that controls
//! fall back to when a description or caller does not set them. It can be
//! loaded from TOML; missing keys keep their defaults.
//!
//! ```toml
//! font_size = 14.0
//! box_spacing = 6.0
//!
//! [tree]
//! toggle_size = 12.0
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TrellisError};
use crate::logging::targets;

/// Metrics for the built-in fixed-advance text measurer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextMetricsConfig {
    /// Horizontal advance per character, as a fraction of the font size.
    pub advance: f32,
    /// Line height, as a fraction of the font size.
    pub line_height: f32,
}

impl Default for TextMetricsConfig {
    fn default() -> Self {
        Self {
            advance: 0.5,
            line_height: 1.25,
        }
    }
}

/// Sizes used by the Tree widget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Side of the square expand/collapse glyph.
    pub toggle_size: f32,
    /// Extra horizontal offset of a child list past the toggle glyph.
    pub indent: f32,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            toggle_size: 16.0,
            indent: 4.0,
        }
    }
}

/// Toolkit-wide configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrellisConfig {
    /// Font size used when a control does not specify one.
    pub font_size: f32,
    /// Fixed text metrics.
    pub text: TextMetricsConfig,
    /// Spacing between children of new horizontal and vertical containers.
    pub box_spacing: f32,
    /// Horizontal and vertical padding around a button label.
    pub button_padding: [f32; 2],
    /// Side of a checkbox's box glyph.
    pub checkbox_size: f32,
    /// Gap between a glyph and its label.
    pub label_gap: f32,
    /// Thickness of separator lines.
    pub separator_thickness: f32,
    /// Tree widget sizes.
    pub tree: TreeConfig,
    /// Upper bound on layout passes per frame when hooks re-invalidate.
    pub max_layout_passes: usize,
}

impl Default for TrellisConfig {
    fn default() -> Self {
        Self {
            font_size: 16.0,
            text: TextMetricsConfig::default(),
            box_spacing: 4.0,
            button_padding: [8.0, 4.0],
            checkbox_size: 16.0,
            label_gap: 4.0,
            separator_thickness: 1.0,
            tree: TreeConfig::default(),
            max_layout_passes: 4,
        }
    }
}

impl TrellisConfig {
    /// Parse a configuration from a TOML string.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Read and parse a TOML configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| TrellisError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!(target: targets::CONFIG, path = %path.display(), "loaded configuration");
        Ok(config)
    }
}
