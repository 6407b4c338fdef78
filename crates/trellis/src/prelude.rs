//! Commonly used types, for glob import:
//!
//! ```
//! use trellis::prelude::*;
//!
//! let mut window = Window::new("Prelude", Size::new(100.0, 100.0));
//! let root = window.root();
//! let text = window.tree_mut().add_text(root, "Hi").unwrap();
//! assert_eq!(window.tree().control_type(text), Some(ControlType::Text));
//! ```

// ============================================================================
// Controls and containers
// ============================================================================

pub use crate::container::{Grow, Layout, LayoutStats, Margins};
pub use crate::control::{ControlId, ControlTree, ControlType, Expand, Invalidation};

// ============================================================================
// Windows, input and descriptions
// ============================================================================

pub use crate::interaction::MouseButton;
pub use crate::loader::{ControlList, LoadReport};
pub use crate::window::{Window, load_application};

// ============================================================================
// Geometry, style and configuration
// ============================================================================

pub use trellis_core::{TrellisConfig, TrellisError};
pub use trellis_render::{Color, Point, Rect, Size};
pub use trellis_style::ThemeProperty;
