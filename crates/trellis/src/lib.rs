//! Trellis - a retained-mode widget toolkit.
//!
//! Controls live in a [`ControlTree`] arena and are addressed by
//! [`ControlId`]. Containers size and place their children with a
//! [`Layout`] policy; mutations invalidate their ancestors so the next
//! [`ControlTree::layout`] only revisits dirty subtrees. A [`Window`]
//! drives layout and painting each frame and routes mouse input.
//!
//! # Example
//!
//! ```
//! use trellis::{Expand, Window};
//! use trellis::render::Size;
//!
//! let mut window = Window::new("Hello", Size::new(320.0, 200.0));
//! let root = window.root();
//! let tree = window.tree_mut();
//! let column = tree.add_vertical(root)?;
//! tree.set_expand(column, Expand::Both);
//! tree.add_text(column, "Hello, world")?;
//! let ok = tree.add_button(column, "OK")?;
//! tree.set_on_pressed(ok, |tree, id| tree.set_text(id, "Thanks"));
//!
//! let stats = window.frame();
//! assert_eq!(stats.containers_placed, 2);
//! # Ok::<(), trellis::TrellisError>(())
//! ```

pub use trellis_core::*;

/// Geometry, draw lists and the renderer interface.
pub mod render {
    pub use trellis_render::*;
}

/// Themes and per-control property overrides.
pub mod style {
    pub use trellis_style::*;
}

pub mod container;
pub mod control;
pub mod icons;
pub mod interaction;
pub mod loader;
pub mod metrics;
mod paint;
pub mod prelude;
pub mod widgets;
pub mod window;

pub use container::{BoxLayout, ContainerState, Grow, Layout, LayoutStats, Margins};
pub use control::{Axis, ControlHandler, ControlId, ControlKind, ControlNode, ControlTree, ControlType, Expand, Invalidation};
pub use icons::{Icon, IconSet};
pub use interaction::MouseButton;
pub use loader::{ControlList, LoadReport};
pub use metrics::{FixedMetrics, TextMetrics};
pub use window::{Window, load_application};
