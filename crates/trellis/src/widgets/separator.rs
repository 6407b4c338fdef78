//! Separator lines.
//!
//! A separator picks its orientation when attached: inside a horizontal
//! box it draws a vertical line spanning the box's height, anywhere else a
//! horizontal line spanning the width.

use trellis_render::{DrawList, Rect, Size};
use trellis_style::ThemeProperty;

use crate::container::Layout;
use crate::control::{ControlId, ControlKind, ControlTree, Expand, Invalidation};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeparatorState {
    pub(crate) vertical: bool,
}

impl SeparatorState {
    pub fn is_vertical(&self) -> bool {
        self.vertical
    }

    pub(crate) fn preferred_size(&self, thickness: f32) -> Size {
        if self.vertical {
            Size::new(thickness, 0.0)
        } else {
            Size::new(0.0, thickness)
        }
    }
}

impl ControlTree {
    /// Called after `child` is attached to `container`.
    pub(crate) fn on_attached(&mut self, container: ControlId, child: ControlId) {
        let vertical = matches!(
            self.as_container(container).map(|s| &s.layout),
            Some(Layout::Horizontal(_))
        );
        let Some(node) = self.node_mut(child) else {
            return;
        };
        let ControlKind::Separator(state) = &mut node.kind else {
            return;
        };
        state.vertical = vertical;
        node.expand = if vertical { Expand::Height } else { Expand::Width };
        self.refresh_preferred_size(child);
        self.invalidate(child, Invalidation::Both);
    }

    pub(crate) fn paint_separator(&self, id: ControlId, list: &mut DrawList) {
        let Some(ControlKind::Separator(state)) = self.node(id).map(|n| &n.kind) else {
            return;
        };
        let bounds = self.absolute_bounds(id);
        let thickness = self.config().separator_thickness;
        let line = if state.vertical {
            Rect::new(
                bounds.left() + (bounds.width() - thickness) * 0.5,
                bounds.top(),
                thickness,
                bounds.height(),
            )
        } else {
            Rect::new(
                bounds.left(),
                bounds.top() + (bounds.height() - thickness) * 0.5,
                bounds.width(),
                thickness,
            )
        };
        list.rectangle(line, self.property(id, ThemeProperty::Separator).to_color());
    }
}
