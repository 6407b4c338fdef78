//! Per-control mouse hooks.
//!
//! [`Window`](crate::Window) decides which control an event targets; these
//! hooks apply it. Each returns whether the control consumed the event.

use trellis_core::logging::targets;
use trellis_render::Point;

use crate::control::{ControlId, ControlKind, ControlTree};

/// A mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl ControlTree {
    pub fn mouse_pressed(&mut self, id: ControlId, point: Point, button: MouseButton) -> bool {
        if button != MouseButton::Left {
            return false;
        }
        let consumed = match self.node(id).map(|n| &n.kind) {
            Some(ControlKind::Button(_)) => self.button_press(id),
            Some(ControlKind::Checkbox(_)) => self.checkbox_press(id),
            Some(ControlKind::TreeItem(_)) => self.tree_item_press(id, point),
            _ => false,
        };
        tracing::trace!(target: targets::INPUT, id = id.as_raw(), consumed, "mouse pressed");
        consumed
    }

    pub fn mouse_released(&mut self, id: ControlId, point: Point, button: MouseButton) -> bool {
        if button != MouseButton::Left {
            return false;
        }
        match self.node(id).map(|n| &n.kind) {
            Some(ControlKind::Button(_)) => self.button_release(id, point),
            Some(ControlKind::Checkbox(_)) => self.checkbox_release(id, point),
            _ => false,
        }
    }

    /// Pointer motion. A pressed button or checkbox consumes motion until
    /// release; other kinds only react to enter and leave.
    pub fn mouse_moved(&mut self, id: ControlId, _point: Point) -> bool {
        match self.node(id).map(|n| &n.kind) {
            Some(ControlKind::Button(state)) => state.pressed,
            Some(ControlKind::Checkbox(state)) => state.pressed,
            _ => false,
        }
    }

    pub fn mouse_entered(&mut self, id: ControlId) {
        self.set_hover(id, true);
    }

    pub fn mouse_left(&mut self, id: ControlId) {
        self.set_hover(id, false);
    }

    fn set_hover(&mut self, id: ControlId, hovered: bool) {
        match self.node(id).map(|n| &n.kind) {
            Some(ControlKind::Button(_)) => self.button_set_hovered(id, hovered),
            Some(ControlKind::TreeItem(_)) => self.tree_item_hover(id, hovered),
            _ => {}
        }
    }
}
