//! Push buttons.

use trellis_render::{DrawList, Point, Rect};
use trellis_style::ThemeProperty;

use super::TextState;
use crate::control::{ControlHandler, ControlId, ControlKind, ControlTree, Invalidation};

/// Button payload.
#[derive(Default)]
pub struct ButtonState {
    pub(crate) label: TextState,
    pub(crate) hovered: bool,
    pub(crate) pressed: bool,
    pub(crate) on_pressed: Option<ControlHandler>,
}

impl ButtonState {
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }
}

impl std::fmt::Debug for ButtonState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ButtonState")
            .field("label", &self.label)
            .field("hovered", &self.hovered)
            .field("pressed", &self.pressed)
            .field("on_pressed", &self.on_pressed.is_some())
            .finish()
    }
}

impl ControlTree {
    fn button_mut(&mut self, id: ControlId) -> Option<&mut ButtonState> {
        match &mut self.node_mut(id)?.kind {
            ControlKind::Button(state) => Some(state),
            _ => None,
        }
    }

    /// Run `handler` when the button is released inside its bounds.
    pub fn set_on_pressed(&mut self, id: ControlId, handler: impl FnMut(&mut ControlTree, ControlId) + 'static) {
        if let Some(state) = self.button_mut(id) {
            state.on_pressed = Some(Box::new(handler));
        }
    }

    pub(crate) fn button_set_hovered(&mut self, id: ControlId, hovered: bool) {
        if let Some(state) = self.button_mut(id)
            && state.hovered != hovered
        {
            state.hovered = hovered;
            self.invalidate(id, Invalidation::Paint);
        }
    }

    pub(crate) fn button_press(&mut self, id: ControlId) -> bool {
        let Some(state) = self.button_mut(id) else {
            return false;
        };
        state.pressed = true;
        self.invalidate(id, Invalidation::Paint);
        true
    }

    pub(crate) fn button_release(&mut self, id: ControlId, point: Point) -> bool {
        let Some(state) = self.button_mut(id) else {
            return false;
        };
        if !std::mem::take(&mut state.pressed) {
            return false;
        }
        self.invalidate(id, Invalidation::Paint);
        if self.contains(id, point) {
            self.fire_pressed(id);
        }
        true
    }

    fn fire_pressed(&mut self, id: ControlId) {
        let Some(mut handler) = self.button_mut(id).and_then(|s| s.on_pressed.take()) else {
            return;
        };
        handler(self, id);
        self.restore_handler(id, handler, |node| match &mut node.kind {
            ControlKind::Button(state) => Some(&mut state.on_pressed),
            _ => None,
        });
    }

    pub(crate) fn paint_button(&self, id: ControlId, list: &mut DrawList) {
        let Some(ControlKind::Button(state)) = self.node(id).map(|n| &n.kind) else {
            return;
        };
        let background = if state.pressed {
            ThemeProperty::ButtonPressed
        } else if state.hovered {
            ThemeProperty::ButtonHovered
        } else {
            ThemeProperty::Button
        };
        let bounds = self.absolute_bounds(id);
        list.rectangle(bounds, self.property(id, background).to_color());
        list.rectangle_outline(
            bounds,
            self.property(id, ThemeProperty::Outline).to_color(),
            self.property(id, ThemeProperty::OutlineThickness).to_float(),
        );

        let text = self.measure_label(id);
        let origin = centered(bounds, text.width, text.height);
        let color = self.property(id, ThemeProperty::Text).to_color();
        list.text(origin, self.text(id), self.font_size(id), color);
    }
}

/// Top-left corner of a `width` x `height` box centered in `bounds`.
fn centered(bounds: Rect, width: f32, height: f32) -> Point {
    Point::new(
        bounds.left() + (bounds.width() - width) * 0.5,
        bounds.top() + (bounds.height() - height) * 0.5,
    )
}
