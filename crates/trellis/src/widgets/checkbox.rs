//! Two-state check boxes.

use trellis_render::{DrawList, Point, Rect};
use trellis_style::ThemeProperty;

use super::TextState;
use crate::control::{ControlHandler, ControlId, ControlKind, ControlTree, Invalidation};
use crate::icons::Icon;

/// Checkbox payload.
#[derive(Default)]
pub struct CheckboxState {
    pub(crate) label: TextState,
    pub(crate) checked: bool,
    pub(crate) pressed: bool,
    pub(crate) on_toggled: Option<ControlHandler>,
}

impl std::fmt::Debug for CheckboxState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckboxState")
            .field("label", &self.label)
            .field("checked", &self.checked)
            .field("pressed", &self.pressed)
            .finish_non_exhaustive()
    }
}

impl ControlTree {
    fn checkbox_mut(&mut self, id: ControlId) -> Option<&mut CheckboxState> {
        match &mut self.node_mut(id)?.kind {
            ControlKind::Checkbox(state) => Some(state),
            _ => None,
        }
    }

    pub fn is_checked(&self, id: ControlId) -> bool {
        matches!(self.node(id).map(|n| &n.kind), Some(ControlKind::Checkbox(state)) if state.checked)
    }

    /// Set the checked state without notifying the toggled handler.
    pub fn set_checked(&mut self, id: ControlId, checked: bool) {
        if let Some(state) = self.checkbox_mut(id)
            && state.checked != checked
        {
            state.checked = checked;
            self.invalidate(id, Invalidation::Paint);
        }
    }

    /// Run `handler` after a click flips the checked state.
    pub fn set_on_toggled(&mut self, id: ControlId, handler: impl FnMut(&mut ControlTree, ControlId) + 'static) {
        if let Some(state) = self.checkbox_mut(id) {
            state.on_toggled = Some(Box::new(handler));
        }
    }

    pub(crate) fn checkbox_press(&mut self, id: ControlId) -> bool {
        let Some(state) = self.checkbox_mut(id) else {
            return false;
        };
        state.pressed = true;
        true
    }

    pub(crate) fn checkbox_release(&mut self, id: ControlId, point: Point) -> bool {
        let Some(state) = self.checkbox_mut(id) else {
            return false;
        };
        if !std::mem::take(&mut state.pressed) {
            return false;
        }
        if !self.contains(id, point) {
            return true;
        }

        let checked = !self.is_checked(id);
        self.set_checked(id, checked);
        let Some(mut handler) = self.checkbox_mut(id).and_then(|s| s.on_toggled.take()) else {
            return true;
        };
        handler(self, id);
        self.restore_handler(id, handler, |node| match &mut node.kind {
            ControlKind::Checkbox(state) => Some(&mut state.on_toggled),
            _ => None,
        });
        true
    }

    pub(crate) fn paint_checkbox(&self, id: ControlId, list: &mut DrawList) {
        let origin = self.absolute_position(id);
        let side = self.config().checkbox_size;
        let text = self.measure_label(id);
        let box_top = origin.y + ((text.height - side) * 0.5).max(0.0);
        let check_box = Rect::new(origin.x, box_top, side, side);

        list.rectangle(check_box, self.property(id, ThemeProperty::CheckBox).to_color());
        if self.is_checked(id) {
            let icons = self.icons();
            let uv = icons.uv(Icon::Check);
            let glyph = Rect::new(
                check_box.left() + (side - uv.width()) * 0.5,
                check_box.top() + (side - uv.height()) * 0.5,
                uv.width(),
                uv.height(),
            );
            list.textured(glyph, icons.texture(), uv, self.property(id, ThemeProperty::Check).to_color());
        }

        let label_origin = Point::new(
            origin.x + side + self.config().label_gap,
            origin.y + ((side - text.height) * 0.5).max(0.0),
        );
        let color = self.property(id, ThemeProperty::Text).to_color();
        list.text(label_origin, self.text(id), self.font_size(id), color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::ControlType;
    use trellis_core::TrellisConfig;
    use trellis_render::DrawCommand;

    #[test]
    fn test_click_toggles_and_notifies() {
        let mut tree = ControlTree::new(TrellisConfig::default());
        let root = tree.create_control(ControlType::Container);
        let check = tree.add_checkbox(root, "On").unwrap();
        tree.set_on_toggled(check, |tree, id| {
            let label = if tree.is_checked(id) { "Yes" } else { "No" };
            tree.set_text(id, label);
        });

        tree.checkbox_press(check);
        tree.checkbox_release(check, Point::new(1.0, 1.0));
        assert!(tree.is_checked(check));
        assert_eq!(tree.text(check), "Yes");

        tree.checkbox_press(check);
        tree.checkbox_release(check, Point::new(1.0, 1.0));
        assert!(!tree.is_checked(check));
        assert_eq!(tree.text(check), "No");
    }

    #[test]
    fn test_check_glyph_only_when_checked() {
        let mut tree = ControlTree::new(TrellisConfig::default());
        let root = tree.create_control(ControlType::Container);
        let check = tree.add_checkbox(root, "On").unwrap();

        let mut list = DrawList::new();
        tree.paint_checkbox(check, &mut list);
        assert!(!list.commands().iter().any(|c| matches!(c, DrawCommand::Textured { .. })));

        tree.set_checked(check, true);
        list.clear();
        tree.paint_checkbox(check, &mut list);
        assert!(list.commands().iter().any(|c| matches!(c, DrawCommand::Textured { .. })));
    }
}
