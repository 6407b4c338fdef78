//! The paint traversal.

use trellis_render::DrawList;

use crate::container::Layout;
use crate::control::{ControlId, ControlKind, ControlTree};

impl ControlTree {
    /// Append draw commands for `id` and everything beneath it.
    ///
    /// Children are painted in insertion order, so later controls land on
    /// top. Invisible controls and their subtrees are skipped. Positions
    /// are absolute (window coordinates).
    pub fn paint(&self, id: ControlId, list: &mut DrawList) {
        let Some(node) = self.node(id) else {
            return;
        };
        if !node.visible {
            return;
        }
        match &node.kind {
            ControlKind::Container(state) => {
                if matches!(state.layout, Layout::Tree(_)) {
                    self.paint_tree(id, list);
                }
                for &child in self.controls(id) {
                    self.paint(child, list);
                }
            }
            ControlKind::Text(_) => self.paint_text(id, list),
            ControlKind::Button(_) => self.paint_button(id, list),
            ControlKind::Checkbox(_) => self.paint_checkbox(id, list),
            ControlKind::Panel => self.paint_panel(id, list),
            ControlKind::Separator(_) => self.paint_separator(id, list),
            ControlKind::TreeItem(_) => self.paint_tree_item(id, list),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::ControlType;
    use trellis_core::TrellisConfig;
    use trellis_render::{DrawCommand, Point, Rect, Size};
    use trellis_style::ThemeProperty;

    #[test]
    fn test_paint_order_and_offsets() {
        let mut tree = ControlTree::new(TrellisConfig::default());
        let root = tree.create_control(ControlType::Container);
        tree.set_position(root, Point::new(5.0, 5.0));
        let a = tree.add_panel(root).unwrap();
        let b = tree.add_panel(root).unwrap();
        tree.set_size(a, Size::new(10.0, 10.0));
        tree.set_size(b, Size::new(20.0, 20.0));
        tree.set_position(b, Point::new(1.0, 2.0));

        let mut list = DrawList::new();
        tree.paint(root, &mut list);
        let rects: Vec<Rect> = list
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Rectangle { rect, .. } => Some(*rect),
                _ => None,
            })
            .collect();
        assert_eq!(rects, vec![Rect::new(5.0, 5.0, 10.0, 10.0), Rect::new(6.0, 7.0, 20.0, 20.0)]);
    }

    #[test]
    fn test_hidden_subtree_not_painted() {
        let mut tree = ControlTree::new(TrellisConfig::default());
        let root = tree.create_control(ControlType::VerticalContainer);
        let column = tree.add_vertical(root).unwrap();
        tree.add_text(column, "gone").unwrap();
        tree.set_visible(column, false);

        let mut list = DrawList::new();
        tree.paint(root, &mut list);
        assert!(list.is_empty());
    }

    #[test]
    fn test_override_color_used() {
        let mut tree = ControlTree::new(TrellisConfig::default());
        let root = tree.create_control(ControlType::Container);
        let panel = tree.add_panel(root).unwrap();
        tree.set_size(panel, Size::new(4.0, 4.0));
        let red = trellis_render::Color::from_rgb8(255, 0, 0);
        tree.set_property(panel, ThemeProperty::Panel, red);

        let mut list = DrawList::new();
        tree.paint(root, &mut list);
        assert_eq!(list.commands()[0].color(), red);
    }
}
