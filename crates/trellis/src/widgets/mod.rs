//! Leaf control kinds and the Tree composite.
//!
//! Each module holds the payload struct of one kind plus its painting and
//! mouse behavior, written as `ControlTree` methods. Dispatch by kind
//! happens in [`ControlTree::paint`] and [`crate::interaction`].
//!
//! Text-bearing kinds (text, button, checkbox, tree rows) share the label
//! API defined here: [`ControlTree::set_text`], [`ControlTree::text`],
//! [`ControlTree::set_font_size`], [`ControlTree::font_size`].

mod button;
mod checkbox;
mod panel;
mod separator;
mod text;
mod tree;

pub use button::ButtonState;
pub use checkbox::CheckboxState;
pub use separator::SeparatorState;
pub use text::TextState;
pub use tree::{TreeItemState, TreeState};

use trellis_render::Size;
use trellis_style::ThemeProperty;

use crate::container::Layout;
use crate::control::{ControlId, ControlKind, ControlTree, Invalidation};

impl ControlTree {
    /// The label of a text-bearing control. A Tree resolves to its row.
    pub(crate) fn label(&self, id: ControlId) -> Option<&TextState> {
        let node = self.node(id)?;
        match &node.kind {
            ControlKind::Text(label) => Some(label),
            ControlKind::Button(b) => Some(&b.label),
            ControlKind::Checkbox(c) => Some(&c.label),
            ControlKind::TreeItem(item) => Some(&item.label),
            ControlKind::Container(state) => match &state.layout {
                Layout::Tree(t) => self.label(t.item),
                _ => None,
            },
            ControlKind::Panel | ControlKind::Separator(_) => None,
        }
    }

    /// Resolve the control owning the label of `id`: itself, or a Tree's row.
    fn label_owner(&self, id: ControlId) -> Option<ControlId> {
        match &self.node(id)?.kind {
            ControlKind::Text(_) | ControlKind::Button(_) | ControlKind::Checkbox(_) | ControlKind::TreeItem(_) => {
                Some(id)
            }
            ControlKind::Container(state) => match &state.layout {
                Layout::Tree(t) => Some(t.item),
                _ => None,
            },
            ControlKind::Panel | ControlKind::Separator(_) => None,
        }
    }

    fn label_mut(&mut self, id: ControlId) -> Option<&mut TextState> {
        match &mut self.node_mut(id)?.kind {
            ControlKind::Text(label) => Some(label),
            ControlKind::Button(b) => Some(&mut b.label),
            ControlKind::Checkbox(c) => Some(&mut c.label),
            ControlKind::TreeItem(item) => Some(&mut item.label),
            _ => None,
        }
    }

    /// Label text, or `""` for kinds without one.
    pub fn text(&self, id: ControlId) -> &str {
        self.label(id).map(|l| l.text.as_str()).unwrap_or_default()
    }

    /// Replace the label text and re-measure.
    pub fn set_text(&mut self, id: ControlId, text: &str) {
        let Some(owner) = self.label_owner(id) else {
            return;
        };
        let Some(label) = self.label_mut(owner) else {
            return;
        };
        if label.text != text {
            label.text = text.to_owned();
            self.refresh_preferred_size(owner);
            self.invalidate(owner, Invalidation::Paint);
        }
    }

    /// Font size of the label: its own if set, else the `FontSize`
    /// property.
    pub fn font_size(&self, id: ControlId) -> f32 {
        let explicit = self.label(id).and_then(|l| l.font_size);
        explicit.unwrap_or_else(|| {
            let owner = self.label_owner(id).unwrap_or(id);
            self.property(owner, ThemeProperty::FontSize).to_float()
        })
    }

    /// Set or clear (`None`) the label's own font size.
    pub fn set_font_size(&mut self, id: ControlId, font_size: Option<f32>) {
        let Some(owner) = self.label_owner(id) else {
            return;
        };
        let Some(label) = self.label_mut(owner) else {
            return;
        };
        if label.font_size != font_size {
            label.font_size = font_size;
            self.refresh_preferred_size(owner);
            self.invalidate(owner, Invalidation::Paint);
        }
    }

    /// Measured size of a label at its resolved font size.
    pub(crate) fn measure_label(&self, id: ControlId) -> Size {
        let font_size = self.font_size(id);
        self.metrics().measure(self.text(id), font_size)
    }

    /// Size derived from content, for kinds whose size is content-driven.
    pub(crate) fn content_size(&self, id: ControlId) -> Option<Size> {
        let config = self.config();
        match &self.node(id)?.kind {
            ControlKind::Text(_) => Some(self.measure_label(id)),
            ControlKind::Button(_) => {
                let [px, py] = config.button_padding;
                let text = self.measure_label(id);
                Some(Size::new(text.width + px * 2.0, text.height + py * 2.0))
            }
            ControlKind::Checkbox(_) => {
                let text = self.measure_label(id);
                let side = config.checkbox_size;
                let gap = if text.width > 0.0 { config.label_gap } else { 0.0 };
                Some(Size::new(side + gap + text.width, side.max(text.height)))
            }
            ControlKind::TreeItem(_) => {
                let text = self.measure_label(id);
                let toggle = config.tree.toggle_size;
                Some(Size::new(toggle + text.width, toggle.max(text.height)))
            }
            ControlKind::Separator(state) => Some(state.preferred_size(config.separator_thickness)),
            ControlKind::Container(_) | ControlKind::Panel => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::ControlType;
    use trellis_core::TrellisConfig;

    fn setup() -> (ControlTree, ControlId) {
        let mut tree = ControlTree::new(TrellisConfig::default());
        let root = tree.create_control(ControlType::VerticalContainer);
        (tree, root)
    }

    #[test]
    fn test_text_measures_itself() {
        let (mut tree, root) = setup();
        let text = tree.add_text(root, "Hi").unwrap();
        assert_eq!(tree.text(text), "Hi");
        assert_eq!(tree.preferred_size(text), Size::new(16.0, 20.0));

        tree.set_font_size(text, Some(32.0));
        assert_eq!(tree.font_size(text), 32.0);
        assert_eq!(tree.size(text), Size::new(32.0, 40.0));
    }

    #[test]
    fn test_font_size_follows_override() {
        let (mut tree, root) = setup();
        let text = tree.add_text(root, "abcd").unwrap();
        tree.set_property(text, ThemeProperty::FontSize, 8.0_f32);
        assert_eq!(tree.font_size(text), 8.0);
        assert_eq!(tree.size(text), Size::new(16.0, 10.0));
    }

    #[test]
    fn test_button_adds_padding() {
        let (mut tree, root) = setup();
        let button = tree.add_button(root, "OK").unwrap();
        assert_eq!(tree.size(button), Size::new(32.0, 28.0));
    }

    #[test]
    fn test_checkbox_box_and_label() {
        let (mut tree, root) = setup();
        let check = tree.add_checkbox(root, "On").unwrap();
        assert_eq!(tree.size(check), Size::new(36.0, 20.0));
    }

    #[test]
    fn test_label_on_unlabelled_kinds() {
        let (mut tree, root) = setup();
        let panel = tree.add_panel(root).unwrap();
        tree.set_text(panel, "ignored");
        assert_eq!(tree.text(panel), "");
        assert_eq!(tree.text(root), "");
    }

    #[test]
    fn test_tree_text_lives_on_its_row() {
        let (mut tree, root) = setup();
        let node = tree.add_tree(root, "Root").unwrap();
        let item = tree.tree_item(node).unwrap();
        assert_eq!(tree.text(node), "Root");
        assert_eq!(tree.text(item), "Root");
        assert_eq!(tree.size(item), Size::new(48.0, 20.0));
    }
}
