//! The Tree composite: a row plus a collapsible list of child Trees.
//!
//! ```text
//! Tree                      (container, Layout::Tree)
//! |-- TreeItem              toggle glyph + label, at (0, 0)
//! `-- VerticalContainer     child list, created on the first add_child
//!     |-- Tree
//!     `-- Tree
//! ```
//!
//! Collapsing detaches the child list from the Tree without destroying
//! it, so expanding again restores the same subtree with its state.
//!
//! Hover and selection are shared across a whole composite: they are
//! stored on the root Tree as the ids of the Trees whose rows are
//! highlighted.

use trellis_core::logging::targets;
use trellis_core::{Result, TrellisError};
use trellis_render::{DrawList, Point, Rect, Size};
use trellis_style::ThemeProperty;

use super::TextState;
use crate::container::{ContainerState, Layout};
use crate::control::{ControlHandler, ControlId, ControlKind, ControlNode, ControlTree, ControlType, Invalidation};
use crate::icons::Icon;

/// Payload of a Tree container.
pub struct TreeState {
    pub(crate) item: ControlId,
    pub(crate) list: Option<ControlId>,
    pub(crate) expanded: bool,
    pub(crate) hovered: Option<ControlId>,
    pub(crate) selected: Option<ControlId>,
    pub(crate) on_hovered: Option<ControlHandler>,
    pub(crate) on_selected: Option<ControlHandler>,
}

impl TreeState {
    fn new(item: ControlId) -> Self {
        Self {
            item,
            list: None,
            expanded: false,
            hovered: None,
            selected: None,
            on_hovered: None,
            on_selected: None,
        }
    }
}

impl std::fmt::Debug for TreeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeState")
            .field("item", &self.item)
            .field("list", &self.list)
            .field("expanded", &self.expanded)
            .field("hovered", &self.hovered)
            .field("selected", &self.selected)
            .finish_non_exhaustive()
    }
}

/// Payload of a Tree's row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreeItemState {
    pub(crate) label: TextState,
    /// Drawn in the highlight text color (hovered or selected).
    pub(crate) highlighted: bool,
}

#[derive(Clone, Copy)]
enum TreeSignal {
    Hovered,
    Selected,
}

impl ControlTree {
    /// Build a Tree container and its row.
    pub(crate) fn create_tree(&mut self) -> ControlId {
        let item = self.create_control(ControlType::TreeItem);
        let layout = Layout::Tree(TreeState::new(item));
        let tree = self
            .nodes
            .insert(ControlNode::new(ControlKind::Container(ContainerState::new(layout))));
        let attached = self.nodes.attach(tree, item, None);
        debug_assert!(attached.is_ok());
        tree
    }

    pub(crate) fn tree_state(&self, id: ControlId) -> Option<&TreeState> {
        match &self.as_container(id)?.layout {
            Layout::Tree(state) => Some(state),
            _ => None,
        }
    }

    fn tree_state_mut(&mut self, id: ControlId) -> Option<&mut TreeState> {
        match &mut self.container_mut(id)?.layout {
            Layout::Tree(state) => Some(state),
            _ => None,
        }
    }

    pub fn is_tree(&self, id: ControlId) -> bool {
        self.tree_state(id).is_some()
    }

    /// The row control of a Tree.
    pub fn tree_item(&self, tree: ControlId) -> Option<ControlId> {
        self.tree_state(tree).map(|s| s.item)
    }

    /// The Tree that owns a row.
    pub fn item_tree(&self, item: ControlId) -> Option<ControlId> {
        self.parent(item).filter(|&tree| self.tree_item(tree) == Some(item))
    }

    /// The child-list container, once a child has been added. The id stays
    /// the same across collapse and expand.
    pub fn child_list(&self, tree: ControlId) -> Option<ControlId> {
        self.tree_state(tree).and_then(|s| s.list)
    }

    pub fn is_expanded(&self, tree: ControlId) -> bool {
        self.tree_state(tree).is_some_and(|s| s.expanded)
    }

    /// Child Trees, whether or not the list is currently expanded.
    pub fn tree_children(&self, tree: ControlId) -> Vec<ControlId> {
        self.child_list(tree)
            .map(|list| self.controls(list).to_vec())
            .unwrap_or_default()
    }

    /// Append a child Tree labelled `text`.
    ///
    /// The first child creates the child list and expands the Tree.
    pub fn add_child(&mut self, tree: ControlId, text: &str) -> Result<ControlId> {
        let Some(state) = self.tree_state(tree) else {
            self.require(tree)?;
            return Err(TrellisError::NotAContainer(tree));
        };
        let existing = state.list;
        let list = match existing {
            Some(list) => list,
            None => {
                let list = self.create_control(ControlType::VerticalContainer);
                self.set_spacing(list, 0.0);
                if let Some(state) = self.container_mut(list) {
                    state.tree_owner = Some(tree);
                }
                self.insert_control(tree, list, None)?;
                if let Some(state) = self.tree_state_mut(tree) {
                    state.list = Some(list);
                    state.expanded = true;
                }
                list
            }
        };

        let child = self.create_control(ControlType::Tree);
        self.set_text(child, text);
        self.insert_control(list, child, None)?;
        Ok(child)
    }

    /// Show or hide the child list. Does nothing before the first child.
    pub fn set_expanded(&mut self, tree: ControlId, expanded: bool) {
        let Some(state) = self.tree_state_mut(tree) else {
            return;
        };
        let Some(list) = state.list else {
            return;
        };
        if state.expanded == expanded {
            return;
        }
        state.expanded = expanded;

        if expanded {
            if let Err(error) = self.insert_control(tree, list, None) {
                tracing::error!(target: targets::TREE, %error, "failed to reattach child list");
            }
        } else {
            self.remove_control(tree, list);
        }
        tracing::debug!(target: targets::TREE, tree = tree.as_raw(), expanded, "toggled");
    }

    /// The outermost Tree of `tree`'s composite, following child lists up
    /// to their owners whether or not they are expanded.
    pub fn tree_root(&self, tree: ControlId) -> ControlId {
        let mut current = tree;
        while let Some(list) = self.parent(current)
            && let Some(owner) = self.as_container(list).and_then(|s| s.tree_owner)
            && self.child_list(owner) == Some(list)
        {
            current = owner;
        }
        current
    }

    /// The Tree whose row is hovered, anywhere in `tree`'s composite.
    pub fn tree_hovered(&self, tree: ControlId) -> Option<ControlId> {
        let root = self.tree_root(tree);
        self.tree_state(root)
            .and_then(|s| s.hovered)
            .filter(|&id| self.in_composite(id, root))
    }

    /// The Tree whose row is selected, anywhere in `tree`'s composite.
    pub fn tree_selected(&self, tree: ControlId) -> Option<ControlId> {
        let root = self.tree_root(tree);
        self.tree_state(root)
            .and_then(|s| s.selected)
            .filter(|&id| self.in_composite(id, root))
    }

    fn in_composite(&self, id: ControlId, root: ControlId) -> bool {
        self.contains_control(id) && self.tree_root(id) == root
    }

    /// Child lists of collapsed Trees at or under `id`. They hang off their
    /// owners by id only and are missed by a hierarchy walk.
    pub(crate) fn collapsed_lists(&self, id: ControlId) -> Result<Vec<ControlId>> {
        Ok(self
            .nodes
            .depth_first_preorder(id)?
            .into_iter()
            .filter_map(|node| {
                let list = self.child_list(node)?;
                (!self.has_control(node, list)).then_some(list)
            })
            .collect())
    }

    /// Forget `list` on its owning Tree when the list itself is destroyed.
    pub(crate) fn release_child_list(&mut self, list: ControlId) {
        let Some(owner) = self.as_container(list).and_then(|s| s.tree_owner) else {
            return;
        };
        if self.child_list(owner) != Some(list) {
            return;
        }
        if let Some(state) = self.tree_state_mut(owner) {
            state.list = None;
            state.expanded = false;
        }
        self.invalidate(owner, Invalidation::Both);
    }

    /// Clear the hover and selection of the composite around `container`
    /// when they lie inside `child`, which is about to be detached from it.
    ///
    /// Detaching a collapsing Tree's own child list keeps them.
    pub(crate) fn release_tree_targets(&mut self, container: ControlId, child: ControlId) {
        let owner = if self.is_tree(container) {
            container
        } else {
            match self.as_container(container).and_then(|s| s.tree_owner) {
                Some(owner) => owner,
                None => return,
            }
        };
        if self.child_list(owner) == Some(child) {
            return;
        }
        let root = self.tree_root(owner);
        let (hovered, selected) = match self.tree_state(root) {
            Some(state) => (state.hovered, state.selected),
            None => return,
        };
        let doomed = |id: Option<ControlId>| id.filter(|&id| self.is_within(id, child));
        let (hovered, selected) = (doomed(hovered), doomed(selected));
        if hovered.is_none() && selected.is_none() {
            return;
        }
        for target in [hovered, selected].into_iter().flatten() {
            self.set_highlighted(target, false);
        }
        if let Some(state) = self.tree_state_mut(root) {
            if hovered.is_some() {
                state.hovered = None;
            }
            if selected.is_some() {
                state.selected = None;
            }
        }
        self.invalidate(root, Invalidation::Paint);
        trellis_core::trellis_debug!(root = root.as_raw(), child = child.as_raw(), "released detached tree targets");
    }

    /// Whether `tree`'s row is drawn highlighted.
    pub fn is_highlighted(&self, tree: ControlId) -> bool {
        let Some(item) = self.tree_item(tree) else {
            return false;
        };
        matches!(self.node(item).map(|n| &n.kind), Some(ControlKind::TreeItem(state)) if state.highlighted)
    }

    fn set_highlighted(&mut self, tree: ControlId, highlighted: bool) {
        let Some(item) = self.tree_item(tree) else {
            return;
        };
        if let Some(node) = self.node_mut(item)
            && let ControlKind::TreeItem(state) = &mut node.kind
            && state.highlighted != highlighted
        {
            state.highlighted = highlighted;
            self.invalidate(item, Invalidation::Paint);
        }
    }

    /// Set or clear hover on `tree`'s row.
    ///
    /// Hovering a row replaces the previous hovered row of the composite,
    /// whose highlight is dropped unless it is selected. Clearing hover on a
    /// row that is not hovered does nothing.
    pub fn set_tree_hovered(&mut self, tree: ControlId, hovered: bool) {
        if !self.is_tree(tree) {
            return;
        }
        let root = self.tree_root(tree);
        let previous = self.tree_hovered(root);
        let selected = self.tree_selected(root);

        if previous == Some(tree) {
            if hovered {
                return;
            }
            if selected != Some(tree) {
                self.set_highlighted(tree, false);
            }
            if let Some(state) = self.tree_state_mut(root) {
                state.hovered = None;
            }
        } else {
            if !hovered {
                return;
            }
            if let Some(previous) = previous
                && selected != Some(previous)
            {
                self.set_highlighted(previous, false);
            }
            self.set_highlighted(tree, true);
            if let Some(state) = self.tree_state_mut(root) {
                state.hovered = Some(tree);
            }
        }

        self.invalidate(root, Invalidation::Paint);
        tracing::trace!(target: targets::TREE, tree = tree.as_raw(), hovered, "hover changed");
        self.notify_tree(root, tree, TreeSignal::Hovered);
    }

    /// Select `tree`'s row, replacing the composite's previous selection.
    pub fn set_tree_selected(&mut self, tree: ControlId) {
        if !self.is_tree(tree) {
            return;
        }
        let root = self.tree_root(tree);
        let previous = self.tree_selected(root);
        if previous == Some(tree) {
            return;
        }
        if let Some(previous) = previous {
            self.set_highlighted(previous, false);
        }
        self.set_highlighted(tree, true);
        if let Some(state) = self.tree_state_mut(root) {
            state.selected = Some(tree);
        }

        self.invalidate(root, Invalidation::Paint);
        tracing::debug!(target: targets::TREE, tree = tree.as_raw(), "selected");
        self.notify_tree(root, tree, TreeSignal::Selected);
    }

    /// Run `handler` after any row of the composite gains or loses hover.
    ///
    /// The handler receives the Tree whose row changed.
    pub fn set_on_tree_hovered(&mut self, tree: ControlId, handler: impl FnMut(&mut ControlTree, ControlId) + 'static) {
        let root = self.tree_root(tree);
        if let Some(state) = self.tree_state_mut(root) {
            state.on_hovered = Some(Box::new(handler));
        }
    }

    /// Run `handler` after a row of the composite is selected.
    pub fn set_on_tree_selected(&mut self, tree: ControlId, handler: impl FnMut(&mut ControlTree, ControlId) + 'static) {
        let root = self.tree_root(tree);
        if let Some(state) = self.tree_state_mut(root) {
            state.on_selected = Some(Box::new(handler));
        }
    }

    fn notify_tree(&mut self, root: ControlId, tree: ControlId, signal: TreeSignal) {
        let handler = self.tree_state_mut(root).and_then(|s| match signal {
            TreeSignal::Hovered => s.on_hovered.take(),
            TreeSignal::Selected => s.on_selected.take(),
        });
        let Some(mut handler) = handler else {
            return;
        };
        handler(self, tree);
        self.restore_handler(root, handler, |node| match &mut node.kind {
            ControlKind::Container(ContainerState {
                layout: Layout::Tree(state),
                ..
            }) => Some(match signal {
                TreeSignal::Hovered => &mut state.on_hovered,
                TreeSignal::Selected => &mut state.on_selected,
            }),
            _ => None,
        });
    }

    /// Whether `tree`'s row is inside a collapsed part of its composite.
    pub fn is_item_hidden(&self, tree: ControlId) -> bool {
        !self.tree_reaches(self.tree_root(tree), tree)
    }

    fn tree_reaches(&self, from: ControlId, target: ControlId) -> bool {
        if from == target {
            return true;
        }
        if !self.is_expanded(from) {
            return false;
        }
        self.tree_children(from)
            .into_iter()
            .any(|child| self.tree_reaches(child, target))
    }

    /// Row under `point`: each row's hit band spans the full width of
    /// `tree`, the Tree being hit-tested.
    pub(crate) fn tree_control_at(&self, tree: ControlId, point: Point) -> Option<ControlId> {
        let bounds = self.absolute_bounds(tree);
        self.tree_row_at(tree, point, bounds.left(), bounds.right())
    }

    fn tree_row_at(&self, tree: ControlId, point: Point, left: f32, right: f32) -> Option<ControlId> {
        let item = self.tree_item(tree)?;
        if self.is_visible(item) && self.row_band(item, left, right).contains(point) {
            return Some(item);
        }
        if !self.is_expanded(tree) {
            return None;
        }
        self.tree_children(tree)
            .into_iter()
            .filter(|&child| self.is_visible(child))
            .find_map(|child| self.tree_row_at(child, point, left, right))
    }

    fn row_band(&self, item: ControlId, left: f32, right: f32) -> Rect {
        let row = self.absolute_bounds(item);
        Rect::new(left, row.top(), right - left, row.height())
    }

    fn list_offset(&self, tree: ControlId) -> Point {
        let item = self.tree_item(tree).map(|i| self.preferred_size(i)).unwrap_or_default();
        let config = self.config().tree;
        Point::new(config.toggle_size + config.indent, item.height)
    }

    pub(crate) fn tree_desired_size(&self, tree: ControlId) -> Size {
        let Some(item) = self.tree_item(tree) else {
            return Size::ZERO;
        };
        let mut result = self.desired_size(item);
        if self.is_expanded(tree)
            && let Some(list) = self.child_list(tree)
        {
            let list_size = self.desired_size(list);
            let offset = self.list_offset(tree);
            result.width = result.width.max(offset.x + list_size.width);
            result.height += list_size.height;
        }
        result
    }

    pub(crate) fn place_tree(&mut self, tree: ControlId) {
        let Some(item) = self.tree_item(tree) else {
            return;
        };
        let item_size = self.desired_size(item);
        self.apply_geometry(item, Point::ZERO, item_size);

        if self.is_expanded(tree)
            && let Some(list) = self.child_list(tree)
        {
            let offset = self.list_offset(tree);
            let size = self.desired_size(list);
            self.apply_geometry(list, offset, size);
        }
    }

    /// Mouse press on a row: the toggle square flips expansion, the rest of
    /// the row selects.
    pub(crate) fn tree_item_press(&mut self, item: ControlId, point: Point) -> bool {
        let Some(tree) = self.item_tree(item) else {
            return false;
        };
        let origin = self.absolute_position(item);
        let toggle = self.config().tree.toggle_size;
        if Rect::from_origin_size(origin, Size::new(toggle, toggle)).contains(point) {
            let expanded = self.is_expanded(tree);
            self.set_expanded(tree, !expanded);
        } else {
            self.set_tree_selected(tree);
        }
        true
    }

    pub(crate) fn tree_item_hover(&mut self, item: ControlId, hovered: bool) {
        if let Some(tree) = self.item_tree(item) {
            self.set_tree_hovered(tree, hovered);
        }
    }

    /// Selection bands, painted under the rows of a root Tree.
    pub(crate) fn paint_tree(&self, tree: ControlId, list: &mut DrawList) {
        if self.tree_root(tree) != tree {
            return;
        }
        let hovered = self.tree_hovered(tree);
        let selected = self.tree_selected(tree);
        let bounds = self.absolute_bounds(tree);

        if let Some(hovered) = hovered
            && Some(hovered) != selected
        {
            self.paint_band(tree, hovered, bounds, ThemeProperty::SelectionHovered, list);
        }
        if let Some(selected) = selected {
            self.paint_band(tree, selected, bounds, ThemeProperty::Selection, list);
        }
    }

    fn paint_band(
        &self,
        root: ControlId,
        target: ControlId,
        bounds: Rect,
        property: ThemeProperty,
        list: &mut DrawList,
    ) {
        if self.is_item_hidden(target) {
            return;
        }
        let Some(item) = self.tree_item(target) else {
            return;
        };
        let band = self.row_band(item, bounds.left(), bounds.right());
        list.rectangle(band, self.property(root, property).to_color());
    }

    /// Toggle glyph (when the Tree has children) and label.
    pub(crate) fn paint_tree_item(&self, item: ControlId, list: &mut DrawList) {
        let Some(ControlKind::TreeItem(state)) = self.node(item).map(|n| &n.kind) else {
            return;
        };
        let origin = self.absolute_position(item);
        let toggle = self.config().tree.toggle_size;

        if let Some(tree) = self.item_tree(item)
            && self.child_list(tree).is_some()
        {
            let icon = if self.is_expanded(tree) { Icon::Expand } else { Icon::Collapse };
            let icons = self.icons();
            let uv = icons.uv(icon);
            let glyph = Rect::new(
                origin.x + (toggle - uv.width()) * 0.5,
                origin.y + (toggle - uv.height()) * 0.5,
                uv.width(),
                uv.height(),
            );
            let tint = if state.highlighted { ThemeProperty::TextHighlight } else { ThemeProperty::Toggle };
            list.textured(glyph, icons.texture(), uv, self.property(item, tint).to_color());
        }

        let color = if state.highlighted { ThemeProperty::TextHighlight } else { ThemeProperty::Text };
        list.text(
            Point::new(origin.x + toggle, origin.y),
            state.label.text.as_str(),
            self.font_size(item),
            self.property(item, color).to_color(),
        );
    }
}
