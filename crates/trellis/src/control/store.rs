//! The control arena and its invalidation protocol.

use trellis_core::logging::targets;
use trellis_core::{Hierarchy, HierarchyDebug, Result, TrellisConfig, TrellisError};
use trellis_render::{Point, Rect, Size};
use trellis_style::{Theme, ThemeProperty, Variant};

use super::{ControlHandler, ControlId, ControlKind, ControlNode, ControlType, Expand, Invalidation};
use crate::container::{BoxLayout, ContainerState, Layout, Margins};
use crate::icons::IconSet;
use crate::metrics::{FixedMetrics, TextMetrics};
use crate::widgets::{ButtonState, CheckboxState, SeparatorState, TextState, TreeItemState};

/// Owner of every control, the theme and the text metrics.
///
/// All operations go through the tree so that a mutation can find the
/// ancestors it has to invalidate. Controls reference their parent by
/// [`ControlId`]; the tree is single-threaded and holds no locks.
pub struct ControlTree {
    pub(crate) nodes: Hierarchy<ControlNode>,
    theme: Theme,
    metrics: Box<dyn TextMetrics>,
    icons: IconSet,
    config: TrellisConfig,
    needs_repaint: bool,
    pub(crate) in_layout: bool,
    pub(crate) deferred: Vec<(ControlId, Invalidation)>,
}

impl ControlTree {
    /// Create an empty tree with fixed-advance metrics from `config`.
    pub fn new(config: TrellisConfig) -> Self {
        let mut theme = Theme::default();
        theme.set(ThemeProperty::FontSize, config.font_size);
        Self {
            nodes: Hierarchy::new(),
            theme,
            metrics: Box::new(FixedMetrics::from(config.text)),
            icons: IconSet::default(),
            config,
            needs_repaint: true,
            in_layout: false,
            deferred: Vec::new(),
        }
    }

    /// Replace the text measurer.
    ///
    /// Call before creating text-bearing controls; existing preferred sizes
    /// are not re-measured.
    pub fn with_metrics(mut self, metrics: impl TextMetrics + 'static) -> Self {
        self.metrics = Box::new(metrics);
        self
    }

    pub fn with_icons(mut self, icons: IconSet) -> Self {
        self.icons = icons;
        self
    }

    pub fn config(&self) -> &TrellisConfig {
        &self.config
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Replace the theme and repaint.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.needs_repaint = true;
    }

    pub fn icons(&self) -> &IconSet {
        &self.icons
    }

    pub(crate) fn metrics(&self) -> &dyn TextMetrics {
        self.metrics.as_ref()
    }

    // =========================================================================
    // Creation and destruction
    // =========================================================================

    /// Create a detached control of the given type.
    ///
    /// Attach it with [`insert_control`](Self::insert_control), or use the
    /// container factory helpers which do both.
    pub fn create_control(&mut self, ty: ControlType) -> ControlId {
        let spacing = self.config.box_spacing;
        let kind = match ty {
            ControlType::Container => ControlKind::Container(ContainerState::new(Layout::Free)),
            ControlType::HorizontalContainer => {
                ControlKind::Container(ContainerState::new(Layout::Horizontal(BoxLayout::new(spacing))))
            }
            ControlType::VerticalContainer => {
                ControlKind::Container(ContainerState::new(Layout::Vertical(BoxLayout::new(spacing))))
            }
            ControlType::MarginContainer => {
                ControlKind::Container(ContainerState::new(Layout::Margin(Margins::default())))
            }
            ControlType::Tree => return self.create_tree(),
            ControlType::Text => ControlKind::Text(TextState::default()),
            ControlType::Button => ControlKind::Button(ButtonState::default()),
            ControlType::Checkbox => ControlKind::Checkbox(CheckboxState::default()),
            ControlType::Panel => ControlKind::Panel,
            ControlType::Separator => ControlKind::Separator(SeparatorState::default()),
            ControlType::TreeItem => ControlKind::TreeItem(TreeItemState::default()),
        };
        let id = self.nodes.insert(ControlNode::new(kind));
        self.refresh_preferred_size(id);
        tracing::trace!(target: targets::HIERARCHY, id = id.as_raw(), ty = ty.type_name(), "created control");
        id
    }

    /// Destroy a control and its whole subtree.
    ///
    /// Every handle into the subtree resolves to "missing" afterwards.
    ///
    /// Collapsed Tree child lists are not attached to the hierarchy, so they
    /// are collected first and destroyed along with the subtree.
    pub fn destroy(&mut self, id: ControlId) -> Result<usize> {
        let collapsed = self.collapsed_lists(id)?;
        self.release_child_list(id);
        if let Some(parent) = self.nodes.parent(id) {
            self.release_tree_targets(parent, id);
            self.invalidate(parent, Invalidation::Both);
        }
        let mut removed = self.nodes.destroy(id)?;
        for list in collapsed {
            removed += self.destroy(list)?;
        }
        Ok(removed)
    }

    /// Whether the handle refers to a live control.
    pub fn contains_control(&self, id: ControlId) -> bool {
        self.nodes.contains(id)
    }

    /// Number of live controls, attached or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: ControlId) -> Option<&ControlNode> {
        self.nodes.get(id)
    }

    pub(crate) fn node_mut(&mut self, id: ControlId) -> Option<&mut ControlNode> {
        self.nodes.get_mut(id)
    }

    pub(crate) fn require(&self, id: ControlId) -> Result<&ControlNode> {
        self.nodes.get(id).ok_or(TrellisError::InvalidNode(id))
    }

    pub fn control_type(&self, id: ControlId) -> Option<ControlType> {
        self.node(id).map(ControlNode::control_type)
    }

    pub fn parent(&self, id: ControlId) -> Option<ControlId> {
        self.nodes.parent(id)
    }

    /// Whether `id` is `ancestor` or lies beneath it.
    pub fn is_within(&self, id: ControlId, ancestor: ControlId) -> bool {
        self.nodes.is_ancestor_of(ancestor, id)
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Position relative to the parent.
    pub fn position(&self, id: ControlId) -> Point {
        self.node(id).map(|n| n.position).unwrap_or_default()
    }

    pub fn set_position(&mut self, id: ControlId, position: Point) {
        let Some(node) = self.node_mut(id) else {
            return;
        };
        if node.position != position {
            node.position = position;
            self.invalidate(id, Invalidation::Paint);
        }
    }

    /// Size resolved by the last layout pass (or set directly).
    pub fn size(&self, id: ControlId) -> Size {
        self.node(id).map(|n| n.size).unwrap_or_default()
    }

    /// Request a size. Layout may override it on expanded axes.
    pub fn set_size(&mut self, id: ControlId, size: Size) {
        let Some(node) = self.node_mut(id) else {
            return;
        };
        if node.preferred != size || node.size != size {
            node.preferred = size;
            node.size = size;
            self.invalidate(id, Invalidation::Both);
        }
    }

    /// The size requested by the caller or derived from content.
    pub fn preferred_size(&self, id: ControlId) -> Size {
        self.node(id).map(|n| n.preferred).unwrap_or_default()
    }

    pub fn expand(&self, id: ControlId) -> Expand {
        self.node(id).map(|n| n.expand).unwrap_or_default()
    }

    pub fn set_expand(&mut self, id: ControlId, expand: Expand) {
        let Some(node) = self.node_mut(id) else {
            return;
        };
        if node.expand != expand {
            node.expand = expand;
            self.invalidate(id, Invalidation::Both);
        }
    }

    pub fn is_visible(&self, id: ControlId) -> bool {
        self.node(id).is_some_and(|n| n.visible)
    }

    /// Show or hide a control. Hidden controls take no space in box
    /// layouts, are not painted and are skipped by hit-testing.
    pub fn set_visible(&mut self, id: ControlId, visible: bool) {
        let Some(node) = self.node_mut(id) else {
            return;
        };
        if node.visible != visible {
            node.visible = visible;
            self.invalidate(id, Invalidation::Both);
        }
    }

    /// Position in window coordinates: the sum of local offsets up the
    /// parent chain.
    pub fn absolute_position(&self, id: ControlId) -> Point {
        let mut result = self.position(id);
        let mut current = self.parent(id);
        while let Some(ancestor) = current {
            result += self.position(ancestor);
            current = self.parent(ancestor);
        }
        result
    }

    pub fn absolute_bounds(&self, id: ControlId) -> Rect {
        Rect::from_origin_size(self.absolute_position(id), self.size(id))
    }

    /// Point-in-rect test against the absolute bounds (right and bottom
    /// edges exclusive).
    pub fn contains(&self, id: ControlId, point: Point) -> bool {
        self.contains_control(id) && self.absolute_bounds(id).contains(point)
    }

    // =========================================================================
    // Identity and properties
    // =========================================================================

    /// The description `ID`.
    pub fn name(&self, id: ControlId) -> Option<&str> {
        self.node(id).and_then(ControlNode::name)
    }

    pub fn set_name(&mut self, id: ControlId, name: Option<String>) {
        if let Some(node) = self.node_mut(id) {
            node.name = name.filter(|n| !n.is_empty());
        }
    }

    /// A theme property as seen by this control: its own override if set,
    /// else the tree's theme.
    pub fn property(&self, id: ControlId, property: ThemeProperty) -> Variant {
        match self.node(id) {
            Some(node) => node.overrides.resolve(property, &self.theme),
            None => self.theme.get(property),
        }
    }

    /// Override a theme property on one control.
    pub fn set_property(&mut self, id: ControlId, property: ThemeProperty, value: impl Into<Variant>) -> bool {
        let Some(node) = self.node_mut(id) else {
            return false;
        };
        let applied = node.overrides.set(property, value);
        if applied {
            self.property_changed(id, property);
        }
        applied
    }

    pub fn clear_property(&mut self, id: ControlId, property: ThemeProperty) {
        if let Some(node) = self.node_mut(id)
            && node.overrides.clear(property)
        {
            self.property_changed(id, property);
        }
    }

    pub(crate) fn property_changed(&mut self, id: ControlId, property: ThemeProperty) {
        if property == ThemeProperty::FontSize {
            self.refresh_preferred_size(id);
        }
        self.invalidate(id, Invalidation::Paint);
    }

    /// Install a hook run each time layout places this control.
    pub fn set_on_update(&mut self, id: ControlId, handler: impl FnMut(&mut ControlTree, ControlId) + 'static) {
        if let Some(node) = self.node_mut(id) {
            node.on_update = Some(Box::new(handler));
        }
    }

    /// Per-frame hook, run after the control's parent has placed it.
    ///
    /// Invalidations raised by the hook are deferred to the end of the
    /// current layout pass.
    pub fn update(&mut self, id: ControlId) {
        let Some(mut handler) = self.node_mut(id).and_then(|n| n.on_update.take()) else {
            return;
        };
        handler(self, id);
        self.restore_handler(id, handler, |node| Some(&mut node.on_update));
    }

    /// Put a handler back after calling it, unless the control was
    /// destroyed or the handler replaced meanwhile.
    pub(crate) fn restore_handler(
        &mut self,
        id: ControlId,
        handler: ControlHandler,
        slot: impl FnOnce(&mut ControlNode) -> Option<&mut Option<ControlHandler>>,
    ) {
        if let Some(slot) = self.node_mut(id).and_then(slot)
            && slot.is_none()
        {
            *slot = Some(handler);
        }
    }

    // =========================================================================
    // Invalidation
    // =========================================================================

    /// Report a change to `id`.
    ///
    /// Raises the repaint flag. For layout-affecting changes, marks `id`
    /// (if it is a container) and every ancestor container as needing
    /// layout. Inside a layout pass the walk is deferred until the pass
    /// finishes.
    pub fn invalidate(&mut self, id: ControlId, kind: Invalidation) {
        if !self.nodes.contains(id) {
            return;
        }
        self.needs_repaint = true;
        if !kind.affects_layout() {
            return;
        }
        if self.in_layout {
            self.deferred.push((id, kind));
            return;
        }

        let mut marked = 0usize;
        let mut current = Some(id);
        while let Some(target) = current {
            if let Some(state) = self.container_mut(target) {
                state.needs_layout = true;
                marked += 1;
            }
            current = self.nodes.parent(target);
        }
        tracing::trace!(target: targets::INVALIDATE, id = id.as_raw(), ?kind, marked, "invalidated");
    }

    pub fn needs_repaint(&self) -> bool {
        self.needs_repaint
    }

    /// Read and clear the repaint flag.
    pub fn take_repaint(&mut self) -> bool {
        std::mem::take(&mut self.needs_repaint)
    }

    /// Recompute the preferred size of a content-sized control.
    ///
    /// Sizes are only replaced for kinds whose size derives from content;
    /// containers and panels keep what the caller set.
    pub(crate) fn refresh_preferred_size(&mut self, id: ControlId) {
        let Some(size) = self.content_size(id) else {
            return;
        };
        let Some(node) = self.node_mut(id) else {
            return;
        };
        if node.preferred != size {
            node.preferred = size;
            node.size = size;
            self.invalidate(id, Invalidation::Both);
        }
    }

    /// Text dump of the subtree at `root`, one control per line.
    pub fn dump(&self, root: ControlId) -> String {
        HierarchyDebug::new().format_subtree(&self.nodes, root, |_, node| {
            let ty = node.control_type().type_name();
            match node.name() {
                Some(name) => format!("{ty} \"{name}\" {:?}", node.size),
                None => format!("{ty} {:?}", node.size),
            }
        })
    }
}
