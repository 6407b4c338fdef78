//! Containers: controls that own an ordered list of children.
//!
//! A container carries a [`ContainerState`]: a dirty flag and the
//! [`Layout`] policy used to size and place its children. Children are
//! kept in insertion order, which is also z-order (later is on top).
//!
//! Structural changes (insert, remove, clear) mark the container as
//! needing layout; the next [`ControlTree::layout`] call recomputes
//! geometry from the root down, skipping clean subtrees.

mod layout;

pub use layout::LayoutStats;

use trellis_core::logging::targets;
use trellis_core::{Result, TrellisError};
use trellis_render::Point;

use crate::control::{ControlId, ControlKind, ControlTree, ControlType, Invalidation};
use crate::widgets::TreeState;

/// Where a box layout puts its packed run along the main axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Grow {
    #[default]
    Begin,
    Center,
    End,
}

impl Grow {
    pub fn name(self) -> &'static str {
        match self {
            Grow::Begin => "Begin",
            Grow::Center => "Center",
            Grow::End => "End",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Begin" => Some(Grow::Begin),
            "Center" => Some(Grow::Center),
            "End" => Some(Grow::End),
            _ => None,
        }
    }
}

/// Parameters of a horizontal or vertical box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxLayout {
    /// Gap between consecutive visible children.
    pub spacing: f32,
    pub grow: Grow,
}

impl BoxLayout {
    pub fn new(spacing: f32) -> Self {
        Self {
            spacing,
            grow: Grow::Begin,
        }
    }
}

/// Space kept free on each side of a margin container.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Margins {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Margins {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// The same margin on every side.
    pub fn uniform(margin: f32) -> Self {
        Self::new(margin, margin, margin, margin)
    }

    /// Left plus right.
    #[inline]
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// Top plus bottom.
    #[inline]
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

impl From<[f32; 4]> for Margins {
    fn from([left, top, right, bottom]: [f32; 4]) -> Self {
        Self::new(left, top, right, bottom)
    }
}

impl From<Margins> for [f32; 4] {
    fn from(m: Margins) -> Self {
        [m.left, m.top, m.right, m.bottom]
    }
}

/// How a container sizes and places its children.
#[derive(Debug)]
pub enum Layout {
    /// Children keep their own positions.
    Free,
    Horizontal(BoxLayout),
    Vertical(BoxLayout),
    Margin(Margins),
    /// Composite tree node: an item row plus an optional child list.
    Tree(TreeState),
}

/// Container payload of a control.
#[derive(Debug)]
pub struct ContainerState {
    pub(crate) needs_layout: bool,
    pub(crate) layout: Layout,
    /// For a Tree's child list, the owning Tree. Survives collapse, when
    /// the list is detached.
    pub(crate) tree_owner: Option<ControlId>,
}

impl ContainerState {
    pub(crate) fn new(layout: Layout) -> Self {
        Self {
            needs_layout: true,
            layout,
            tree_owner: None,
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn needs_layout(&self) -> bool {
        self.needs_layout
    }
}

impl ControlTree {
    /// The container state of `id`, or `None` for leaves and missing handles.
    pub fn as_container(&self, id: ControlId) -> Option<&ContainerState> {
        match &self.node(id)?.kind {
            ControlKind::Container(state) => Some(state),
            _ => None,
        }
    }

    pub(crate) fn container_mut(&mut self, id: ControlId) -> Option<&mut ContainerState> {
        match &mut self.node_mut(id)?.kind {
            ControlKind::Container(state) => Some(state),
            _ => None,
        }
    }

    pub fn is_container(&self, id: ControlId) -> bool {
        self.as_container(id).is_some()
    }

    pub fn needs_layout(&self, id: ControlId) -> bool {
        self.as_container(id).is_some_and(ContainerState::needs_layout)
    }

    /// Direct children in insertion order.
    pub fn controls(&self, id: ControlId) -> &[ControlId] {
        self.nodes.children(id)
    }

    /// Whether `child` is a direct child of `container`.
    pub fn has_control(&self, container: ControlId, child: ControlId) -> bool {
        self.nodes.parent(child) == Some(container)
    }

    /// Attach `child` to `container` at `index` (appended when `None` or
    /// past the end).
    ///
    /// A child already in the container stays where it is. A child
    /// attached elsewhere is moved.
    pub fn insert_control(&mut self, container: ControlId, child: ControlId, index: Option<usize>) -> Result<()> {
        if !self.is_container(container) {
            self.require(container)?;
            return Err(TrellisError::NotAContainer(container));
        }
        self.require(child)?;
        if self.has_control(container, child) {
            return Ok(());
        }
        if let Some(previous) = self.nodes.parent(child) {
            self.invalidate(previous, Invalidation::Both);
        }
        self.nodes.attach(container, child, index)?;
        self.on_attached(container, child);
        self.invalidate(container, Invalidation::Both);
        tracing::trace!(
            target: targets::HIERARCHY,
            container = container.as_raw(),
            child = child.as_raw(),
            "inserted control"
        );
        Ok(())
    }

    /// Create a control of type `ty` and append it to `container`.
    pub fn add_control(&mut self, container: ControlId, ty: ControlType) -> Result<ControlId> {
        if !self.is_container(container) {
            self.require(container)?;
            return Err(TrellisError::NotAContainer(container));
        }
        let child = self.create_control(ty);
        self.insert_control(container, child, None)?;
        Ok(child)
    }

    /// Detach `child` from `container` without destroying it.
    ///
    /// Returns whether it was a child.
    pub fn remove_control(&mut self, container: ControlId, child: ControlId) -> bool {
        if !self.has_control(container, child) {
            return false;
        }
        self.release_tree_targets(container, child);
        // Detaching a known child of a live container cannot fail.
        if self.nodes.detach(child).is_err() {
            return false;
        }
        self.invalidate(container, Invalidation::Both);
        true
    }

    /// Detach every child. The children stay alive.
    pub fn clear_controls(&mut self, container: ControlId) -> Vec<ControlId> {
        if !self.is_container(container) {
            return Vec::new();
        }
        for child in self.controls(container).to_vec() {
            self.release_tree_targets(container, child);
        }
        let detached = self.nodes.detach_children(container).unwrap_or_default();
        self.invalidate(container, Invalidation::Both);
        detached
    }

    /// The topmost visible leaf control under `point` (window coordinates).
    ///
    /// Children are scanned from last to first. Containers are recursed
    /// into and never returned themselves; Tree containers use their row
    /// bands instead of child bounds.
    pub fn control_at(&self, container: ControlId, point: Point) -> Option<ControlId> {
        if let Some(ContainerState {
            layout: Layout::Tree(_),
            ..
        }) = self.as_container(container)
        {
            return self.tree_control_at(container, point);
        }
        for &child in self.controls(container).iter().rev() {
            if !self.is_visible(child) {
                continue;
            }
            let found = if self.is_container(child) {
                self.control_at(child, point)
            } else if self.contains(child, point) {
                Some(child)
            } else {
                None
            };
            if found.is_some() {
                return found;
            }
        }
        None
    }

    /// Every leaf control beneath `container`, depth first.
    pub fn controls_flat(&self, container: ControlId) -> Vec<ControlId> {
        let mut result = Vec::new();
        self.collect_leaves(container, &mut result);
        result
    }

    fn collect_leaves(&self, container: ControlId, out: &mut Vec<ControlId>) {
        for &child in self.controls(container) {
            if self.is_container(child) {
                self.collect_leaves(child, out);
            } else {
                out.push(child);
            }
        }
    }

    // =========================================================================
    // Layout parameters
    // =========================================================================

    /// Spacing of a box container; zero for other kinds.
    pub fn spacing(&self, id: ControlId) -> f32 {
        match self.as_container(id).map(|s| &s.layout) {
            Some(Layout::Horizontal(b) | Layout::Vertical(b)) => b.spacing,
            _ => 0.0,
        }
    }

    pub fn set_spacing(&mut self, id: ControlId, spacing: f32) {
        if let Some(state) = self.container_mut(id)
            && let Layout::Horizontal(b) | Layout::Vertical(b) = &mut state.layout
            && b.spacing != spacing
        {
            b.spacing = spacing;
            self.invalidate(id, Invalidation::Both);
        }
    }

    pub fn grow(&self, id: ControlId) -> Grow {
        match self.as_container(id).map(|s| &s.layout) {
            Some(Layout::Horizontal(b) | Layout::Vertical(b)) => b.grow,
            _ => Grow::Begin,
        }
    }

    pub fn set_grow(&mut self, id: ControlId, grow: Grow) {
        if let Some(state) = self.container_mut(id)
            && let Layout::Horizontal(b) | Layout::Vertical(b) = &mut state.layout
            && b.grow != grow
        {
            b.grow = grow;
            self.invalidate(id, Invalidation::Both);
        }
    }

    pub fn margins(&self, id: ControlId) -> Margins {
        match self.as_container(id).map(|s| &s.layout) {
            Some(Layout::Margin(m)) => *m,
            _ => Margins::default(),
        }
    }

    pub fn set_margins(&mut self, id: ControlId, margins: Margins) {
        if let Some(state) = self.container_mut(id)
            && let Layout::Margin(m) = &mut state.layout
            && *m != margins
        {
            *m = margins;
            self.invalidate(id, Invalidation::Both);
        }
    }

    // =========================================================================
    // Factory helpers
    // =========================================================================

    /// Append a text control.
    pub fn add_text(&mut self, container: ControlId, text: &str) -> Result<ControlId> {
        let id = self.add_control(container, ControlType::Text)?;
        self.set_text(id, text);
        Ok(id)
    }

    pub fn add_button(&mut self, container: ControlId, label: &str) -> Result<ControlId> {
        let id = self.add_control(container, ControlType::Button)?;
        self.set_text(id, label);
        Ok(id)
    }

    pub fn add_checkbox(&mut self, container: ControlId, label: &str) -> Result<ControlId> {
        let id = self.add_control(container, ControlType::Checkbox)?;
        self.set_text(id, label);
        Ok(id)
    }

    pub fn add_panel(&mut self, container: ControlId) -> Result<ControlId> {
        self.add_control(container, ControlType::Panel)
    }

    pub fn add_separator(&mut self, container: ControlId) -> Result<ControlId> {
        self.add_control(container, ControlType::Separator)
    }

    /// Append a free-placement container.
    pub fn add_container(&mut self, container: ControlId) -> Result<ControlId> {
        self.add_control(container, ControlType::Container)
    }

    pub fn add_horizontal(&mut self, container: ControlId) -> Result<ControlId> {
        self.add_control(container, ControlType::HorizontalContainer)
    }

    pub fn add_vertical(&mut self, container: ControlId) -> Result<ControlId> {
        self.add_control(container, ControlType::VerticalContainer)
    }

    pub fn add_margin(&mut self, container: ControlId, margins: Margins) -> Result<ControlId> {
        let id = self.add_control(container, ControlType::MarginContainer)?;
        self.set_margins(id, margins);
        Ok(id)
    }

    /// Append a Tree whose root row shows `text`.
    pub fn add_tree(&mut self, container: ControlId, text: &str) -> Result<ControlId> {
        let id = self.add_control(container, ControlType::Tree)?;
        self.set_text(id, text);
        Ok(id)
    }
}
