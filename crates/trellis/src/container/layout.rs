//! The top-down layout pass.
//!
//! Layout runs from a root container downward. A clean container returns
//! at once, so a frame with no invalidations does no placement work. A
//! dirty container resolves its own size, places its direct children,
//! then recurses into child containers. Its flag is cleared only after the
//! recursion finishes.
//!
//! Invalidations raised while a pass is running (by `update` hooks, for
//! example) are queued and replayed when the pass ends. If they dirty the
//! root again, another pass runs, up to
//! [`TrellisConfig::max_layout_passes`](trellis_core::TrellisConfig).

use trellis_core::logging::{PerfSpan, span_names, targets};
use trellis_render::{Point, Rect, Size};

use super::{BoxLayout, Grow, Layout, Margins};
use crate::control::{Axis, ControlId, ControlKind, ControlTree};

/// What a call to [`ControlTree::layout`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutStats {
    /// Containers that recomputed and placed their children.
    pub containers_placed: usize,
    /// Passes run, including re-runs caused by deferred invalidations.
    pub passes: usize,
}

impl LayoutStats {
    /// True when nothing was dirty.
    pub fn is_idle(&self) -> bool {
        self.containers_placed == 0
    }
}

/// The geometry-relevant part of a layout policy, copied out so the tree
/// can be mutated while placing.
#[derive(Clone, Copy)]
enum Placement {
    Free,
    Box(Axis, BoxLayout),
    Margin(Margins),
    Tree,
}

impl ControlTree {
    /// Bring the subtree at `root` up to date.
    pub fn layout(&mut self, root: ControlId) -> LayoutStats {
        let mut stats = LayoutStats::default();
        if !self.needs_layout(root) {
            return stats;
        }
        let _perf = PerfSpan::new(span_names::LAYOUT);

        let max_passes = self.config().max_layout_passes.max(1);
        while stats.passes < max_passes && self.needs_layout(root) {
            stats.passes += 1;
            self.in_layout = true;
            self.layout_container(root, &mut stats);
            self.in_layout = false;

            for (id, kind) in std::mem::take(&mut self.deferred) {
                self.invalidate(id, kind);
            }
        }

        if self.needs_layout(root) {
            tracing::warn!(
                target: targets::LAYOUT,
                root = root.as_raw(),
                passes = stats.passes,
                "layout did not settle"
            );
        }
        tracing::debug!(
            target: targets::LAYOUT,
            placed = stats.containers_placed,
            passes = stats.passes,
            "layout complete"
        );
        stats
    }

    fn layout_container(&mut self, id: ControlId, stats: &mut LayoutStats) {
        if !self.needs_layout(id) {
            return;
        }

        if self.parent(id).is_some() {
            let size = self.calculate_size(id);
            if let Some(node) = self.node_mut(id) {
                node.size = size;
            }
        }
        self.place_controls(id);
        stats.containers_placed += 1;

        let children = self.controls(id).to_vec();
        for child in children {
            if self.is_container(child) {
                self.layout_container(child, stats);
            }
        }

        if let Some(state) = self.container_mut(id) {
            state.needs_layout = false;
        }
    }

    /// The size a control would like, derived from its content.
    ///
    /// Leaves report their preferred size. Box containers sum their
    /// visible children along the main axis, margin containers add their
    /// margins to the largest child, and Tree containers stack their
    /// item row over their expanded child list.
    pub fn desired_size(&self, id: ControlId) -> Size {
        let Some(node) = self.node(id) else {
            return Size::ZERO;
        };
        let ControlKind::Container(state) = &node.kind else {
            return node.preferred;
        };
        match &state.layout {
            Layout::Free => node.preferred,
            Layout::Horizontal(_) => self.box_desired_size(id, Axis::Horizontal),
            Layout::Vertical(_) => self.box_desired_size(id, Axis::Vertical),
            Layout::Margin(margins) => {
                let inner = self
                    .visible_children(id)
                    .fold(Size::ZERO, |acc, child| acc.max(self.desired_size(child)));
                Size::new(inner.width + margins.horizontal(), inner.height + margins.vertical())
            }
            Layout::Tree(_) => self.tree_desired_size(id),
        }
    }

    fn box_desired_size(&self, id: ControlId, axis: Axis) -> Size {
        let spacing = self.spacing(id);
        let mut main = 0.0f32;
        let mut cross = 0.0f32;
        let mut count = 0usize;
        for child in self.visible_children(id) {
            let desired = self.desired_size(child);
            main += axis.of(desired);
            cross = cross.max(axis.cross().of(desired));
            count += 1;
        }
        if count > 1 {
            main += spacing * (count - 1) as f32;
        }
        axis.size(main, cross)
    }

    /// Own size of a non-root container: the variant's base size, with
    /// expanded axes keeping what the parent assigned.
    fn calculate_size(&self, id: ControlId) -> Size {
        let current = self.size(id);
        let base = match self.as_container(id).map(|s| &s.layout) {
            Some(Layout::Free) => current,
            _ => self.desired_size(id),
        };
        let expand = self.expand(id);
        Size::new(
            if expand.claims(Axis::Horizontal) { current.width } else { base.width },
            if expand.claims(Axis::Vertical) { current.height } else { base.height },
        )
    }

    fn place_controls(&mut self, id: ControlId) {
        let placement = match self.as_container(id).map(|s| &s.layout) {
            Some(Layout::Free) => Placement::Free,
            Some(Layout::Horizontal(b)) => Placement::Box(Axis::Horizontal, *b),
            Some(Layout::Vertical(b)) => Placement::Box(Axis::Vertical, *b),
            Some(Layout::Margin(m)) => Placement::Margin(*m),
            Some(Layout::Tree(_)) => Placement::Tree,
            None => return,
        };
        match placement {
            Placement::Free => self.place_free(id),
            Placement::Box(axis, params) => self.place_box(id, axis, params),
            Placement::Margin(margins) => self.place_margin(id, margins),
            Placement::Tree => self.place_tree(id),
        }
    }

    fn place_free(&mut self, id: ControlId) {
        let own = self.size(id);
        for child in self.visible_children(id).collect::<Vec<_>>() {
            let size = self.claimed_size(child, own, self.desired_size(child));
            let position = self.position(child);
            self.apply_geometry(child, position, size);
        }
    }

    fn place_box(&mut self, id: ControlId, axis: Axis, params: BoxLayout) {
        let own = self.size(id);
        let children: Vec<ControlId> = self.visible_children(id).collect();
        if children.is_empty() {
            return;
        }

        let spacing_total = params.spacing * (children.len() - 1) as f32;
        let mut claiming = 0usize;
        let mut fixed = 0.0f32;
        for &child in &children {
            if self.expand(child).claims(axis) {
                claiming += 1;
            } else {
                fixed += axis.of(self.desired_size(child));
            }
        }
        let share = ((axis.of(own) - fixed - spacing_total) / claiming.max(1) as f32).max(0.0);

        let sizes: Vec<Size> = children
            .iter()
            .map(|&child| {
                let expand = self.expand(child);
                let desired = self.desired_size(child);
                let main = if expand.claims(axis) { share } else { axis.of(desired) };
                let cross_axis = axis.cross();
                let cross = if expand.claims(cross_axis) {
                    cross_axis.of(own)
                } else {
                    cross_axis.of(desired)
                };
                axis.size(main, cross)
            })
            .collect();

        let run = sizes.iter().map(|s| axis.of(*s)).sum::<f32>() + spacing_total;
        let slack = (axis.of(own) - run).max(0.0);
        let mut cursor = match params.grow {
            Grow::Begin => 0.0,
            Grow::Center => slack * 0.5,
            Grow::End => slack,
        };

        for (child, size) in children.into_iter().zip(sizes) {
            self.apply_geometry(child, axis.point(cursor, 0.0), size);
            cursor += axis.of(size) + params.spacing;
        }
    }

    fn place_margin(&mut self, id: ControlId, margins: Margins) {
        let own = self.size(id);
        let inner = Rect::from_origin_size(Point::ZERO, own).deflate_edges(
            margins.left,
            margins.top,
            margins.right,
            margins.bottom,
        );
        for child in self.visible_children(id).collect::<Vec<_>>() {
            let size = self.claimed_size(child, inner.size, self.desired_size(child));
            self.apply_geometry(child, inner.origin, size);
        }
    }

    /// `available` on the axes `child` claims, `desired` elsewhere.
    fn claimed_size(&self, child: ControlId, available: Size, desired: Size) -> Size {
        let expand = self.expand(child);
        Size::new(
            if expand.claims(Axis::Horizontal) { available.width } else { desired.width },
            if expand.claims(Axis::Vertical) { available.height } else { desired.height },
        )
    }

    /// Move and resize a child without raising invalidations, then run its
    /// update hook. A child container whose size changed is marked dirty
    /// so the recursion re-places its children.
    pub(crate) fn apply_geometry(&mut self, child: ControlId, position: Point, size: Size) {
        let Some(node) = self.node_mut(child) else {
            return;
        };
        node.position = position;
        let resized = node.size != size;
        node.size = size;
        if resized && let ControlKind::Container(state) = &mut node.kind {
            state.needs_layout = true;
        }
        self.update(child);
    }

    pub(crate) fn visible_children(&self, id: ControlId) -> impl Iterator<Item = ControlId> + '_ {
        self.controls(id).iter().copied().filter(|&c| self.is_visible(c))
    }
}
