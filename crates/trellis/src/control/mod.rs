//! Controls: the nodes of a [`ControlTree`].
//!
//! Every control has a local position (relative to its parent), a resolved
//! size written by layout, a preferred size requested by the caller or
//! derived from content, an [`Expand`] policy and a per-kind payload
//! ([`ControlKind`]). Controls live in the tree's arena and are addressed
//! by [`ControlId`] handles.
//!
//! # Handles
//!
//! A `ControlId` is generational. Once a control is destroyed the handle
//! resolves to "missing": getters return defaults, setters do nothing and
//! structural operations return [`TrellisError::InvalidNode`].
//!
//! [`TrellisError::InvalidNode`]: trellis_core::TrellisError::InvalidNode

mod store;

pub use store::ControlTree;

use trellis_core::NodeId;
use trellis_render::{Point, Size};
use trellis_style::PropertyOverrides;

use crate::container::ContainerState;
use crate::widgets::{ButtonState, CheckboxState, SeparatorState, TextState, TreeItemState};

/// Handle to a control in a [`ControlTree`].
pub type ControlId = NodeId;

/// Boxed callback invoked with the tree and the control that fired.
///
/// Handlers may mutate the tree freely, including destroying the control
/// that fired them.
pub type ControlHandler = Box<dyn FnMut(&mut ControlTree, ControlId)>;

/// Which axes a control claims from its parent during layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Expand {
    #[default]
    None,
    Width,
    Height,
    Both,
}

impl Expand {
    /// Whether this policy claims `axis`.
    pub fn claims(self, axis: Axis) -> bool {
        matches!(
            (self, axis),
            (Expand::Both, _) | (Expand::Width, Axis::Horizontal) | (Expand::Height, Axis::Vertical)
        )
    }

    /// Description document name.
    pub fn name(self) -> &'static str {
        match self {
            Expand::None => "None",
            Expand::Width => "Width",
            Expand::Height => "Height",
            Expand::Both => "Both",
        }
    }

    /// Parse a description document name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "None" => Some(Expand::None),
            "Width" => Some(Expand::Width),
            "Height" => Some(Expand::Height),
            "Both" => Some(Expand::Both),
            _ => None,
        }
    }
}

/// A layout axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// The perpendicular axis.
    #[inline]
    pub fn cross(self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }

    /// The component of `size` along this axis.
    #[inline]
    pub fn of(self, size: Size) -> f32 {
        match self {
            Axis::Horizontal => size.width,
            Axis::Vertical => size.height,
        }
    }

    /// Build a size from main and cross components.
    #[inline]
    pub fn size(self, main: f32, cross: f32) -> Size {
        match self {
            Axis::Horizontal => Size::new(main, cross),
            Axis::Vertical => Size::new(cross, main),
        }
    }

    /// Build a point from main and cross components.
    #[inline]
    pub fn point(self, main: f32, cross: f32) -> Point {
        match self {
            Axis::Horizontal => Point::new(main, cross),
            Axis::Vertical => Point::new(cross, main),
        }
    }
}

/// What a change affects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invalidation {
    /// Size or structure changed; ancestors must re-run layout.
    Layout,
    /// Only appearance changed.
    Paint,
    Both,
}

impl Invalidation {
    #[inline]
    pub fn affects_layout(self) -> bool {
        matches!(self, Invalidation::Layout | Invalidation::Both)
    }
}

/// The closed set of control types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlType {
    /// Free-placement container: children keep their own positions.
    Container,
    HorizontalContainer,
    VerticalContainer,
    MarginContainer,
    Tree,
    Text,
    Button,
    Checkbox,
    Panel,
    Separator,
    /// The row inside a [`ControlType::Tree`]; not creatable from documents.
    TreeItem,
}

impl ControlType {
    /// Types a description document may name, in registry order.
    pub const LOADABLE: &'static [ControlType] = &[
        ControlType::Container,
        ControlType::HorizontalContainer,
        ControlType::VerticalContainer,
        ControlType::MarginContainer,
        ControlType::Tree,
        ControlType::Text,
        ControlType::Button,
        ControlType::Checkbox,
        ControlType::Panel,
        ControlType::Separator,
    ];

    /// The document `Type` string.
    pub fn type_name(self) -> &'static str {
        match self {
            ControlType::Container => "Container",
            ControlType::HorizontalContainer => "HorizontalContainer",
            ControlType::VerticalContainer => "VerticalContainer",
            ControlType::MarginContainer => "MarginContainer",
            ControlType::Tree => "Tree",
            ControlType::Text => "Text",
            ControlType::Button => "Button",
            ControlType::Checkbox => "Checkbox",
            ControlType::Panel => "Panel",
            ControlType::Separator => "Separator",
            ControlType::TreeItem => "TreeItem",
        }
    }

    /// Resolve a document `Type` string. `TextButton` is accepted as an
    /// alias of `Button`.
    pub fn from_type_name(name: &str) -> Option<Self> {
        if name == "TextButton" {
            return Some(ControlType::Button);
        }
        Self::LOADABLE.iter().copied().find(|ty| ty.type_name() == name)
    }

    /// Whether controls of this type hold children.
    pub fn is_container(self) -> bool {
        matches!(
            self,
            ControlType::Container
                | ControlType::HorizontalContainer
                | ControlType::VerticalContainer
                | ControlType::MarginContainer
                | ControlType::Tree
        )
    }
}

/// Per-kind payload of a control.
#[derive(Debug)]
pub enum ControlKind {
    Container(ContainerState),
    Text(TextState),
    Button(ButtonState),
    Checkbox(CheckboxState),
    Panel,
    Separator(SeparatorState),
    TreeItem(TreeItemState),
}

/// A node of the control tree.
pub struct ControlNode {
    pub(crate) position: Point,
    pub(crate) size: Size,
    pub(crate) preferred: Size,
    pub(crate) expand: Expand,
    pub(crate) visible: bool,
    pub(crate) name: Option<String>,
    pub(crate) overrides: PropertyOverrides,
    pub(crate) on_update: Option<ControlHandler>,
    pub(crate) kind: ControlKind,
}

impl ControlNode {
    pub(crate) fn new(kind: ControlKind) -> Self {
        Self {
            position: Point::ZERO,
            size: Size::ZERO,
            preferred: Size::ZERO,
            expand: Expand::None,
            visible: true,
            name: None,
            overrides: PropertyOverrides::new(),
            on_update: None,
            kind,
        }
    }

    /// The control's type.
    pub fn control_type(&self) -> ControlType {
        use crate::container::Layout;

        match &self.kind {
            ControlKind::Container(state) => match state.layout {
                Layout::Free => ControlType::Container,
                Layout::Horizontal(_) => ControlType::HorizontalContainer,
                Layout::Vertical(_) => ControlType::VerticalContainer,
                Layout::Margin(_) => ControlType::MarginContainer,
                Layout::Tree(_) => ControlType::Tree,
            },
            ControlKind::Text(_) => ControlType::Text,
            ControlKind::Button(_) => ControlType::Button,
            ControlKind::Checkbox(_) => ControlType::Checkbox,
            ControlKind::Panel => ControlType::Panel,
            ControlKind::Separator(_) => ControlType::Separator,
            ControlKind::TreeItem(_) => ControlType::TreeItem,
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn preferred_size(&self) -> Size {
        self.preferred
    }

    pub fn expand(&self) -> Expand {
        self.expand
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// The description `ID`, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn kind(&self) -> &ControlKind {
        &self.kind
    }

    pub fn overrides(&self) -> &PropertyOverrides {
        &self.overrides
    }
}

impl std::fmt::Debug for ControlNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControlNode")
            .field("type", &self.control_type())
            .field("name", &self.name)
            .field("position", &self.position)
            .field("size", &self.size)
            .field("expand", &self.expand)
            .field("visible", &self.visible)
            .finish_non_exhaustive()
    }
}
