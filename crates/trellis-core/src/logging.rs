//! Logging and debugging facilities for Trellis.
//!
//! This module provides:
//! - Target and span names for filtering `tracing` output by subsystem
//! - Debug visualization for hierarchies
//! - Performance tracing hooks for profiling the layout and paint passes
//!
//! # Tracing Integration
//!
//! Trellis only emits events; install a subscriber in your application to
//! see them:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("trellis::layout=debug,trellis::loader=warn")
//!     .init();
//! ```
//!
//! # Debug Visualization
//!
//! ```
//! use trellis_core::{Hierarchy, HierarchyDebug};
//!
//! let mut nodes = Hierarchy::new();
//! let root = nodes.insert("window");
//! let child = nodes.insert("button");
//! nodes.attach(root, child, None).unwrap();
//!
//! let dump = HierarchyDebug::new().format_subtree(&nodes, root, |_, name| name.to_string());
//! assert!(dump.contains("button"));
//! ```

use std::fmt::Write as FmtWrite;

use crate::hierarchy::{Hierarchy, NodeId};

/// Span names used throughout Trellis for tracing.
pub mod span_names {
    /// One frame: layout followed by paint.
    pub const FRAME: &str = "trellis::frame";
    /// The top-down layout pass.
    pub const LAYOUT: &str = "trellis::layout";
    /// The paint traversal.
    pub const PAINT: &str = "trellis::paint";
    /// Loading a description document.
    pub const LOAD: &str = "trellis::load";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Arena bookkeeping.
    pub const HIERARCHY: &str = "trellis::hierarchy";
    /// Layout passes and placement.
    pub const LAYOUT: &str = "trellis::layout";
    /// Invalidation propagation.
    pub const INVALIDATE: &str = "trellis::invalidate";
    /// Mouse routing and interaction state.
    pub const INPUT: &str = "trellis::input";
    /// Description loading and saving.
    pub const LOADER: &str = "trellis::loader";
    /// Tree widget expansion, hover and selection.
    pub const TREE: &str = "trellis::tree";
    /// Configuration and theme files.
    pub const CONFIG: &str = "trellis::config";
    /// Performance spans.
    pub const PERF: &str = "trellis::perf";
}

/// Style options for hierarchy visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
    /// Compact single-line representation.
    Compact,
}

/// Configuration for hierarchy debug output.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    /// The style of tree visualization.
    pub style: TreeStyle,
    /// Whether to show raw node ids.
    pub show_ids: bool,
    /// Maximum depth to traverse (None for unlimited).
    pub max_depth: Option<usize>,
    /// Indent size for each level.
    pub indent_size: usize,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_ids: false,
            max_depth: None,
            indent_size: 2,
        }
    }
}

impl TreeFormatOptions {
    /// Options including node ids.
    pub fn detailed() -> Self {
        Self {
            show_ids: true,
            ..Default::default()
        }
    }
}

/// Debug utility for dumping a [`Hierarchy`] as indented text.
#[derive(Debug, Clone, Default)]
pub struct HierarchyDebug {
    options: TreeFormatOptions,
}

impl HierarchyDebug {
    /// Create a new debug visualizer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a debug visualizer with custom options.
    pub fn with_options(options: TreeFormatOptions) -> Self {
        Self { options }
    }

    /// Format the subtree rooted at `root`, labelling each node with `label`.
    pub fn format_subtree<T>(
        &self,
        nodes: &Hierarchy<T>,
        root: NodeId,
        label: impl Fn(NodeId, &T) -> String,
    ) -> String {
        let mut output = String::new();
        self.format_into(nodes, root, 0, true, &label, &mut output);
        output
    }

    fn format_into<T>(
        &self,
        nodes: &Hierarchy<T>,
        id: NodeId,
        depth: usize,
        is_last: bool,
        label: &impl Fn(NodeId, &T) -> String,
        output: &mut String,
    ) {
        if self.options.max_depth.is_some_and(|max| depth > max) {
            return;
        }
        let Some(data) = nodes.get(id) else {
            return;
        };

        output.push_str(&self.build_prefix(depth, is_last));
        output.push_str(&label(id, data));
        if self.options.show_ids {
            let _ = write!(output, " [{}]", id.as_raw());
        }
        output.push('\n');

        let children = nodes.children(id);
        for (i, &child) in children.iter().enumerate() {
            self.format_into(nodes, child, depth + 1, i + 1 == children.len(), label, output);
        }
    }

    fn build_prefix(&self, depth: usize, is_last: bool) -> String {
        if depth == 0 {
            return String::new();
        }

        let (branch, tee, corner) = match self.options.style {
            TreeStyle::Ascii => ("|", "+--", "`--"),
            TreeStyle::Unicode => ("\u{2502}", "\u{251c}\u{2500}\u{2500}", "\u{2514}\u{2500}\u{2500}"),
            TreeStyle::Compact => ("", "-", "-"),
        };

        let mut prefix = String::new();
        for _ in 0..(depth - 1) {
            prefix.push_str(branch);
            prefix.push_str(&" ".repeat(self.options.indent_size));
        }
        prefix.push_str(if is_last { corner } else { tee });
        prefix.push(' ');
        prefix
    }
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Used to time each frame's layout and paint passes.
#[derive(Debug)]
pub struct PerfSpan {
    _span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Enter a new performance span named `name`.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::debug_span!(target: "trellis::perf", "perf", operation = name);
        Self {
            _span: span.entered(),
        }
    }
}

/// Wrappers around the `tracing` macros with the crate-wide target.
#[macro_export]
macro_rules! trellis_trace {
    ($($arg:tt)*) => {
        tracing::trace!(target: "trellis", $($arg)*)
    };
}

#[macro_export]
macro_rules! trellis_debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: "trellis", $($arg)*)
    };
}

#[macro_export]
macro_rules! trellis_warn {
    ($($arg:tt)*) => {
        tracing::warn!(target: "trellis", $($arg)*)
    };
}
