//! Windows: a control tree plus the per-frame driver and input routing.
//!
//! A [`Window`] owns a [`ControlTree`] whose root is a free-placement
//! container sized to the window. Each [`frame`](Window::frame) runs
//! layout and, when something changed, repaints into a [`DrawList`].
//! Mouse events are hit-tested against the tree; enter and leave are
//! synthesized from hover changes and a press captures the control until
//! the matching release.
//!
//! # Window documents
//!
//! ```json
//! {
//!     "Title": "Hello",
//!     "Width": 320,
//!     "Height": 200,
//!     "Body": {"Controls": [{"Type": "Text", "ID": "Greeting", "Text": "Hi"}]}
//! }
//! ```
//!
//! An application document maps window names to window documents under
//! `Windows` and may set a shared `FontSize` and `Theme`; see
//! [`load_application`].

use std::collections::BTreeMap;

use serde_json::{Value, json};
use trellis_core::logging::{PerfSpan, span_names, targets};
use trellis_core::{Result, TrellisConfig};
use trellis_render::{DrawList, FrameStats, Point, RenderResult, Renderer, Size};
use trellis_style::ThemeProperty;

use crate::container::LayoutStats;
use crate::control::{ControlId, ControlTree, ControlType};
use crate::interaction::MouseButton;
use crate::loader::{ControlList, LoadReport};

/// A top-level surface.
pub struct Window {
    title: String,
    tree: ControlTree,
    root: ControlId,
    hovered: Option<ControlId>,
    pressed: Option<(ControlId, MouseButton)>,
    focused: Option<ControlId>,
    controls: ControlList,
    draw_list: DrawList,
}

impl Window {
    /// A window with the default configuration.
    pub fn new(title: impl Into<String>, size: Size) -> Self {
        Self::with_config(title, size, TrellisConfig::default())
    }

    pub fn with_config(title: impl Into<String>, size: Size, config: TrellisConfig) -> Self {
        Self::from_tree(title, size, ControlTree::new(config))
    }

    /// A window over an existing tree, e.g. one built with custom metrics.
    pub fn from_tree(title: impl Into<String>, size: Size, mut tree: ControlTree) -> Self {
        let root = tree.create_control(ControlType::Container);
        tree.set_size(root, size);
        Self {
            title: title.into(),
            tree,
            root,
            hovered: None,
            pressed: None,
            focused: None,
            controls: ControlList::default(),
            draw_list: DrawList::new(),
        }
    }

    /// Build a window from a window document.
    pub fn from_json_str(source: &str, config: TrellisConfig) -> Result<Self> {
        let document: Value = serde_json::from_str(source)?;
        let mut window = Self::with_config("", Size::ZERO, config);
        window.load(&document);
        Ok(window)
    }

    /// Replace the window's content with a window document.
    ///
    /// Existing controls under the root are destroyed.
    pub fn load(&mut self, document: &Value) -> LoadReport {
        if let Some(title) = document.get("Title").and_then(Value::as_str) {
            self.title = title.to_owned();
        }
        let current = self.size();
        let width = document.get("Width").and_then(Value::as_f64).map_or(current.width, |w| w as f32);
        let height = document.get("Height").and_then(Value::as_f64).map_or(current.height, |h| h as f32);
        self.set_size(Size::new(width, height));

        for child in self.tree.controls(self.root).to_vec() {
            if let Err(error) = self.tree.destroy(child) {
                tracing::warn!(target: targets::LOADER, %error, "failed to clear window content");
            }
        }
        self.hovered = None;
        self.pressed = None;
        self.focused = None;

        let report = match document.get("Body") {
            Some(body) => self.tree.load(self.root, body),
            None => LoadReport::default(),
        };
        self.refresh_controls();
        if !report.is_clean() {
            trellis_core::trellis_warn!(
                title = %self.title,
                skipped = ?report.skipped,
                "window description had unknown control types"
            );
        }
        report
    }

    /// Parse and [`load`](Self::load) a window document.
    pub fn load_json_str(&mut self, source: &str) -> Result<LoadReport> {
        let document: Value = serde_json::from_str(source)?;
        Ok(self.load(&document))
    }

    /// The window as a window document.
    pub fn save(&self) -> Value {
        let size = self.size();
        let mut body = self.tree.save(self.root);
        if let Some(map) = body.as_object_mut() {
            for key in ["Type", "Expand", "Position", "Size"] {
                map.remove(key);
            }
        }
        json!({
            "Title": self.title,
            "Width": size.width,
            "Height": size.height,
            "Body": body,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn size(&self) -> Size {
        self.tree.size(self.root)
    }

    /// Resize the window; the root container follows.
    pub fn set_size(&mut self, size: Size) {
        self.tree.set_size(self.root, size);
    }

    /// The root container.
    pub fn root(&self) -> ControlId {
        self.root
    }

    pub fn tree(&self) -> &ControlTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut ControlTree {
        &mut self.tree
    }

    /// Named controls as of the last load or [`refresh_controls`](Self::refresh_controls).
    pub fn controls(&self) -> &ControlList {
        &self.controls
    }

    /// Rebuild the ID lookup after controls were added or renamed in code.
    pub fn refresh_controls(&mut self) {
        self.controls = ControlList::collect(&self.tree, self.root);
    }

    /// Draw commands of the last painted frame.
    pub fn draw_list(&self) -> &DrawList {
        &self.draw_list
    }

    // =========================================================================
    // Frame
    // =========================================================================

    /// Run layout, then repaint if anything was invalidated.
    pub fn frame(&mut self) -> LayoutStats {
        let _perf = PerfSpan::new(span_names::FRAME);
        self.prune_targets();
        let stats = self.tree.layout(self.root);
        if self.tree.take_repaint() {
            let _paint = PerfSpan::new(span_names::PAINT);
            self.draw_list.clear();
            self.tree.paint(self.root, &mut self.draw_list);
            tracing::trace!(target: targets::PERF, commands = self.draw_list.len(), "repainted");
        }
        stats
    }

    /// Run a frame and replay it into `renderer`, cleared to the
    /// `Background` color.
    pub fn render<R: Renderer + ?Sized>(&mut self, renderer: &mut R) -> RenderResult<FrameStats> {
        self.frame();
        let background = self.tree.property(self.root, ThemeProperty::Background).to_color();
        renderer.begin_frame(background, self.size());
        self.draw_list.replay(renderer);
        renderer.end_frame()
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Drop hover and capture targets that were destroyed or detached from
    /// this window. A detached hover target is sent `mouse_left` first.
    fn prune_targets(&mut self) {
        let root = self.root;
        let live = |tree: &ControlTree, id: ControlId| tree.contains_control(id) && tree.is_within(id, root);
        if let Some(id) = self.hovered
            && !live(&self.tree, id)
        {
            // A detached control keeps its hover state until told otherwise.
            if self.tree.contains_control(id) {
                self.tree.mouse_left(id);
            }
            self.hovered = None;
        }
        if let Some((id, _)) = self.pressed
            && !live(&self.tree, id)
        {
            self.pressed = None;
        }
        if let Some(id) = self.focused
            && !live(&self.tree, id)
        {
            self.focused = None;
        }
    }

    /// The control currently under the pointer.
    pub fn hovered(&self) -> Option<ControlId> {
        self.hovered
    }

    /// The control holding the mouse capture.
    pub fn pressed(&self) -> Option<ControlId> {
        self.pressed.map(|(id, _)| id)
    }

    /// The control that last consumed a press.
    pub fn focused(&self) -> Option<ControlId> {
        self.focused
    }

    /// Pointer moved to `point` (window coordinates).
    pub fn mouse_moved(&mut self, point: Point) -> bool {
        self.prune_targets();
        let target = self.tree.control_at(self.root, point);
        if target != self.hovered {
            if let Some(old) = self.hovered.take() {
                self.tree.mouse_left(old);
            }
            // The leave handler may have destroyed the new target.
            let target = target.filter(|&id| self.tree.contains_control(id));
            if let Some(new) = target {
                self.tree.mouse_entered(new);
            }
            self.hovered = target;
            tracing::trace!(target: targets::INPUT, hovered = ?target.map(|id| id.as_raw()), "hover changed");
        }

        match self.pressed.map(|(id, _)| id).or(self.hovered) {
            Some(id) => self.tree.mouse_moved(id, point),
            None => false,
        }
    }

    pub fn mouse_pressed(&mut self, point: Point, button: MouseButton) -> bool {
        self.prune_targets();
        let Some(target) = self.tree.control_at(self.root, point) else {
            return false;
        };
        let consumed = self.tree.mouse_pressed(target, point, button);
        if consumed && self.tree.contains_control(target) {
            self.focused = Some(target);
            if self.pressed.is_none() {
                self.pressed = Some((target, button));
            }
        }
        consumed
    }

    /// Release goes to the capturing control if the button matches,
    /// otherwise to the control under the pointer.
    pub fn mouse_released(&mut self, point: Point, button: MouseButton) -> bool {
        self.prune_targets();
        if let Some((id, held)) = self.pressed
            && held == button
        {
            self.pressed = None;
            return self.tree.mouse_released(id, point, button);
        }
        match self.tree.control_at(self.root, point) {
            Some(target) => self.tree.mouse_released(target, point, button),
            None => false,
        }
    }
}

impl std::fmt::Debug for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Window")
            .field("title", &self.title)
            .field("size", &self.size())
            .field("controls", &self.tree.len())
            .finish_non_exhaustive()
    }
}

/// Build every window of an application document.
///
/// ```json
/// {"FontSize": 14, "Windows": {"Main": {"Title": "Main", "Body": {}}}}
/// ```
///
/// A top-level `FontSize` overrides `config.font_size` for all windows. A
/// top-level `Theme` object is applied over every window's theme before its
/// body is loaded.
pub fn load_application(source: &str, mut config: TrellisConfig) -> Result<BTreeMap<String, Window>> {
    let document: Value = serde_json::from_str(source)?;
    if let Some(font_size) = document.get("FontSize").and_then(Value::as_f64) {
        config.font_size = font_size as f32;
    }
    let theme = document.get("Theme").filter(|theme| {
        let usable = theme.is_object();
        if !usable {
            tracing::warn!(target: targets::LOADER, "application theme is not an object");
        }
        usable
    });

    let mut windows = BTreeMap::new();
    if let Some(entries) = document.get("Windows").and_then(Value::as_object) {
        for (name, description) in entries {
            let mut window = Window::with_config(name.as_str(), Size::ZERO, config.clone());
            if let Some(overrides) = theme {
                let mut merged = window.tree().theme().clone();
                if let Ok(applied) = merged.load_json(overrides) {
                    trellis_core::trellis_trace!(window = %name, applied, "applied theme");
                    window.tree_mut().set_theme(merged);
                }
            }
            window.load(description);
            windows.insert(name.clone(), window);
        }
    }
    tracing::debug!(target: targets::LOADER, windows = windows.len(), "loaded application");
    Ok(windows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_document() {
        let window = Window::from_json_str(
            r#"{"Title": "Hello", "Width": 320, "Height": 200,
                "Body": {"Controls": [{"Type": "Text", "ID": "Greeting", "Text": "Hi"}]}}"#,
            TrellisConfig::default(),
        )
        .unwrap();
        assert_eq!(window.title(), "Hello");
        assert_eq!(window.size(), Size::new(320.0, 200.0));
        let greeting = window.controls().get("Greeting").unwrap();
        assert_eq!(window.tree().text(greeting), "Hi");
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(Window::from_json_str("{", TrellisConfig::default()).is_err());
    }

    #[test]
    fn test_reload_replaces_content() {
        let mut window = Window::new("w", Size::new(100.0, 100.0));
        window
            .load_json_str(r#"{"Body": {"Controls": [{"Type": "Panel"}, {"Type": "Panel"}]}}"#)
            .unwrap();
        let old = window.tree().controls(window.root()).to_vec();
        window
            .load_json_str(r#"{"Body": {"Controls": [{"Type": "Text", "Text": "x"}]}}"#)
            .unwrap();
        assert_eq!(window.tree().controls(window.root()).len(), 1);
        assert!(old.iter().all(|&id| !window.tree().contains_control(id)));
        assert_eq!(window.size(), Size::new(100.0, 100.0));
    }

    #[test]
    fn test_frame_repaints_only_when_invalidated() {
        let mut window = Window::new("w", Size::new(100.0, 100.0));
        let root = window.root();
        window.tree_mut().add_text(root, "Hi").unwrap();
        window.frame();
        assert!(!window.draw_list().is_empty());

        let stats = window.frame();
        assert!(stats.is_idle());
        assert!(!window.tree().needs_repaint());
    }

    #[test]
    fn test_application_font_size() {
        let windows = load_application(
            r#"{"FontSize": 8, "Windows": {
                "Main": {"Title": "Main", "Body": {"Controls": [{"Type": "Text", "ID": "T", "Text": "ab"}]}},
                "Tools": {"Title": "Tools"}
            }}"#,
            TrellisConfig::default(),
        )
        .unwrap();
        assert_eq!(windows.len(), 2);
        let main = &windows["Main"];
        let text = main.controls().get("T").unwrap();
        assert_eq!(main.tree().size(text), Size::new(8.0, 10.0));
        assert_eq!(windows["Tools"].title(), "Tools");
    }

    #[test]
    fn test_application_theme() {
        let windows = load_application(
            r##"{"Theme": {"Panel": "#ff0000", "Bogus": 1}, "Windows": {"Main": {}}}"##,
            TrellisConfig::default(),
        )
        .unwrap();
        let main = &windows["Main"];
        let panel = main.tree().property(main.root(), ThemeProperty::Panel).to_color();
        assert_eq!(panel, trellis_render::Color::from_rgb8(255, 0, 0));
    }

    #[test]
    fn test_press_focuses_target() {
        let mut window = Window::new("w", Size::new(100.0, 100.0));
        let root = window.root();
        let button = window.tree_mut().add_button(root, "OK").unwrap();
        window.frame();
        assert!(window.mouse_pressed(Point::new(2.0, 2.0), MouseButton::Left));
        window.mouse_released(Point::new(2.0, 2.0), MouseButton::Left);
        assert_eq!(window.focused(), Some(button));

        window.tree_mut().destroy(button).unwrap();
        window.frame();
        assert_eq!(window.focused(), None);
    }
}
