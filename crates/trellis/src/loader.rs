//! Description documents.
//!
//! A control is described by a JSON object whose `Type` names a
//! [`ControlType`]. Containers list their children under `Controls`;
//! Trees list their child Trees under `Items`.
//!
//! ```json
//! {
//!     "Type": "VerticalContainer",
//!     "Spacing": 6,
//!     "Controls": [
//!         {"Type": "Text", "ID": "Title", "Text": "Hello"},
//!         {"Type": "Button", "ID": "Ok", "Text": "OK", "Expand": "Width"}
//!     ]
//! }
//! ```
//!
//! Loading is forgiving: absent or mistyped keys keep their defaults and
//! children with an unknown `Type` are skipped (reported in the returned
//! [`LoadReport`] and logged on the `trellis::loader` target).

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::{Map, Value, json};
use trellis_core::logging::{PerfSpan, span_names, targets};
use trellis_render::{Point, Size};

use crate::container::{Grow, Layout, Margins};
use crate::control::{ControlId, ControlKind, ControlTree, ControlType, Expand};

/// Outcome of loading a description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Controls created from `Controls` and `Items` entries.
    pub created: usize,
    /// `Type` strings that did not resolve, in document order. A missing
    /// `Type` is recorded as an empty string.
    pub skipped: Vec<String>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

fn read_f32(value: &Value) -> Option<f32> {
    value.as_f64().map(|f| f as f32)
}

fn read_array<const N: usize>(value: &Value) -> Option<[f32; N]> {
    let items = value.as_array()?;
    if items.len() != N {
        return None;
    }
    let mut out = [0.0; N];
    for (slot, item) in out.iter_mut().zip(items) {
        *slot = read_f32(item)?;
    }
    Some(out)
}

/// `Text` is either a string or an object carrying its own `Text`.
fn read_text(value: &Value) -> Option<&str> {
    match value {
        Value::String(s) => Some(s),
        Value::Object(map) => map.get("Text")?.as_str(),
        _ => None,
    }
}

impl ControlTree {
    /// Apply a description to an existing control, creating its children.
    pub fn load(&mut self, id: ControlId, document: &Value) -> LoadReport {
        let _perf = PerfSpan::new(span_names::LOAD);
        let mut report = LoadReport::default();
        self.load_node(id, document, &mut report);
        tracing::debug!(
            target: targets::LOADER,
            created = report.created,
            skipped = report.skipped.len(),
            "loaded description"
        );
        report
    }

    fn load_node(&mut self, id: ControlId, document: &Value, report: &mut LoadReport) {
        if !self.contains_control(id) {
            return;
        }
        self.load_common(id, document);

        let Some(ty) = self.control_type(id) else {
            return;
        };
        match ty {
            ControlType::Text | ControlType::Button | ControlType::Checkbox => self.load_label(id, document),
            ControlType::HorizontalContainer | ControlType::VerticalContainer => {
                if let Some(spacing) = document.get("Spacing").and_then(read_f32) {
                    self.set_spacing(id, spacing);
                }
                if let Some(grow) = document.get("Grow").and_then(Value::as_str).and_then(Grow::from_name) {
                    self.set_grow(id, grow);
                }
            }
            ControlType::MarginContainer => {
                if let Some(margins) = document.get("Margins").and_then(read_array::<4>) {
                    self.set_margins(id, Margins::from(margins));
                }
            }
            ControlType::Tree => self.load_tree(id, document, report),
            ControlType::Container | ControlType::Panel | ControlType::Separator | ControlType::TreeItem => {}
        }
        if ty == ControlType::Checkbox
            && let Some(checked) = document.get("Checked").and_then(Value::as_bool)
        {
            self.set_checked(id, checked);
        }

        if ty.is_container() && ty != ControlType::Tree {
            self.load_controls(id, document, report);
        }
    }

    fn load_common(&mut self, id: ControlId, document: &Value) {
        if let Some(name) = document.get("ID").and_then(Value::as_str) {
            self.set_name(id, Some(name.to_owned()));
        }
        if let Some(expand) = document.get("Expand").and_then(Value::as_str).and_then(Expand::from_name) {
            self.set_expand(id, expand);
        }
        if let Some(position) = document.get("Position").and_then(|v| Point::deserialize(v).ok()) {
            self.set_position(id, position);
        }
        if let Some(size) = document.get("Size").and_then(|v| Size::deserialize(v).ok()) {
            self.set_size(id, size);
        }
        if let Some(visible) = document.get("Visible").and_then(Value::as_bool) {
            self.set_visible(id, visible);
        }
        if let Some(properties) = document.get("Properties") {
            let mut applied = Vec::new();
            if let Some(node) = self.node_mut(id) {
                node.overrides.load_json(properties);
                applied.extend(node.overrides.iter().map(|(p, _)| p));
            }
            for property in applied {
                self.property_changed(id, property);
            }
        }
    }

    fn load_label(&mut self, id: ControlId, document: &Value) {
        if let Some(text) = document.get("Text").and_then(read_text) {
            self.set_text(id, text);
        }
        if let Some(font_size) = document.get("FontSize").and_then(read_f32) {
            self.set_font_size(id, Some(font_size));
        }
    }

    fn load_tree(&mut self, id: ControlId, document: &Value, report: &mut LoadReport) {
        self.load_label(id, document);
        if let Some(items) = document.get("Items").and_then(Value::as_array) {
            for item in items {
                match self.add_child(id, "") {
                    Ok(child) => {
                        report.created += 1;
                        self.load_node(child, item, report);
                    }
                    Err(error) => tracing::warn!(target: targets::LOADER, %error, "could not add tree item"),
                }
            }
        }
        if let Some(expanded) = document.get("Expanded").and_then(Value::as_bool) {
            self.set_expanded(id, expanded);
        }
    }

    fn load_controls(&mut self, id: ControlId, document: &Value, report: &mut LoadReport) {
        let Some(controls) = document.get("Controls").and_then(Value::as_array) else {
            return;
        };
        for entry in controls {
            let type_name = entry.get("Type").and_then(Value::as_str).unwrap_or_default();
            let Some(ty) = ControlType::from_type_name(type_name) else {
                tracing::warn!(target: targets::LOADER, type_name, "skipping control of unknown type");
                report.skipped.push(type_name.to_owned());
                continue;
            };
            match self.add_control(id, ty) {
                Ok(child) => {
                    report.created += 1;
                    self.load_node(child, entry, report);
                }
                Err(error) => tracing::warn!(target: targets::LOADER, %error, "could not add control"),
            }
        }
    }

    /// Describe a control and its subtree; the inverse of [`load`](Self::load).
    pub fn save(&self, id: ControlId) -> Value {
        let Some(node) = self.node(id) else {
            return Value::Null;
        };
        let ty = node.control_type();
        let mut map = Map::new();
        map.insert("Type".into(), json!(ty.type_name()));
        if let Some(name) = node.name() {
            map.insert("ID".into(), json!(name));
        }
        map.insert("Expand".into(), json!(node.expand.name()));
        map.insert("Position".into(), json!(node.position));
        map.insert("Size".into(), json!(node.preferred));
        if !node.visible {
            map.insert("Visible".into(), json!(false));
        }
        if !node.overrides.is_empty() {
            map.insert("Properties".into(), node.overrides.to_json());
        }

        if let Some(label) = self.label(id) {
            map.insert("Text".into(), json!(label.text()));
            if let Some(font_size) = label.font_size() {
                map.insert("FontSize".into(), json!(font_size));
            }
        }

        match &node.kind {
            ControlKind::Checkbox(state) => {
                map.insert("Checked".into(), json!(state.checked));
            }
            ControlKind::Container(state) => match &state.layout {
                Layout::Horizontal(b) | Layout::Vertical(b) => {
                    map.insert("Spacing".into(), json!(b.spacing));
                    map.insert("Grow".into(), json!(b.grow.name()));
                }
                Layout::Margin(m) => {
                    map.insert("Margins".into(), json!(<[f32; 4]>::from(*m)));
                }
                Layout::Tree(t) => {
                    let items: Vec<Value> = self
                        .tree_children(id)
                        .into_iter()
                        .map(|child| self.save(child))
                        .collect();
                    map.insert("Items".into(), Value::Array(items));
                    map.insert("Expanded".into(), json!(t.expanded));
                }
                Layout::Free => {}
            },
            _ => {}
        }

        if ty.is_container() && ty != ControlType::Tree {
            let controls: Vec<Value> = self.controls(id).iter().map(|&child| self.save(child)).collect();
            map.insert("Controls".into(), Value::Array(controls));
        }
        Value::Object(map)
    }
}

/// Named controls of a loaded tree, addressed by dotted path.
///
/// The path of a control is the `ID`s of its named ancestors (below the
/// collection root) followed by its own, joined with `.`:
/// `"Sidebar.Ok"` is the control `Ok` inside the control `Sidebar`.
/// Unnamed ancestors do not contribute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlList {
    entries: BTreeMap<String, ControlId>,
}

impl ControlList {
    /// Collect every named control beneath `root`, including the
    /// subtrees of collapsed Trees.
    pub fn collect(tree: &ControlTree, root: ControlId) -> Self {
        let mut list = Self::default();
        list.visit(tree, root, "");
        list
    }

    fn visit(&mut self, tree: &ControlTree, id: ControlId, prefix: &str) {
        let mut children = tree.controls(id).to_vec();
        if let Some(child_list) = tree.child_list(id)
            && !tree.has_control(id, child_list)
        {
            children.push(child_list);
        }

        for child in children {
            match tree.name(child) {
                Some(name) => {
                    let path = if prefix.is_empty() {
                        name.to_owned()
                    } else {
                        format!("{prefix}.{name}")
                    };
                    if self.entries.insert(path.clone(), child).is_some() {
                        tracing::warn!(target: targets::LOADER, path = %path, "duplicate control path");
                    }
                    self.visit(tree, child, &path);
                }
                None => self.visit(tree, child, prefix),
            }
        }
    }

    pub fn get(&self, path: &str) -> Option<ControlId> {
        self.entries.get(path).copied()
    }

    /// The control at `path` if it has type `ty`.
    pub fn get_typed(&self, tree: &ControlTree, path: &str, ty: ControlType) -> Option<ControlId> {
        self.get(path).filter(|&id| tree.control_type(id) == Some(ty))
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Paths and controls in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, ControlId)> {
        self.entries.iter().map(|(path, &id)| (path.as_str(), id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_core::TrellisConfig;

    fn setup() -> (ControlTree, ControlId) {
        let mut tree = ControlTree::new(TrellisConfig::default());
        let root = tree.create_control(ControlType::Container);
        (tree, root)
    }

    #[test]
    fn test_text_forms() {
        let (mut tree, root) = setup();
        tree.load(
            root,
            &json!({"Controls": [
                {"Type": "Text", "Text": "plain"},
                {"Type": "Text", "Text": {"Text": "nested"}}
            ]}),
        );
        let texts: Vec<&str> = tree.controls(root).iter().map(|&c| tree.text(c)).collect();
        assert_eq!(texts, vec!["plain", "nested"]);
    }

    #[test]
    fn test_unknown_types_skipped() {
        let (mut tree, root) = setup();
        let report = tree.load(
            root,
            &json!({"Controls": [
                {"Type": "Image"},
                {"Type": "TextButton", "Text": "Go"},
                {"Text": "no type"}
            ]}),
        );
        assert_eq!(report.created, 1);
        assert_eq!(report.skipped, vec!["Image".to_string(), String::new()]);
        let only = tree.controls(root)[0];
        assert_eq!(tree.control_type(only), Some(ControlType::Button));
    }

    #[test]
    fn test_malformed_fields_keep_defaults() {
        let (mut tree, root) = setup();
        tree.load(
            root,
            &json!({"Controls": [
                {"Type": "VerticalContainer", "Spacing": "wide", "Expand": "Sideways", "Size": [1]}
            ]}),
        );
        let column = tree.controls(root)[0];
        assert_eq!(tree.spacing(column), tree.config().box_spacing);
        assert_eq!(tree.expand(column), Expand::None);
        assert_eq!(tree.size(column), Size::ZERO);
    }

    #[test]
    fn test_geometry_arrays() {
        let (mut tree, root) = setup();
        tree.load(
            root,
            &json!({"Controls": [
                {"Type": "Panel", "Position": [3, 4.5], "Size": [20, 10]},
                {"Type": "Panel", "Position": [1, "x"], "Size": [1, 2, 3]}
            ]}),
        );
        let placed = tree.controls(root)[0];
        assert_eq!(tree.position(placed), Point::new(3.0, 4.5));
        assert_eq!(tree.size(placed), Size::new(20.0, 10.0));
        assert_eq!(tree.save(placed)["Position"], json!([3.0, 4.5]));

        let malformed = tree.controls(root)[1];
        assert_eq!(tree.position(malformed), Point::ZERO);
        assert_eq!(tree.size(malformed), Size::ZERO);
    }

    #[test]
    fn test_tree_items() {
        let (mut tree, root) = setup();
        tree.load(
            root,
            &json!({"Controls": [{
                "Type": "Tree",
                "Text": "Root",
                "Items": [{"Text": "A"}, {"Text": "B", "Items": [{"Text": "B1"}]}],
                "Expanded": false
            }]}),
        );
        let node = tree.controls(root)[0];
        assert_eq!(tree.text(node), "Root");
        assert!(!tree.is_expanded(node));
        let children = tree.tree_children(node);
        assert_eq!(children.len(), 2);
        assert_eq!(tree.text(children[1]), "B");
        assert!(tree.is_expanded(children[1]));
    }

    #[test]
    fn test_control_list_paths() {
        let (mut tree, root) = setup();
        tree.load(
            root,
            &json!({"Controls": [
                {"Type": "VerticalContainer", "ID": "Side", "Controls": [
                    {"Type": "HorizontalContainer", "Controls": [
                        {"Type": "Button", "ID": "Ok", "Text": "OK"}
                    ]}
                ]},
                {"Type": "Text", "ID": "Title", "Text": "T"}
            ]}),
        );
        let list = ControlList::collect(&tree, root);
        assert_eq!(list.len(), 3);
        let ok = list.get("Side.Ok").unwrap();
        assert_eq!(tree.text(ok), "OK");
        assert_eq!(list.get_typed(&tree, "Side.Ok", ControlType::Button), Some(ok));
        assert_eq!(list.get_typed(&tree, "Side.Ok", ControlType::Text), None);
        assert!(list.contains("Title"));
        assert!(!list.contains("Ok"));
    }
}
