//! Integration tests for the Tree composite: expansion, hover, selection
//! and row hit-testing through a window.

use std::cell::RefCell;
use std::rc::Rc;

use trellis::render::{DrawCommand, Point, Size};
use trellis::style::ThemeProperty;
use trellis::{ControlId, ControlTree, FixedMetrics, MouseButton, TrellisConfig, Window};

/// A window holding `Root` with children `A` and `B`.
fn setup() -> (Window, ControlId, ControlId, ControlId) {
    let tree = ControlTree::new(TrellisConfig::default()).with_metrics(FixedMetrics::new(0.5, 1.25));
    let mut window = Window::from_tree("tree", Size::new(200.0, 200.0), tree);
    let root = window.root();
    let tree = window.tree_mut();
    let node = tree.add_tree(root, "Root").unwrap();
    let a = tree.add_child(node, "A").unwrap();
    let b = tree.add_child(node, "B").unwrap();
    window.frame();
    (window, node, a, b)
}

fn has_band(window: &Window, property: ThemeProperty, node: ControlId) -> bool {
    let color = window.tree().property(node, property).to_color();
    window
        .draw_list()
        .commands()
        .iter()
        .any(|c| matches!(c, DrawCommand::Rectangle { color: fill, .. } if *fill == color))
}

#[test]
fn test_expansion_keeps_child_list() {
    let (mut window, node, a, _) = setup();
    let tree = window.tree_mut();
    let list = tree.child_list(node).unwrap();

    tree.set_expanded(node, false);
    assert_eq!(tree.child_list(node), Some(list));
    assert!(!tree.has_control(node, list));
    assert_eq!(tree.tree_root(a), node);

    tree.set_expanded(node, true);
    assert_eq!(tree.child_list(node), Some(list));
    assert!(tree.has_control(node, list));
}

#[test]
fn test_layout_indents_children() {
    let (window, node, a, b) = setup();
    let tree = window.tree();
    let item = tree.tree_item(node).unwrap();
    assert_eq!(tree.size(item), Size::new(48.0, 20.0));
    assert_eq!(tree.size(node), Size::new(48.0, 60.0));

    let a_item = tree.tree_item(a).unwrap();
    let b_item = tree.tree_item(b).unwrap();
    assert_eq!(tree.absolute_position(a_item), Point::new(20.0, 20.0));
    assert_eq!(tree.absolute_position(b_item), Point::new(20.0, 40.0));
}

#[test]
fn test_collapse_shrinks_tree() {
    let (mut window, node, _, _) = setup();
    window.tree_mut().set_expanded(node, false);
    window.frame();
    assert_eq!(window.tree().size(node), Size::new(48.0, 20.0));
}

#[test]
fn test_hover_moves_between_rows() {
    let (mut window, node, a, b) = setup();
    let tree = window.tree_mut();
    tree.set_tree_hovered(a, true);
    assert!(tree.is_highlighted(a));
    assert_eq!(tree.tree_hovered(node), Some(a));

    tree.set_tree_hovered(b, true);
    assert!(!tree.is_highlighted(a));
    assert!(tree.is_highlighted(b));
    assert_eq!(tree.tree_hovered(a), Some(b));
    assert_eq!(tree.tree_selected(node), None);
}

#[test]
fn test_hover_by_pointer() {
    let (mut window, node, a, _) = setup();
    let calls = Rc::new(RefCell::new(Vec::new()));
    let seen = calls.clone();
    window
        .tree_mut()
        .set_on_tree_hovered(a, move |tree, id| seen.borrow_mut().push((id, tree.is_highlighted(id))));

    // Anywhere across the row's band, even left of the indented row.
    window.mouse_moved(Point::new(2.0, 25.0));
    assert_eq!(window.tree().tree_hovered(node), Some(a));

    window.mouse_moved(Point::new(40.0, 5.0));
    assert_eq!(window.tree().tree_hovered(node), Some(node));
    assert!(!window.tree().is_highlighted(a));
    assert_eq!(*calls.borrow(), vec![(a, true), (a, false), (node, true)]);

    window.mouse_moved(Point::new(150.0, 150.0));
    assert_eq!(window.tree().tree_hovered(node), None);
}

#[test]
fn test_click_selects_and_toggle_collapses() {
    let (mut window, node, a, b) = setup();
    let selected = Rc::new(RefCell::new(None));
    let seen = selected.clone();
    window.tree_mut().set_on_tree_selected(node, move |_, id| *seen.borrow_mut() = Some(id));

    assert!(window.mouse_pressed(Point::new(40.0, 30.0), MouseButton::Left));
    window.mouse_released(Point::new(40.0, 30.0), MouseButton::Left);
    assert_eq!(window.tree().tree_selected(node), Some(a));
    assert_eq!(*selected.borrow(), Some(a));

    window.frame();
    assert!(has_band(&window, ThemeProperty::Selection, node));

    // The toggle square of the root row.
    window.mouse_pressed(Point::new(5.0, 5.0), MouseButton::Left);
    assert!(!window.tree().is_expanded(node));
    assert!(window.tree().is_item_hidden(a));
    assert_eq!(window.tree().tree_selected(node), Some(a));

    window.frame();
    assert!(!has_band(&window, ThemeProperty::Selection, node));
    assert_eq!(window.tree().control_at(window.root(), Point::new(40.0, 50.0)), None);

    window.tree_mut().set_tree_selected(b);
    assert!(!window.tree().is_highlighted(a));
    assert!(window.tree().is_highlighted(b));
}

#[test]
fn test_hovered_band_not_drawn_over_selection() {
    let (mut window, node, a, _) = setup();
    window.tree_mut().set_tree_selected(a);
    window.tree_mut().set_tree_hovered(a, true);
    window.frame();
    assert!(has_band(&window, ThemeProperty::Selection, node));
    assert!(!has_band(&window, ThemeProperty::SelectionHovered, node));

    window.tree_mut().set_tree_hovered(node, true);
    window.frame();
    assert!(has_band(&window, ThemeProperty::SelectionHovered, node));
    assert!(window.tree().is_highlighted(a));
}

#[test]
fn test_destroy_collapsed_tree_releases_subtree() {
    let (mut window, node, a, b) = setup();
    let tree = window.tree_mut();
    let a1 = tree.add_child(a, "A1").unwrap();
    let a_list = tree.child_list(a).unwrap();
    let list = tree.child_list(node).unwrap();
    tree.set_expanded(a, false);
    tree.set_expanded(node, false);

    let before = tree.len();
    // Root, A, B and A1 (tree and row each) plus both child lists.
    assert_eq!(tree.destroy(node).unwrap(), 10);
    assert_eq!(tree.len(), before - 10);
    for id in [node, a, b, a1, list, a_list] {
        assert!(!tree.contains_control(id));
    }
}

#[test]
fn test_reloading_collapsed_tree_does_not_grow() {
    let document = r#"{"Body": {"Controls": [
        {"Type": "Tree", "Text": "Root", "Expanded": false,
         "Items": [{"Text": "A", "Items": [{"Text": "A1"}]}, {"Text": "B"}]}
    ]}}"#;
    let mut window = Window::new("reload", Size::new(200.0, 200.0));
    window.load_json_str(document).unwrap();
    let loaded = window.tree().len();
    for _ in 0..10 {
        window.load_json_str(document).unwrap();
    }
    assert_eq!(window.tree().len(), loaded);
}

#[test]
fn test_detached_row_drops_hover_and_selection() {
    let (mut window, node, a, _) = setup();
    let tree = window.tree_mut();
    let list = tree.child_list(node).unwrap();
    tree.set_tree_selected(a);
    tree.set_tree_hovered(a, true);

    assert!(tree.remove_control(list, a));
    assert_eq!(tree.tree_selected(node), None);
    assert_eq!(tree.tree_hovered(node), None);
    assert!(!tree.is_highlighted(a));

    window.frame();
    assert!(!has_band(&window, ThemeProperty::Selection, node));
    assert!(!has_band(&window, ThemeProperty::SelectionHovered, node));

    window.tree_mut().insert_control(list, a, None).unwrap();
    assert!(!window.tree().is_highlighted(a));
    assert_eq!(window.tree().tree_selected(node), None);
}

#[test]
fn test_pointer_leaving_collapsed_row_clears_hover() {
    let (mut window, node, a, _) = setup();
    window.mouse_moved(Point::new(2.0, 25.0));
    assert_eq!(window.tree().tree_hovered(node), Some(a));

    window.tree_mut().set_expanded(node, false);
    window.mouse_moved(Point::new(150.0, 150.0));
    window.tree_mut().set_expanded(node, true);

    assert_eq!(window.tree().tree_hovered(node), None);
    assert!(!window.tree().is_highlighted(a));
    window.frame();
    assert!(!has_band(&window, ThemeProperty::SelectionHovered, node));
}
