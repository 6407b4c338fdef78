//! Integration tests for container layout and invalidation.

use trellis::render::{Point, Size};
use trellis::{ControlId, ControlTree, Expand, FixedMetrics, TrellisConfig, Window};

fn setup() -> (Window, ControlId) {
    let tree = ControlTree::new(TrellisConfig::default()).with_metrics(FixedMetrics::new(0.5, 1.25));
    let window = Window::from_tree("layout", Size::new(400.0, 300.0), tree);
    let root = window.root();
    (window, root)
}

#[test]
fn test_layout_is_idempotent() {
    let (mut window, root) = setup();
    let tree = window.tree_mut();
    let column = tree.add_vertical(root).unwrap();
    tree.add_text(column, "Hello").unwrap();
    tree.add_button(column, "OK").unwrap();

    let first = window.frame();
    assert_eq!(first.containers_placed, 2);
    let positions: Vec<Point> = window.tree().controls(column).iter().map(|&c| window.tree().position(c)).collect();

    let second = window.frame();
    assert!(second.is_idle());
    let again: Vec<Point> = window.tree().controls(column).iter().map(|&c| window.tree().position(c)).collect();
    assert_eq!(positions, again);
}

#[test]
fn test_expand_fills_assigned_space() {
    let (mut window, root) = setup();
    let tree = window.tree_mut();
    let column = tree.add_vertical(root).unwrap();
    tree.set_spacing(column, 4.0);
    tree.set_expand(column, Expand::Both);
    let text = tree.add_text(column, "Hi").unwrap();
    let button = tree.add_button(column, "OK").unwrap();
    tree.set_expand(button, Expand::Width);

    window.frame();
    let tree = window.tree();
    assert_eq!(tree.size(column), Size::new(400.0, 300.0));
    assert_eq!(tree.position(text), Point::new(0.0, 0.0));
    assert_eq!(tree.size(text), Size::new(16.0, 20.0));
    assert_eq!(tree.position(button), Point::new(0.0, 24.0));
    assert_eq!(tree.size(button), Size::new(400.0, 28.0));
}

#[test]
fn test_window_resize_relayouts_expanded_content() {
    let (mut window, root) = setup();
    let column = window.tree_mut().add_vertical(root).unwrap();
    window.tree_mut().set_expand(column, Expand::Both);
    window.frame();

    window.set_size(Size::new(640.0, 480.0));
    let stats = window.frame();
    assert!(!stats.is_idle());
    assert_eq!(window.tree().size(column), Size::new(640.0, 480.0));
}

#[test]
fn test_removal_marks_container_dirty() {
    let (mut window, root) = setup();
    let tree = window.tree_mut();
    let column = tree.add_vertical(root).unwrap();
    let text = tree.add_text(column, "Hi").unwrap();
    window.frame();
    assert!(!window.tree().needs_layout(column));

    let tree = window.tree_mut();
    assert!(tree.remove_control(column, text));
    assert!(!tree.has_control(column, text));
    assert!(tree.contains_control(text));
    assert!(tree.needs_layout(column));
    assert!(tree.needs_layout(root));
    assert!(!tree.remove_control(column, text));
}

#[test]
fn test_control_at_returns_single_topmost() {
    let (mut window, root) = setup();
    let tree = window.tree_mut();
    let below = tree.add_panel(root).unwrap();
    let above = tree.add_panel(root).unwrap();
    tree.set_size(below, Size::new(50.0, 50.0));
    tree.set_size(above, Size::new(50.0, 50.0));
    tree.set_position(above, Point::new(10.0, 10.0));
    window.frame();

    let tree = window.tree_mut();
    assert_eq!(tree.control_at(root, Point::new(20.0, 20.0)), Some(above));
    assert_eq!(tree.control_at(root, Point::new(5.0, 5.0)), Some(below));
    assert_eq!(tree.control_at(root, Point::new(100.0, 100.0)), None);

    tree.set_visible(above, false);
    assert_eq!(tree.control_at(root, Point::new(20.0, 20.0)), Some(below));
}

#[test]
fn test_vertical_desired_size() {
    let (mut window, root) = setup();
    let tree = window.tree_mut();
    let column = tree.add_vertical(root).unwrap();
    tree.set_spacing(column, 5.0);
    let wide = tree.add_panel(column).unwrap();
    let tall = tree.add_panel(column).unwrap();
    tree.set_size(wide, Size::new(100.0, 20.0));
    tree.set_size(tall, Size::new(60.0, 30.0));

    assert_eq!(tree.desired_size(column), Size::new(100.0, 55.0));
    window.frame();
    assert_eq!(window.tree().size(column), Size::new(100.0, 55.0));
    assert_eq!(window.tree().position(tall), Point::new(0.0, 25.0));
}

#[test]
fn test_only_dirty_branch_is_replaced() {
    let (mut window, root) = setup();
    let tree = window.tree_mut();
    let row = tree.add_horizontal(root).unwrap();
    let left = tree.add_vertical(row).unwrap();
    let right = tree.add_vertical(row).unwrap();
    let label = tree.add_text(left, "a").unwrap();
    tree.add_text(right, "b").unwrap();
    assert_eq!(window.frame().containers_placed, 4);

    // Same measured size: repaint only.
    window.tree_mut().set_text(label, "c");
    assert!(window.frame().is_idle());

    window.tree_mut().set_text(label, "longer");
    let stats = window.frame();
    assert!(!stats.is_idle());
    assert!(!window.tree().needs_layout(right));
    let tree = window.tree();
    assert_eq!(tree.position(right).x, tree.size(left).width + tree.spacing(row));
}

#[test]
fn test_destroy_releases_handles() {
    let (mut window, root) = setup();
    let tree = window.tree_mut();
    let column = tree.add_vertical(root).unwrap();
    let text = tree.add_text(column, "Hi").unwrap();

    assert_eq!(tree.destroy(column).unwrap(), 2);
    assert!(!tree.contains_control(text));
    assert_eq!(tree.text(text), "");
    assert_eq!(tree.size(text), Size::ZERO);
    tree.set_text(text, "ignored");
    assert!(tree.destroy(text).is_err());
    assert!(tree.controls(root).is_empty());
}
