//! Integration tests for the window: frames, rendering and input routing.

use std::cell::Cell;
use std::rc::Rc;

use trellis::render::{Point, RecordingRenderer, Size};
use trellis::style::ThemeProperty;
use trellis::{
    ControlId, ControlKind, ControlTree, FixedMetrics, MouseButton, TrellisConfig, Window, load_application,
};

/// A window with an "OK" button at (10, 10), laid out.
fn setup() -> (Window, ControlId) {
    let tree = ControlTree::new(TrellisConfig::default()).with_metrics(FixedMetrics::new(0.5, 1.25));
    let mut window = Window::from_tree("input", Size::new(300.0, 200.0), tree);
    let root = window.root();
    let button = window.tree_mut().add_button(root, "OK").unwrap();
    window.tree_mut().set_position(button, Point::new(10.0, 10.0));
    window.frame();
    (window, button)
}

fn counter() -> (Rc<Cell<u32>>, Rc<Cell<u32>>) {
    let count = Rc::new(Cell::new(0));
    (count.clone(), count)
}

fn is_hovered(window: &Window, button: ControlId) -> bool {
    matches!(window.tree().node(button).map(|n| n.kind()), Some(ControlKind::Button(state)) if state.is_hovered())
}

#[test]
fn test_enter_and_leave() {
    let (mut window, button) = setup();
    window.mouse_moved(Point::new(20.0, 20.0));
    assert_eq!(window.hovered(), Some(button));
    assert!(is_hovered(&window, button));

    window.mouse_moved(Point::new(200.0, 150.0));
    assert_eq!(window.hovered(), None);
    assert!(!is_hovered(&window, button));
}

#[test]
fn test_click_fires_once() {
    let (mut window, button) = setup();
    let (count, seen) = counter();
    window.tree_mut().set_on_pressed(button, move |_, _| seen.set(seen.get() + 1));

    assert!(window.mouse_pressed(Point::new(20.0, 20.0), MouseButton::Left));
    assert_eq!(window.pressed(), Some(button));
    assert!(window.mouse_released(Point::new(22.0, 21.0), MouseButton::Left));
    assert_eq!(window.pressed(), None);
    assert_eq!(count.get(), 1);
}

#[test]
fn test_release_outside_cancels() {
    let (mut window, button) = setup();
    let (count, seen) = counter();
    window.tree_mut().set_on_pressed(button, move |_, _| seen.set(seen.get() + 1));

    window.mouse_pressed(Point::new(20.0, 20.0), MouseButton::Left);
    // Motion is captured by the pressed button even off its bounds.
    assert!(window.mouse_moved(Point::new(250.0, 150.0)));
    window.mouse_released(Point::new(250.0, 150.0), MouseButton::Left);
    assert_eq!(count.get(), 0);
    assert_eq!(window.pressed(), None);
}

#[test]
fn test_other_buttons_ignored() {
    let (mut window, button) = setup();
    let (count, seen) = counter();
    window.tree_mut().set_on_pressed(button, move |_, _| seen.set(seen.get() + 1));

    assert!(!window.mouse_pressed(Point::new(20.0, 20.0), MouseButton::Right));
    assert_eq!(window.pressed(), None);
    assert!(!window.mouse_released(Point::new(20.0, 20.0), MouseButton::Right));
    assert_eq!(count.get(), 0);
}

#[test]
fn test_checkbox_click_toggles() {
    let (mut window, _) = setup();
    let root = window.root();
    let check = window.tree_mut().add_checkbox(root, "On").unwrap();
    window.tree_mut().set_position(check, Point::new(10.0, 60.0));
    let (count, seen) = counter();
    window.tree_mut().set_on_toggled(check, move |_, _| seen.set(seen.get() + 1));
    window.frame();

    window.mouse_pressed(Point::new(15.0, 65.0), MouseButton::Left);
    window.mouse_released(Point::new(15.0, 65.0), MouseButton::Left);
    assert!(window.tree().is_checked(check));
    assert_eq!(count.get(), 1);

    window.tree_mut().set_checked(check, false);
    assert_eq!(count.get(), 1);
}

#[test]
fn test_handler_destroys_its_control() {
    let (mut window, button) = setup();
    window.tree_mut().set_on_pressed(button, |tree, id| {
        tree.destroy(id).unwrap();
    });

    window.mouse_moved(Point::new(20.0, 20.0));
    window.mouse_pressed(Point::new(20.0, 20.0), MouseButton::Left);
    window.mouse_released(Point::new(20.0, 20.0), MouseButton::Left);
    assert!(!window.tree().contains_control(button));

    let stats = window.frame();
    assert!(!stats.is_idle());
    assert_eq!(window.hovered(), None);
    assert!(window.draw_list().is_empty());
    assert!(!window.mouse_moved(Point::new(20.0, 20.0)));
}

#[test]
fn test_detached_hover_target_is_dropped() {
    let (mut window, button) = setup();
    window.mouse_moved(Point::new(20.0, 20.0));
    let root = window.root();
    window.tree_mut().remove_control(root, button);
    window.frame();
    assert_eq!(window.hovered(), None);
}

#[test]
fn test_reattached_button_is_not_stuck_hovered() {
    let (mut window, button) = setup();
    window.mouse_moved(Point::new(20.0, 20.0));
    assert!(is_hovered(&window, button));

    let root = window.root();
    window.tree_mut().remove_control(root, button);
    window.frame();
    assert!(!is_hovered(&window, button));

    window.tree_mut().insert_control(root, button, None).unwrap();
    window.mouse_moved(Point::new(250.0, 150.0));
    assert_eq!(window.hovered(), None);
    assert!(!is_hovered(&window, button));
}

#[test]
fn test_render_replays_frame() {
    let (mut window, _) = setup();
    let mut renderer = RecordingRenderer::default();
    let stats = window.render(&mut renderer).unwrap();

    let background = window.tree().property(window.root(), ThemeProperty::Background).to_color();
    assert_eq!(renderer.frames(), 1);
    assert_eq!(renderer.clear_color(), background);
    assert_eq!(renderer.viewport(), Size::new(300.0, 200.0));
    assert!(!renderer.commands().is_empty());
    assert_eq!(renderer.commands(), window.draw_list().commands());
    assert_eq!(stats.draw_calls as usize, renderer.commands().len());

    // Nothing changed: the previous draw list is replayed.
    window.render(&mut renderer).unwrap();
    assert_eq!(renderer.frames(), 2);
    assert_eq!(renderer.commands(), window.draw_list().commands());
}

#[test]
fn test_application_document() {
    let source = r#"{
        "FontSize": 8,
        "Windows": {
            "Main": {"Title": "Main", "Width": 640, "Height": 480,
                     "Body": {"Controls": [{"Type": "Text", "ID": "Hi", "Text": "Hi"}]}},
            "About": {"Title": "About"}
        }
    }"#;
    let windows = load_application(source, TrellisConfig::default()).unwrap();
    let names: Vec<&str> = windows.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["About", "Main"]);

    let main = &windows["Main"];
    assert_eq!(main.title(), "Main");
    assert_eq!(main.size(), Size::new(640.0, 480.0));
    let hi = main.controls().get("Hi").unwrap();
    assert_eq!(main.tree().size(hi), Size::new(8.0, 10.0));
}
