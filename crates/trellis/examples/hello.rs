//! Headless walkthrough: load a window document, drive a few frames and
//! mouse events, and print what a renderer would have drawn.
//!
//! ```sh
//! RUST_LOG=trellis=debug cargo run -p trellis --example hello
//! ```

use trellis::render::{Point, RecordingRenderer};
use trellis::{ControlType, MouseButton, TrellisConfig, Window};
use tracing_subscriber::EnvFilter;

const DOCUMENT: &str = r#"{
    "Title": "Hello",
    "Width": 320,
    "Height": 200,
    "Body": {
        "Controls": [
            {
                "Type": "VerticalContainer",
                "Expand": "Both",
                "Spacing": 6,
                "Controls": [
                    {"Type": "Text", "ID": "Greeting", "Text": "Hello, world"},
                    {"Type": "Checkbox", "ID": "Loud", "Text": "Shout"},
                    {"Type": "Separator"},
                    {"Type": "Button", "ID": "Ok", "Text": "OK", "Expand": "Width"},
                    {"Type": "Tree", "ID": "Files", "Text": "src",
                     "Items": [{"Text": "lib.rs"}, {"Text": "window.rs"}]}
                ]
            }
        ]
    }
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trellis=info")))
        .init();

    let mut window = Window::from_json_str(DOCUMENT, TrellisConfig::default())?;
    let controls = window.controls().clone();

    if let (Some(ok), Some(greeting)) = (
        controls.get_typed(window.tree(), "Ok", ControlType::Button),
        controls.get("Greeting"),
    ) {
        let loud = controls.get("Loud");
        window.tree_mut().set_on_pressed(ok, move |tree, _| {
            let shout = loud.is_some_and(|id| tree.is_checked(id));
            tree.set_text(greeting, if shout { "HELLO!" } else { "Hello again" });
        });
    }

    let stats = window.frame();
    println!("first frame: {} containers placed in {} pass(es)", stats.containers_placed, stats.passes);

    // Tick the checkbox, then click the button.
    for id in [controls.get("Loud"), controls.get("Ok")].into_iter().flatten() {
        let bounds = window.tree().absolute_bounds(id);
        let center = Point::new(bounds.left() + 4.0, bounds.top() + bounds.height() * 0.5);
        window.mouse_moved(center);
        window.mouse_pressed(center, MouseButton::Left);
        window.mouse_released(center, MouseButton::Left);
    }

    let mut renderer = RecordingRenderer::default();
    let frame = window.render(&mut renderer)?;
    println!("{} draw calls", frame.draw_calls);
    for command in renderer.commands() {
        println!("  {command:?}");
    }
    println!("{}", window.tree().dump(window.root()));
    Ok(())
}
