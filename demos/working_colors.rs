//! Working colors - decoding and dispatching on the calling thread.
//!
//! This example demonstrates:
//! - Registering typed handlers with `BridgeBuilder::handle`
//! - Feeding engine messages straight into the registry
//! - Diagnostics for unhandled and malformed messages via `tracing`
//!
//! # Running
//!
//! ```text
//! RUST_LOG=debug cargo run --example working_colors
//! ```

use response_bridge::protocol::{Color, SetActiveTool, UpdateWorkingColors};
use response_bridge::{BridgeBuilder, Dispatch};
use serde_json::json;
use tracing_subscriber::EnvFilter;

fn swatch(color: &Color) -> String {
    format!(
        "rgba({:.0}, {:.0}, {:.0}, {:.2})",
        color.red, color.green, color.blue, color.alpha
    )
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let registry = BridgeBuilder::new()
        .handle(|colors: UpdateWorkingColors| {
            println!("primary:   {}", swatch(&colors.primary));
            println!("secondary: {}", swatch(&colors.secondary));
        })
        .handle(|tool: SetActiveTool| println!("active tool: {}", tool.tool_name))
        .build();

    let messages = [
        (
            "UpdateWorkingColors",
            json!({
                "UpdateWorkingColors": {
                    "primary": { "red": 1.0, "green": 0.5, "blue": 0.0, "alpha": 0.8 },
                    "secondary": { "red": 0.0, "green": 0.0, "blue": 0.0, "alpha": 1.0 }
                }
            }),
        ),
        ("SetActiveTool", json!({ "SetActiveTool": { "tool_name": "Eyedropper" } })),
        // No handler registered
        ("SetCanvasZoom", json!({ "SetCanvasZoom": { "new_zoom": 2.0 } })),
        // Missing a required nested entity
        ("UpdateWorkingColors", json!({ "UpdateWorkingColors": {} })),
    ];

    for (tag, payload) in &messages {
        match registry.dispatch(tag, payload) {
            Dispatch::Handled(_) => {}
            Dispatch::Unhandled(response_type) => println!("(ignored {response_type})"),
            Dispatch::Rejected(error) => println!("(rejected {tag}: {error})"),
        }
    }
}
