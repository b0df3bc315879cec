//! Layer tree - delivering engine messages through the bridge task.
//!
//! This example demonstrates:
//! - Spawning the delivery task with `BridgeBuilder::spawn`
//! - Sending JSON and MsgPack bodies from several tasks
//! - Registering a handler after the task has started
//!
//! # Running
//!
//! ```text
//! RUST_LOG=response_bridge=debug cargo run --example layer_tree
//! ```

use bytes::Bytes;
use response_bridge::codec::{MsgPackCodec, Payload};
use response_bridge::protocol::{CollapseFolder, ExpandFolder, LayerPanelEntry};
use response_bridge::BridgeBuilder;
use serde_json::json;
use tracing_subscriber::EnvFilter;

fn print_entry(entry: &LayerPanelEntry) {
    let marker = if entry.layer_type.is_folder() {
        if entry.layer_data.expanded {
            "v"
        } else {
            ">"
        }
    } else {
        "-"
    };
    let depth = entry.path.len().saturating_sub(1);

    println!(
        "{:indent$}{marker} {} [{}]{}",
        "",
        entry.name,
        entry.layer_type.as_str(),
        if entry.visible { "" } else { " (hidden)" },
        indent = depth * 2
    );
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let (handle, task) = BridgeBuilder::new()
        .handle(|expand: ExpandFolder| {
            println!("expanded {:?}", expand.path.as_slice());
            for entry in &expand.children {
                print_entry(entry);
            }
        })
        .channel_capacity(64)
        .spawn();

    handle
        .on(|collapse: CollapseFolder| println!("collapsed {:?}", collapse.path.as_slice()))
        .await?;

    let expand = json!({
        "ExpandFolder": {
            "path": [7],
            "children": [
                {
                    "name": "Sky",
                    "visible": true,
                    "layer_type": "Rect",
                    "path": [7, 1],
                    "layer_data": { "expanded": false, "selected": false }
                },
                {
                    "name": "Trees",
                    "visible": false,
                    "layer_type": "Folder",
                    "path": [7, 2],
                    "layer_data": { "expanded": true, "selected": true }
                }
            ]
        }
    });
    handle
        .notify("ExpandFolder", Payload::Json(Bytes::from(serde_json::to_vec(&expand)?)))
        .await?;

    let collapse = MsgPackCodec::encode(&json!({ "CollapseFolder": { "path": [7] } }))?;
    let sender = handle.clone();
    tokio::spawn(async move {
        sender
            .notify("CollapseFolder", Payload::MsgPack(Bytes::from(collapse)))
            .await
    })
    .await??;

    drop(handle);
    let registry = task.await?;
    println!("{} handlers registered", registry.len());

    Ok(())
}
