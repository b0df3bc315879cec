//! Decoder - raw payloads to typed [`Response`]s.
//!
//! [`decode`] switches on the tag and applies that tag's converter to the
//! payload body. Converters for nested entities (colors, layer entries,
//! paths) live in their own module and are shared between tags.
//!
//! # Envelope
//!
//! The engine serializes responses as an externally tagged enum, so a
//! payload usually looks like `{ "SetActiveTool": { "tool_name": "Select" } }`.
//! When the payload holds the tag's own key, the value under it is the body.
//! Otherwise the payload itself is the body.
//!
//! # Example
//!
//! ```
//! use response_bridge::decode::decode;
//! use response_bridge::protocol::{Response, SetCanvasZoom};
//! use serde_json::json;
//!
//! let payload = json!({ "SetCanvasZoom": { "new_zoom": 1.5 } });
//! let response = decode("SetCanvasZoom", &payload).unwrap();
//! assert_eq!(response, Response::SetCanvasZoom(SetCanvasZoom { new_zoom: 1.5 }));
//! ```

mod entities;
mod fields;

pub use entities::CHANNEL_SCALE;

use fields::Fields;

use crate::error::Result;
use crate::protocol::{
    CloseDocument, CollapseFolder, DocumentChanged, ExpandFolder, ExportDocument, NewDocument,
    PromptCloseConfirmationModal, RawPayload, Response, ResponseType, SetActiveDocument,
    SetActiveTool, SetCanvasZoom, SetRotation, UpdateCanvas, UpdateWorkingColors,
};

/// Decode the payload of a message tagged `tag`.
///
/// # Errors
///
/// Returns [`DecodeError::UnknownTag`](crate::error::DecodeError::UnknownTag)
/// for tags outside [`ResponseType`], and a field error when the body cannot
/// be built into the tag's record.
pub fn decode(tag: &str, payload: &RawPayload) -> Result<Response> {
    let response_type: ResponseType = tag.parse()?;
    decode_typed(response_type, payload)
}

/// Decode a payload whose tag is already known.
pub fn decode_typed(response_type: ResponseType, payload: &RawPayload) -> Result<Response> {
    let body = || Fields::of(unwrap_envelope(response_type, payload), response_type.as_str());

    let response = match response_type {
        ResponseType::UpdateCanvas => Response::UpdateCanvas(update_canvas(&body()?)?),
        ResponseType::ExportDocument => Response::ExportDocument(export_document(&body()?)?),
        ResponseType::ExpandFolder => Response::ExpandFolder(expand_folder(&body()?)?),
        ResponseType::CollapseFolder => Response::CollapseFolder(collapse_folder(&body()?)?),
        ResponseType::SetActiveTool => Response::SetActiveTool(set_active_tool(&body()?)?),
        ResponseType::SetActiveDocument => {
            Response::SetActiveDocument(set_active_document(&body()?)?)
        }
        ResponseType::NewDocument => Response::NewDocument(new_document(&body()?)?),
        ResponseType::CloseDocument => Response::CloseDocument(close_document(&body()?)?),
        ResponseType::UpdateWorkingColors => {
            Response::UpdateWorkingColors(update_working_colors(&body()?)?)
        }
        ResponseType::SetCanvasZoom => Response::SetCanvasZoom(set_canvas_zoom(&body()?)?),
        ResponseType::SetRotation => Response::SetRotation(set_rotation(&body()?)?),
        // Notification only; the payload carries nothing we read.
        ResponseType::DocumentChanged => Response::DocumentChanged(DocumentChanged),
        ResponseType::PromptCloseConfirmationModal => {
            Response::PromptCloseConfirmationModal(PromptCloseConfirmationModal)
        }
    };

    Ok(response)
}

fn unwrap_envelope(response_type: ResponseType, payload: &RawPayload) -> &RawPayload {
    payload
        .as_object()
        .and_then(|map| map.get(response_type.as_str()))
        .unwrap_or(payload)
}

fn update_canvas(body: &Fields<'_>) -> Result<UpdateCanvas> {
    Ok(UpdateCanvas {
        document: body.string("document")?,
    })
}

fn export_document(body: &Fields<'_>) -> Result<ExportDocument> {
    Ok(ExportDocument {
        document: body.string("document")?,
    })
}

fn expand_folder(body: &Fields<'_>) -> Result<ExpandFolder> {
    Ok(ExpandFolder {
        path: entities::path(body, "path")?,
        children: entities::layer_panel_entries(body, "children")?,
    })
}

fn collapse_folder(body: &Fields<'_>) -> Result<CollapseFolder> {
    Ok(CollapseFolder {
        path: entities::path(body, "path")?,
    })
}

fn set_active_tool(body: &Fields<'_>) -> Result<SetActiveTool> {
    Ok(SetActiveTool {
        tool_name: body.string("tool_name")?,
    })
}

fn set_active_document(body: &Fields<'_>) -> Result<SetActiveDocument> {
    Ok(SetActiveDocument {
        document_index: body.u64("document_index")?,
    })
}

fn new_document(body: &Fields<'_>) -> Result<NewDocument> {
    Ok(NewDocument {
        document_name: body.string("document_name")?,
    })
}

fn close_document(body: &Fields<'_>) -> Result<CloseDocument> {
    Ok(CloseDocument {
        document_index: body.u64("document_index")?,
    })
}

fn update_working_colors(body: &Fields<'_>) -> Result<UpdateWorkingColors> {
    Ok(UpdateWorkingColors {
        primary: body.nested("primary", entities::color)?,
        secondary: body.nested("secondary", entities::color)?,
    })
}

fn set_canvas_zoom(body: &Fields<'_>) -> Result<SetCanvasZoom> {
    Ok(SetCanvasZoom {
        new_zoom: body.f64("new_zoom")?,
    })
}

fn set_rotation(body: &Fields<'_>) -> Result<SetRotation> {
    Ok(SetRotation {
        new_radians: body.f64("new_radians")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeError;
    use crate::protocol::{Color, LayerData, LayerPanelEntry, LayerType, Path};
    use serde_json::{json, Value};

    fn entry(name: &str, layer_type: &str, path: Value) -> Value {
        json!({
            "name": name,
            "visible": true,
            "layer_type": layer_type,
            "path": path,
            "layer_data": { "expanded": false, "selected": true }
        })
    }

    #[test]
    fn test_unknown_tag() {
        let err = decode("SetZoom", &json!({})).unwrap_err();
        assert!(matches!(err, DecodeError::UnknownTag(tag) if tag == "SetZoom"));
    }

    #[test]
    fn test_string_records() {
        let canvas = decode("UpdateCanvas", &json!({ "UpdateCanvas": { "document": "<svg/>" } }));
        assert_eq!(
            canvas.unwrap(),
            Response::UpdateCanvas(UpdateCanvas {
                document: "<svg/>".to_string()
            })
        );

        let export = decode("ExportDocument", &json!({ "document": "<svg>x</svg>" }));
        assert_eq!(
            export.unwrap(),
            Response::ExportDocument(ExportDocument {
                document: "<svg>x</svg>".to_string()
            })
        );

        let tool = decode("SetActiveTool", &json!({ "tool_name": "Ellipse" }));
        assert_eq!(
            tool.unwrap(),
            Response::SetActiveTool(SetActiveTool {
                tool_name: "Ellipse".to_string()
            })
        );

        let document = decode("NewDocument", &json!({ "document_name": "Untitled 2" }));
        assert_eq!(
            document.unwrap(),
            Response::NewDocument(NewDocument {
                document_name: "Untitled 2".to_string()
            })
        );
    }

    #[test]
    fn test_document_index_records() {
        let active = decode("SetActiveDocument", &json!({ "document_index": 3 })).unwrap();
        assert_eq!(
            active,
            Response::SetActiveDocument(SetActiveDocument { document_index: 3 })
        );

        let closed = decode("CloseDocument", &json!({ "CloseDocument": { "document_index": 0 } }));
        assert_eq!(
            closed.unwrap(),
            Response::CloseDocument(CloseDocument { document_index: 0 })
        );
    }

    #[test]
    fn test_view_records() {
        let zoom = decode("SetCanvasZoom", &json!({ "new_zoom": 2.5 })).unwrap();
        assert_eq!(zoom, Response::SetCanvasZoom(SetCanvasZoom { new_zoom: 2.5 }));

        let rotation = decode("SetRotation", &json!({ "new_radians": -1.25 })).unwrap();
        assert_eq!(
            rotation,
            Response::SetRotation(SetRotation { new_radians: -1.25 })
        );
    }

    #[test]
    fn test_working_colors() {
        let payload = json!({
            "UpdateWorkingColors": {
                "primary": { "red": 1.0, "green": 0.5, "blue": 0.0, "alpha": 0.8 },
                "secondary": { "red": 0.0, "green": 0.0, "blue": 1.0, "alpha": 1.0 }
            }
        });

        let response = decode("UpdateWorkingColors", &payload).unwrap();
        assert_eq!(
            response,
            Response::UpdateWorkingColors(UpdateWorkingColors {
                primary: Color {
                    red: 255.0,
                    green: 127.5,
                    blue: 0.0,
                    alpha: 0.8
                },
                secondary: Color {
                    red: 0.0,
                    green: 0.0,
                    blue: 255.0,
                    alpha: 1.0
                },
            })
        );
    }

    #[test]
    fn test_working_colors_missing_secondary() {
        let payload = json!({ "primary": { "red": 1.0, "green": 1.0, "blue": 1.0, "alpha": 1.0 } });
        let err = decode("UpdateWorkingColors", &payload).unwrap_err();
        assert!(matches!(err, DecodeError::MissingField { field } if field == "secondary"));
    }

    #[test]
    fn test_expand_folder_preserves_order() {
        let payload = json!({
            "ExpandFolder": {
                "path": [1, 2, 3],
                "children": [
                    entry("Circle 1", "Circle", json!([1, 2, 3, 4])),
                    entry("Group", "Folder", json!([1, 2, 3, 5]))
                ]
            }
        });

        let response = decode("ExpandFolder", &payload).unwrap();
        let Response::ExpandFolder(expand) = response else {
            panic!("expected ExpandFolder");
        };

        assert_eq!(expand.path, Path::new(vec![1, 2, 3]));
        assert_eq!(expand.children.len(), 2);
        assert_eq!(
            expand.children[0],
            LayerPanelEntry {
                name: "Circle 1".to_string(),
                visible: true,
                layer_type: LayerType::Circle,
                path: Path::new(vec![1, 2, 3, 4]),
                layer_data: LayerData {
                    expanded: false,
                    selected: true
                },
            }
        );
        assert_eq!(expand.children[1].name, "Group");
        assert_eq!(expand.children[1].layer_type, LayerType::Folder);
    }

    #[test]
    fn test_expand_folder_invalid_layer_type() {
        let payload = json!({
            "path": [],
            "children": [entry("a", "Rect", json!([0])), entry("b", "Star", json!([1]))]
        });

        let err = decode("ExpandFolder", &payload).unwrap_err();
        assert!(matches!(
            &err,
            DecodeError::InvalidVariant { field, value, .. }
                if field == "children[1].layer_type" && value == "Star"
        ));
    }

    #[test]
    fn test_expand_folder_children_not_iterable() {
        let err = decode("ExpandFolder", &json!({ "path": [1], "children": {} })).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::InvalidType { expected: "array", found: "object", .. }
        ));
    }

    #[test]
    fn test_collapse_folder() {
        let payload = json!({ "CollapseFolder": { "path": [4, "18446744073709551615"] } });
        let response = decode("CollapseFolder", &payload).unwrap();
        assert_eq!(
            response,
            Response::CollapseFolder(CollapseFolder {
                path: Path::new(vec![4, u64::MAX])
            })
        );
    }

    #[test]
    fn test_collapse_folder_missing_path() {
        let err = decode("CollapseFolder", &json!({})).unwrap_err();
        assert!(matches!(err, DecodeError::MissingField { field } if field == "path"));
    }

    #[test]
    fn test_empty_records_ignore_payload() {
        for payload in [Value::Null, json!({}), json!([1, 2]), json!("anything")] {
            assert_eq!(
                decode("PromptCloseConfirmationModal", &payload).unwrap(),
                Response::PromptCloseConfirmationModal(PromptCloseConfirmationModal)
            );
            assert_eq!(
                decode("DocumentChanged", &payload).unwrap(),
                Response::DocumentChanged(DocumentChanged)
            );
        }
    }

    #[test]
    fn test_missing_scalars_default() {
        let response = decode("SetActiveTool", &json!({})).unwrap();
        assert_eq!(
            response,
            Response::SetActiveTool(SetActiveTool {
                tool_name: String::new()
            })
        );
    }

    #[test]
    fn test_non_object_body() {
        let err = decode("SetCanvasZoom", &Value::Null).unwrap_err();
        assert!(matches!(err, DecodeError::MissingField { field } if field == "SetCanvasZoom"));

        let err = decode("SetCanvasZoom", &json!({ "SetCanvasZoom": 2.0 })).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidType { expected: "object", found: "number", .. }));
    }

    #[test]
    fn test_envelope_and_bare_body_agree() {
        let bare = json!({ "new_radians": 0.5 });
        let wrapped = json!({ "SetRotation": { "new_radians": 0.5 } });
        assert_eq!(
            decode("SetRotation", &bare).unwrap(),
            decode("SetRotation", &wrapped).unwrap()
        );
    }

    #[test]
    fn test_every_tag_decodes() {
        let payloads = json!({
            "UpdateCanvas": { "document": "" },
            "ExportDocument": { "document": "" },
            "ExpandFolder": { "path": [], "children": [] },
            "CollapseFolder": { "path": [] },
            "SetActiveTool": { "tool_name": "Select" },
            "SetActiveDocument": { "document_index": 1 },
            "NewDocument": { "document_name": "d" },
            "CloseDocument": { "document_index": 1 },
            "UpdateWorkingColors": {
                "primary": { "red": 0, "green": 0, "blue": 0, "alpha": 1 },
                "secondary": { "red": 1, "green": 1, "blue": 1, "alpha": 1 }
            },
            "SetCanvasZoom": { "new_zoom": 1 },
            "SetRotation": { "new_radians": 0 },
            "DocumentChanged": null,
            "PromptCloseConfirmationModal": null
        });

        for response_type in ResponseType::ALL {
            let response = decode_typed(response_type, &payloads[response_type.as_str()]).unwrap();
            assert_eq!(response.response_type(), response_type);
        }
    }
}
