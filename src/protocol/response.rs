//! Typed response records and the [`Response`] sum type.
//!
//! Every [`ResponseType`] has exactly one record here. Records implement
//! [`ResponseVariant`] so handlers can be registered for a record type
//! instead of matching on [`Response`] themselves.

use serde::{Deserialize, Serialize};

use super::tag::ResponseType;
use super::types::{Color, LayerPanelEntry, Path};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateCanvas {
    /// Rendered SVG document.
    pub document: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportDocument {
    /// Exported SVG document.
    pub document: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpandFolder {
    /// Folder that was expanded.
    pub path: Path,
    /// Newly revealed children, in panel order.
    pub children: Vec<LayerPanelEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollapseFolder {
    pub path: Path,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetActiveTool {
    pub tool_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetActiveDocument {
    pub document_index: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDocument {
    pub document_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloseDocument {
    pub document_index: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UpdateWorkingColors {
    pub primary: Color,
    pub secondary: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SetCanvasZoom {
    pub new_zoom: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SetRotation {
    pub new_radians: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentChanged;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptCloseConfirmationModal;

/// A decoded response: one case per [`ResponseType`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Response {
    UpdateCanvas(UpdateCanvas),
    ExportDocument(ExportDocument),
    ExpandFolder(ExpandFolder),
    CollapseFolder(CollapseFolder),
    SetActiveTool(SetActiveTool),
    SetActiveDocument(SetActiveDocument),
    NewDocument(NewDocument),
    CloseDocument(CloseDocument),
    UpdateWorkingColors(UpdateWorkingColors),
    SetCanvasZoom(SetCanvasZoom),
    SetRotation(SetRotation),
    DocumentChanged(DocumentChanged),
    PromptCloseConfirmationModal(PromptCloseConfirmationModal),
}

impl Response {
    /// Tag this response was decoded from.
    pub fn response_type(&self) -> ResponseType {
        match self {
            Response::UpdateCanvas(_) => ResponseType::UpdateCanvas,
            Response::ExportDocument(_) => ResponseType::ExportDocument,
            Response::ExpandFolder(_) => ResponseType::ExpandFolder,
            Response::CollapseFolder(_) => ResponseType::CollapseFolder,
            Response::SetActiveTool(_) => ResponseType::SetActiveTool,
            Response::SetActiveDocument(_) => ResponseType::SetActiveDocument,
            Response::NewDocument(_) => ResponseType::NewDocument,
            Response::CloseDocument(_) => ResponseType::CloseDocument,
            Response::UpdateWorkingColors(_) => ResponseType::UpdateWorkingColors,
            Response::SetCanvasZoom(_) => ResponseType::SetCanvasZoom,
            Response::SetRotation(_) => ResponseType::SetRotation,
            Response::DocumentChanged(_) => ResponseType::DocumentChanged,
            Response::PromptCloseConfirmationModal(_) => {
                ResponseType::PromptCloseConfirmationModal
            }
        }
    }
}

/// A record that is one case of [`Response`].
pub trait ResponseVariant: Sized + Send + 'static {
    /// Tag the record is decoded from.
    const TYPE: ResponseType;

    /// Extract the record, or `None` if `response` holds another case.
    fn from_response(response: Response) -> Option<Self>;
}

macro_rules! response_variants {
    ($($variant:ident),* $(,)?) => {
        $(
            impl ResponseVariant for $variant {
                const TYPE: ResponseType = ResponseType::$variant;

                fn from_response(response: Response) -> Option<Self> {
                    match response {
                        Response::$variant(inner) => Some(inner),
                        _ => None,
                    }
                }
            }

            impl From<$variant> for Response {
                fn from(inner: $variant) -> Self {
                    Response::$variant(inner)
                }
            }
        )*
    };
}

response_variants!(
    UpdateCanvas,
    ExportDocument,
    ExpandFolder,
    CollapseFolder,
    SetActiveTool,
    SetActiveDocument,
    NewDocument,
    CloseDocument,
    UpdateWorkingColors,
    SetCanvasZoom,
    SetRotation,
    DocumentChanged,
    PromptCloseConfirmationModal,
);
