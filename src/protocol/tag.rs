//! Closed enumeration of response tags emitted by the engine.
//!
//! String forms must match the engine's tags one-for-one.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DecodeError;

/// Tag identifying one response shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResponseType {
    /// Canvas contents were re-rendered.
    UpdateCanvas,
    /// Document was exported and is ready to be saved.
    ExportDocument,
    /// Folder in the layer tree was expanded.
    ExpandFolder,
    /// Folder in the layer tree was collapsed.
    CollapseFolder,
    /// Active tool changed.
    SetActiveTool,
    /// Active document changed.
    SetActiveDocument,
    /// Document was created.
    NewDocument,
    /// Document was closed.
    CloseDocument,
    /// Primary/secondary working colors changed.
    UpdateWorkingColors,
    /// Canvas zoom changed.
    SetCanvasZoom,
    /// Canvas rotation changed.
    SetRotation,
    /// Document contents changed.
    DocumentChanged,
    /// Engine asks the user to confirm closing a document.
    PromptCloseConfirmationModal,
}

impl ResponseType {
    /// Every tag, in declaration order.
    pub const ALL: [ResponseType; 13] = [
        ResponseType::UpdateCanvas,
        ResponseType::ExportDocument,
        ResponseType::ExpandFolder,
        ResponseType::CollapseFolder,
        ResponseType::SetActiveTool,
        ResponseType::SetActiveDocument,
        ResponseType::NewDocument,
        ResponseType::CloseDocument,
        ResponseType::UpdateWorkingColors,
        ResponseType::SetCanvasZoom,
        ResponseType::SetRotation,
        ResponseType::DocumentChanged,
        ResponseType::PromptCloseConfirmationModal,
    ];

    /// Tag as sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseType::UpdateCanvas => "UpdateCanvas",
            ResponseType::ExportDocument => "ExportDocument",
            ResponseType::ExpandFolder => "ExpandFolder",
            ResponseType::CollapseFolder => "CollapseFolder",
            ResponseType::SetActiveTool => "SetActiveTool",
            ResponseType::SetActiveDocument => "SetActiveDocument",
            ResponseType::NewDocument => "NewDocument",
            ResponseType::CloseDocument => "CloseDocument",
            ResponseType::UpdateWorkingColors => "UpdateWorkingColors",
            ResponseType::SetCanvasZoom => "SetCanvasZoom",
            ResponseType::SetRotation => "SetRotation",
            ResponseType::DocumentChanged => "DocumentChanged",
            ResponseType::PromptCloseConfirmationModal => "PromptCloseConfirmationModal",
        }
    }
}

impl FromStr for ResponseType {
    type Err = DecodeError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        ResponseType::ALL
            .iter()
            .copied()
            .find(|response_type| response_type.as_str() == tag)
            .ok_or_else(|| DecodeError::UnknownTag(tag.to_string()))
    }
}

impl fmt::Display for ResponseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
