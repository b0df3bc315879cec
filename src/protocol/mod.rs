//! Protocol module - response tags, typed records, and nested entities.
//!
//! - [`ResponseType`] - closed enumeration of tags the engine emits
//! - [`Response`] - sum of the typed records, one per tag
//! - [`Path`], [`Color`], [`LayerPanelEntry`] - entities nested in records
//!
//! Raw payloads are [`RawPayload`] trees; see [`crate::decode`] for the
//! conversion into [`Response`].

mod response;
mod tag;
mod types;

pub use response::{
    CloseDocument, CollapseFolder, DocumentChanged, ExpandFolder, ExportDocument, NewDocument,
    PromptCloseConfirmationModal, Response, ResponseVariant, SetActiveDocument, SetActiveTool,
    SetCanvasZoom, SetRotation, UpdateCanvas, UpdateWorkingColors,
};
pub use tag::ResponseType;
pub use types::{Color, LayerData, LayerPanelEntry, LayerType, Path};

/// Untyped payload as delivered by the transport.
pub type RawPayload = serde_json::Value;
