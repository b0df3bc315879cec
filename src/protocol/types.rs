//! Entities nested inside responses: layer paths, colors, layer tree entries.

use std::ops::Deref;

use serde::{Deserialize, Serialize};

/// Location of a layer in the document's layer tree.
///
/// Each element identifies a child inside its parent folder, root first.
/// Elements are full 64-bit ids and may exceed 2^53.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Path(Vec<u64>);

impl Path {
    /// Create a path from its elements.
    pub fn new(elements: Vec<u64>) -> Self {
        Self(elements)
    }

    /// Elements of the path.
    #[inline]
    pub fn as_slice(&self) -> &[u64] {
        &self.0
    }

    /// Consume the path, returning its elements.
    pub fn into_inner(self) -> Vec<u64> {
        self.0
    }
}

impl Deref for Path {
    type Target = [u64];

    fn deref(&self) -> &[u64] {
        &self.0
    }
}

impl From<Vec<u64>> for Path {
    fn from(elements: Vec<u64>) -> Self {
        Self(elements)
    }
}

impl FromIterator<u64> for Path {
    fn from_iter<I: IntoIterator<Item = u64>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Working color as handed to the UI.
///
/// `red`, `green` and `blue` are in the 0-255 range; `alpha` stays in 0-1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

/// Kind of node in the layer tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayerType {
    Folder,
    Shape,
    Circle,
    Rect,
    Line,
    PolyLine,
    Ellipse,
}

impl LayerType {
    /// Every layer type, in declaration order.
    pub const ALL: [LayerType; 7] = [
        LayerType::Folder,
        LayerType::Shape,
        LayerType::Circle,
        LayerType::Rect,
        LayerType::Line,
        LayerType::PolyLine,
        LayerType::Ellipse,
    ];

    /// Name as sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            LayerType::Folder => "Folder",
            LayerType::Shape => "Shape",
            LayerType::Circle => "Circle",
            LayerType::Rect => "Rect",
            LayerType::Line => "Line",
            LayerType::PolyLine => "PolyLine",
            LayerType::Ellipse => "Ellipse",
        }
    }

    /// Look up a layer type by its wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        LayerType::ALL.iter().copied().find(|t| t.as_str() == name)
    }

    /// Whether entries of this type can hold children.
    #[inline]
    pub fn is_folder(&self) -> bool {
        matches!(self, LayerType::Folder)
    }
}

/// Per-node UI state in the layer panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerData {
    pub expanded: bool,
    pub selected: bool,
}

/// One row of the layer panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerPanelEntry {
    pub name: String,
    pub visible: bool,
    pub layer_type: LayerType,
    pub path: Path,
    pub layer_data: LayerData,
}
