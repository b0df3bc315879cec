//! Converters for entities nested inside responses.
//!
//! Each converter is total over well-formed input and reports the first
//! malformed field it meets.

use serde_json::Value;

use super::fields::{invalid_type, Fields};
use crate::error::{DecodeError, Result};
use crate::protocol::{Color, LayerData, LayerPanelEntry, LayerType, Path};

/// Channels arrive normalized to 0-1 and are handed out in 0-255.
pub const CHANNEL_SCALE: f64 = 255.0;

/// Largest integer a double represents exactly (2^53 - 1).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Scale the color channels to 0-255. Alpha is left in 0-1.
pub(crate) fn color(fields: &Fields<'_>) -> Result<Color> {
    Ok(Color {
        red: fields.f64("red")? * CHANNEL_SCALE,
        green: fields.f64("green")? * CHANNEL_SCALE,
        blue: fields.f64("blue")? * CHANNEL_SCALE,
        alpha: fields.f64("alpha")?,
    })
}

pub(crate) fn layer_data(fields: &Fields<'_>) -> Result<LayerData> {
    Ok(LayerData {
        expanded: fields.boolean("expanded")?,
        selected: fields.boolean("selected")?,
    })
}

pub(crate) fn layer_type(fields: &Fields<'_>, key: &str) -> Result<LayerType> {
    match fields.required(key)? {
        Value::String(name) => {
            LayerType::from_name(name).ok_or_else(|| DecodeError::InvalidVariant {
                field: key.to_string(),
                enumeration: "LayerType",
                value: name.clone(),
            })
        }
        other => Err(invalid_type(key, "string", other)),
    }
}

pub(crate) fn layer_panel_entry(fields: &Fields<'_>) -> Result<LayerPanelEntry> {
    Ok(LayerPanelEntry {
        name: fields.string("name")?,
        visible: fields.boolean("visible")?,
        layer_type: layer_type(fields, "layer_type")?,
        path: path(fields, "path")?,
        layer_data: fields.nested("layer_data", layer_data)?,
    })
}

/// Decode the array at `key` as a sequence of entries, keeping source order.
pub(crate) fn layer_panel_entries(
    fields: &Fields<'_>,
    key: &str,
) -> Result<Vec<LayerPanelEntry>> {
    fields
        .array(key)?
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let location = format!("{key}[{index}]");
            let entry = Fields::of(item, &location)?;
            layer_panel_entry(&entry).map_err(|e| e.within(&location))
        })
        .collect()
}

/// Widen the array at `key` element by element into a [`Path`].
pub(crate) fn path(fields: &Fields<'_>, key: &str) -> Result<Path> {
    fields
        .array(key)?
        .iter()
        .enumerate()
        .map(|(index, element)| {
            widen(element).ok_or_else(|| DecodeError::InvalidPathElement {
                field: key.to_string(),
                index,
                value: element.to_string(),
            })
        })
        .collect()
}

/// Widen one path element to `u64`.
///
/// Integers are taken as-is. Integral doubles are accepted up to 2^53,
/// beyond which they may already have lost precision. Decimal strings carry
/// the full 64-bit range.
fn widen(element: &Value) -> Option<u64> {
    match element {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= MAX_SAFE_INTEGER)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}
