//! Per-variant creation payload construction.
//!
//! The remote service is strict about where each variant keeps its
//! discriminant. In particular:
//!
//! - a shape's kind lives at `data.shape`, never at `data.type` — sending the
//!   wrong slot is rejected upstream;
//! - frame creation requires `data.type = "freeform"` and
//!   `data.format = "custom"`;
//! - a sticky note's colour lives at `style.fillColor`.
//!
//! Builders here take concrete values; the dispatcher applies documented
//! defaults before calling them.

use serde_json::{json, Map, Value};

/// Default sticky note fill colour.
pub const DEFAULT_STICKY_COLOR: &str = "yellow";
/// Default shape kind.
pub const DEFAULT_SHAPE: &str = "rectangle";
/// Default item position.
pub const DEFAULT_POSITION: (f64, f64) = (0.0, 0.0);
/// Default shape geometry (width, height).
pub const DEFAULT_SHAPE_GEOMETRY: (f64, f64) = (200.0, 200.0);
/// Default shape rotation in degrees.
pub const DEFAULT_ROTATION: f64 = 0.0;
/// Default frame geometry (width, height).
pub const DEFAULT_FRAME_GEOMETRY: (f64, f64) = (800.0, 600.0);
/// Default card geometry (width, height).
pub const DEFAULT_CARD_GEOMETRY: (f64, f64) = (320.0, 176.0);
/// Default connector line shape.
pub const DEFAULT_CONNECTOR_SHAPE: &str = "curved";

/// Builds a `position` sub-object.
#[must_use]
pub fn position(x: f64, y: f64) -> Value {
    json!({ "x": x, "y": y })
}

/// Builds a sticky note creation payload.
#[must_use]
pub fn sticky_note(content: &str, color: &str, x: f64, y: f64, parent_id: Option<&str>) -> Value {
    let mut payload = json!({
        "data": { "content": content },
        "style": { "fillColor": color },
        "position": position(x, y),
    });
    if let Some(parent) = parent_id {
        payload["parent"] = json!({ "id": parent });
    }
    payload
}

/// Builds a shape creation payload.
///
/// The shape discriminant goes to `data.shape`; `content` is included only
/// when present so the service does not receive an explicit null.
#[must_use]
#[allow(clippy::too_many_arguments)] // mirrors the flat tool argument list
pub fn shape(
    shape: &str,
    content: Option<&str>,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    rotation: f64,
    fill_color: Option<&str>,
) -> Value {
    let mut data = Map::new();
    data.insert("shape".to_string(), json!(shape));
    if let Some(text) = content {
        data.insert("content".to_string(), json!(text));
    }

    let mut payload = json!({
        "data": Value::Object(data),
        "position": position(x, y),
        "geometry": { "width": width, "height": height, "rotation": rotation },
    });
    if let Some(color) = fill_color {
        payload["style"] = json!({ "fillColor": color });
    }
    payload
}

/// Builds a connector creation payload between two items.
#[must_use]
pub fn connector(
    start_item_id: &str,
    end_item_id: &str,
    line_shape: &str,
    caption: Option<&str>,
) -> Value {
    let mut payload = json!({
        "startItem": { "id": start_item_id },
        "endItem": { "id": end_item_id },
        "shape": line_shape,
    });
    if let Some(text) = caption {
        payload["captions"] = json!([{ "content": text }]);
    }
    payload
}

/// Builds a frame creation payload.
///
/// `data.type` and `data.format` are fixed by the service contract.
#[must_use]
pub fn frame(title: Option<&str>, x: f64, y: f64, width: f64, height: f64) -> Value {
    let mut data = Map::new();
    data.insert("type".to_string(), json!("freeform"));
    data.insert("format".to_string(), json!("custom"));
    if let Some(title) = title {
        data.insert("title".to_string(), json!(title));
    }

    json!({
        "data": Value::Object(data),
        "position": position(x, y),
        "geometry": { "width": width, "height": height },
    })
}

/// Builds a text element creation payload.
#[must_use]
pub fn text(content: &str, x: f64, y: f64, width: Option<f64>, font_size: Option<f64>) -> Value {
    let mut payload = json!({
        "data": { "content": content },
        "position": position(x, y),
    });
    if let Some(width) = width {
        payload["geometry"] = json!({ "width": width });
    }
    if let Some(size) = font_size {
        payload["style"] = json!({ "fontSize": size });
    }
    payload
}

/// Builds a card creation payload.
#[must_use]
pub fn card(
    title: &str,
    description: Option<&str>,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
) -> Value {
    let mut data = Map::new();
    data.insert("title".to_string(), json!(title));
    if let Some(text) = description {
        data.insert("description".to_string(), json!(text));
    }

    json!({
        "data": Value::Object(data),
        "position": position(x, y),
        "geometry": { "width": width, "height": height },
    })
}
