//! Per-tool invocation handlers.
//!
//! Each handler validates its arguments, applies documented defaults, shapes
//! the variant-correct payload, and performs exactly one remote operation.
//! Validation happens strictly before the network call.

use serde_json::{Map, Value};

use crate::board::{payload, ItemKind};
use crate::client::{BoardApi, ItemFilter};
use crate::error::Error;

use super::ToolCallResult;

/// Extracts a required string argument.
pub(super) fn require_str<'a>(args: &'a Value, field: &str) -> Result<&'a str, Error> {
    args.get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| Error::validation(format!("missing required parameter: {field}")))
}

/// Extracts an optional string argument.
fn opt_str<'a>(args: &'a Value, field: &str) -> Option<&'a str> {
    args.get(field).and_then(Value::as_str)
}

/// Extracts an optional number argument.
fn opt_f64(args: &Value, field: &str) -> Option<f64> {
    args.get(field).and_then(Value::as_f64)
}

/// Extracts a number argument, falling back to its documented default.
fn f64_or(args: &Value, field: &str, default: f64) -> f64 {
    opt_f64(args, field).unwrap_or(default)
}

/// Extracts an optional pagination limit.
fn opt_limit(args: &Value) -> Option<u64> {
    args.get("limit").and_then(Value::as_u64)
}

/// Parses an `item_type` argument against the known variants.
fn parse_kind(name: &str) -> Result<ItemKind, Error> {
    ItemKind::parse(name)
        .ok_or_else(|| Error::validation(format!("unknown item type: {name}")))
}

/// Short confirmation for an item-producing mutation.
fn created(kind: ItemKind, board_id: &str, response: &Value) -> ToolCallResult {
    let id = response.get("id").and_then(Value::as_str).unwrap_or("?");
    ToolCallResult::text(format!("Created {kind} {id} on board {board_id}"))
}

// === Reads ===

pub(super) async fn list_boards(api: &dyn BoardApi, args: &Value) -> Result<ToolCallResult, Error> {
    let boards = api.list_boards(opt_limit(args), opt_str(args, "cursor")).await?;
    Ok(ToolCallResult::json(&boards))
}

pub(super) async fn get_board(api: &dyn BoardApi, args: &Value) -> Result<ToolCallResult, Error> {
    let board_id = require_str(args, "board_id")?;
    let board = api.get_board(board_id).await?;
    Ok(ToolCallResult::json(&board))
}

pub(super) async fn list_items(api: &dyn BoardApi, args: &Value) -> Result<ToolCallResult, Error> {
    let board_id = require_str(args, "board_id")?;

    let item_type = match opt_str(args, "item_type") {
        Some(name) => Some(parse_kind(name)?.as_str().to_string()),
        None => None,
    };

    let filter = ItemFilter {
        item_type,
        parent_item_id: opt_str(args, "parent_item_id").map(String::from),
        limit: opt_limit(args),
        cursor: opt_str(args, "cursor").map(String::from),
    };

    let items = api.list_items(board_id, &filter).await?;
    Ok(ToolCallResult::json(&items))
}

pub(super) async fn get_item(api: &dyn BoardApi, args: &Value) -> Result<ToolCallResult, Error> {
    let board_id = require_str(args, "board_id")?;
    let item_id = require_str(args, "item_id")?;
    let item = api.get_item(board_id, item_id).await?;
    Ok(ToolCallResult::json(&item))
}

pub(super) async fn get_items_in_frame(
    api: &dyn BoardApi,
    args: &Value,
) -> Result<ToolCallResult, Error> {
    let board_id = require_str(args, "board_id")?;
    let frame_id = require_str(args, "frame_id")?;

    let filter = ItemFilter {
        parent_item_id: Some(frame_id.to_string()),
        limit: opt_limit(args),
        cursor: opt_str(args, "cursor").map(String::from),
        ..ItemFilter::default()
    };

    let items = api.list_items(board_id, &filter).await?;
    Ok(ToolCallResult::json(&items))
}

// === Creation ===

pub(super) async fn create_sticky_note(
    api: &dyn BoardApi,
    args: &Value,
) -> Result<ToolCallResult, Error> {
    let board_id = require_str(args, "board_id")?;
    let content = require_str(args, "content")?;
    let color = opt_str(args, "color").unwrap_or(payload::DEFAULT_STICKY_COLOR);
    let (dx, dy) = payload::DEFAULT_POSITION;
    let body = payload::sticky_note(
        content,
        color,
        f64_or(args, "x", dx),
        f64_or(args, "y", dy),
        opt_str(args, "parent_item_id"),
    );

    let response = api.create_item(board_id, ItemKind::StickyNote, body).await?;
    Ok(created(ItemKind::StickyNote, board_id, &response))
}

pub(super) async fn create_shape(
    api: &dyn BoardApi,
    args: &Value,
) -> Result<ToolCallResult, Error> {
    let board_id = require_str(args, "board_id")?;
    let shape = opt_str(args, "shape").unwrap_or(payload::DEFAULT_SHAPE);
    let (dx, dy) = payload::DEFAULT_POSITION;
    let (dw, dh) = payload::DEFAULT_SHAPE_GEOMETRY;
    let body = payload::shape(
        shape,
        opt_str(args, "content"),
        f64_or(args, "x", dx),
        f64_or(args, "y", dy),
        f64_or(args, "width", dw),
        f64_or(args, "height", dh),
        f64_or(args, "rotation", payload::DEFAULT_ROTATION),
        opt_str(args, "fill_color"),
    );

    let response = api.create_item(board_id, ItemKind::Shape, body).await?;
    Ok(created(ItemKind::Shape, board_id, &response))
}

pub(super) async fn create_connector(
    api: &dyn BoardApi,
    args: &Value,
) -> Result<ToolCallResult, Error> {
    let board_id = require_str(args, "board_id")?;
    let start_item_id = require_str(args, "start_item_id")?;
    let end_item_id = require_str(args, "end_item_id")?;
    let line_shape = opt_str(args, "shape").unwrap_or(payload::DEFAULT_CONNECTOR_SHAPE);
    let body = payload::connector(
        start_item_id,
        end_item_id,
        line_shape,
        opt_str(args, "caption"),
    );

    let response = api.create_item(board_id, ItemKind::Connector, body).await?;
    Ok(created(ItemKind::Connector, board_id, &response))
}

pub(super) async fn create_frame(
    api: &dyn BoardApi,
    args: &Value,
) -> Result<ToolCallResult, Error> {
    let board_id = require_str(args, "board_id")?;
    let (dx, dy) = payload::DEFAULT_POSITION;
    let (dw, dh) = payload::DEFAULT_FRAME_GEOMETRY;
    let body = payload::frame(
        opt_str(args, "title"),
        f64_or(args, "x", dx),
        f64_or(args, "y", dy),
        f64_or(args, "width", dw),
        f64_or(args, "height", dh),
    );

    let response = api.create_item(board_id, ItemKind::Frame, body).await?;
    Ok(created(ItemKind::Frame, board_id, &response))
}

pub(super) async fn create_text(
    api: &dyn BoardApi,
    args: &Value,
) -> Result<ToolCallResult, Error> {
    let board_id = require_str(args, "board_id")?;
    let content = require_str(args, "content")?;
    let (dx, dy) = payload::DEFAULT_POSITION;
    let body = payload::text(
        content,
        f64_or(args, "x", dx),
        f64_or(args, "y", dy),
        opt_f64(args, "width"),
        opt_f64(args, "font_size"),
    );

    let response = api.create_item(board_id, ItemKind::Text, body).await?;
    Ok(created(ItemKind::Text, board_id, &response))
}

pub(super) async fn create_card(
    api: &dyn BoardApi,
    args: &Value,
) -> Result<ToolCallResult, Error> {
    let board_id = require_str(args, "board_id")?;
    let title = require_str(args, "title")?;
    let (dx, dy) = payload::DEFAULT_POSITION;
    let (dw, dh) = payload::DEFAULT_CARD_GEOMETRY;
    let body = payload::card(
        title,
        opt_str(args, "description"),
        f64_or(args, "x", dx),
        f64_or(args, "y", dy),
        f64_or(args, "width", dw),
        f64_or(args, "height", dh),
    );

    let response = api.create_item(board_id, ItemKind::Card, body).await?;
    Ok(created(ItemKind::Card, board_id, &response))
}

// === Mutation and removal ===

pub(super) async fn update_item(
    api: &dyn BoardApi,
    args: &Value,
) -> Result<ToolCallResult, Error> {
    let board_id = require_str(args, "board_id")?;
    let item_id = require_str(args, "item_id")?;
    let kind = parse_kind(require_str(args, "item_type")?)?;

    // Forward only the sub-objects the caller actually supplied.
    let mut body = Map::new();
    for field in ["data", "style", "position", "geometry"] {
        if let Some(section) = args.get(field) {
            if !section.is_null() {
                body.insert(field.to_string(), section.clone());
            }
        }
    }
    if body.is_empty() {
        return Err(Error::validation(
            "update_item requires at least one of: data, style, position, geometry",
        ));
    }

    api.update_item(board_id, kind, item_id, Value::Object(body))
        .await?;
    Ok(ToolCallResult::text(format!(
        "Updated {kind} {item_id} on board {board_id}"
    )))
}

pub(super) async fn delete_item(
    api: &dyn BoardApi,
    args: &Value,
) -> Result<ToolCallResult, Error> {
    let board_id = require_str(args, "board_id")?;
    let item_id = require_str(args, "item_id")?;

    api.delete_item(board_id, item_id).await?;
    Ok(ToolCallResult::text(format!(
        "Deleted item {item_id} from board {board_id}"
    )))
}
