//! Declared tool definitions for the tools/list response.
//!
//! One definition per invocable operation: name, natural-language
//! description, and the JSON-schema input declaration (required fields,
//! enumerated value sets, numeric ranges, documented defaults).

use serde_json::json;

use crate::tools::bulk::{MAX_CREATE_BATCH, MAX_DELETE_BATCH};
use crate::tools::ToolDefinition;

/// Shape kinds accepted by the remote service.
const SHAPE_KINDS: [&str; 8] = [
    "rectangle",
    "round_rectangle",
    "circle",
    "triangle",
    "rhombus",
    "oval",
    "hexagon",
    "star",
];

/// Connector line shapes accepted by the remote service.
const CONNECTOR_SHAPES: [&str; 3] = ["curved", "straight", "elbowed"];

/// Sticky note colours accepted by the remote service.
const STICKY_COLORS: [&str; 10] = [
    "yellow",
    "light_yellow",
    "green",
    "light_green",
    "blue",
    "light_blue",
    "pink",
    "light_pink",
    "orange",
    "gray",
];

/// Item variants addressable by name.
const ITEM_TYPES: [&str; 11] = [
    "sticky_note",
    "shape",
    "connector",
    "frame",
    "text",
    "card",
    "app_card",
    "document",
    "image",
    "embed",
    "generic",
];

/// Returns the full set of declared tools.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn definitions() -> Vec<ToolDefinition> {
    vec![
        // === Board and item reads ===
        ToolDefinition {
            name: "list_boards".to_string(),
            description: "List the boards accessible with the configured token. \
                          Supports cursor-based pagination: pass the cursor from a \
                          previous response to fetch the next page."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "limit": {
                        "type": "integer",
                        "minimum": 1,
                        "maximum": 50,
                        "description": "Maximum number of boards per page"
                    },
                    "cursor": {
                        "type": "string",
                        "description": "Opaque pagination cursor from a previous response"
                    }
                }
            }),
        },
        ToolDefinition {
            name: "get_board".to_string(),
            description: "Fetch a single board's metadata (name, description).".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "board_id": {
                        "type": "string",
                        "description": "Board id"
                    }
                },
                "required": ["board_id"]
            }),
        },
        ToolDefinition {
            name: "list_items".to_string(),
            description: "List items on a board, optionally filtered by item type or \
                          parent item. Supports cursor-based pagination."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "board_id": {
                        "type": "string",
                        "description": "Board id"
                    },
                    "item_type": {
                        "type": "string",
                        "enum": ITEM_TYPES,
                        "description": "Restrict results to one item variant"
                    },
                    "parent_item_id": {
                        "type": "string",
                        "description": "Restrict results to children of this item"
                    },
                    "limit": {
                        "type": "integer",
                        "minimum": 1,
                        "maximum": 50,
                        "description": "Maximum number of items per page"
                    },
                    "cursor": {
                        "type": "string",
                        "description": "Opaque pagination cursor from a previous response"
                    }
                },
                "required": ["board_id"]
            }),
        },
        ToolDefinition {
            name: "get_item".to_string(),
            description: "Fetch a single item by id.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "board_id": { "type": "string", "description": "Board id" },
                    "item_id": { "type": "string", "description": "Item id" }
                },
                "required": ["board_id", "item_id"]
            }),
        },
        ToolDefinition {
            name: "get_items_in_frame".to_string(),
            description: "List the items contained in a frame (children of the frame \
                          item). Supports cursor-based pagination."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "board_id": { "type": "string", "description": "Board id" },
                    "frame_id": { "type": "string", "description": "Frame item id" },
                    "limit": {
                        "type": "integer",
                        "minimum": 1,
                        "maximum": 50,
                        "description": "Maximum number of items per page"
                    },
                    "cursor": {
                        "type": "string",
                        "description": "Opaque pagination cursor from a previous response"
                    }
                },
                "required": ["board_id", "frame_id"]
            }),
        },
        // === Item creation ===
        ToolDefinition {
            name: "create_sticky_note".to_string(),
            description: "Create a sticky note on a board. Colour defaults to yellow, \
                          position to the board origin."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "board_id": { "type": "string", "description": "Board id" },
                    "content": { "type": "string", "description": "Sticky note text" },
                    "color": {
                        "type": "string",
                        "enum": STICKY_COLORS,
                        "default": "yellow",
                        "description": "Fill colour"
                    },
                    "x": { "type": "number", "default": 0, "description": "X position" },
                    "y": { "type": "number", "default": 0, "description": "Y position" },
                    "parent_item_id": {
                        "type": "string",
                        "description": "Optional frame to place the note inside"
                    }
                },
                "required": ["board_id", "content"]
            }),
        },
        ToolDefinition {
            name: "create_shape".to_string(),
            description: "Create a shape on a board. The kind defaults to rectangle, \
                          the geometry to 200x200 with no rotation."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "board_id": { "type": "string", "description": "Board id" },
                    "shape": {
                        "type": "string",
                        "enum": SHAPE_KINDS,
                        "default": "rectangle",
                        "description": "Shape kind"
                    },
                    "content": { "type": "string", "description": "Optional text inside the shape" },
                    "x": { "type": "number", "default": 0, "description": "X position" },
                    "y": { "type": "number", "default": 0, "description": "Y position" },
                    "width": { "type": "number", "default": 200, "description": "Width" },
                    "height": { "type": "number", "default": 200, "description": "Height" },
                    "rotation": { "type": "number", "default": 0, "description": "Rotation in degrees" },
                    "fill_color": { "type": "string", "description": "Optional fill colour (hex)" }
                },
                "required": ["board_id"]
            }),
        },
        ToolDefinition {
            name: "create_connector".to_string(),
            description: "Create a connector between two existing items. The line shape \
                          defaults to curved."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "board_id": { "type": "string", "description": "Board id" },
                    "start_item_id": { "type": "string", "description": "Item the connector starts from" },
                    "end_item_id": { "type": "string", "description": "Item the connector ends at" },
                    "shape": {
                        "type": "string",
                        "enum": CONNECTOR_SHAPES,
                        "default": "curved",
                        "description": "Line shape"
                    },
                    "caption": { "type": "string", "description": "Optional caption on the connector" }
                },
                "required": ["board_id", "start_item_id", "end_item_id"]
            }),
        },
        ToolDefinition {
            name: "create_frame".to_string(),
            description: "Create a frame on a board. Geometry defaults to 800x600."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "board_id": { "type": "string", "description": "Board id" },
                    "title": { "type": "string", "description": "Optional frame title" },
                    "x": { "type": "number", "default": 0, "description": "X position" },
                    "y": { "type": "number", "default": 0, "description": "Y position" },
                    "width": { "type": "number", "default": 800, "description": "Width" },
                    "height": { "type": "number", "default": 600, "description": "Height" }
                },
                "required": ["board_id"]
            }),
        },
        ToolDefinition {
            name: "create_text".to_string(),
            description: "Create a free-standing text element on a board.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "board_id": { "type": "string", "description": "Board id" },
                    "content": { "type": "string", "description": "Text content" },
                    "x": { "type": "number", "default": 0, "description": "X position" },
                    "y": { "type": "number", "default": 0, "description": "Y position" },
                    "width": { "type": "number", "description": "Optional text box width" },
                    "font_size": { "type": "number", "description": "Optional font size" }
                },
                "required": ["board_id", "content"]
            }),
        },
        ToolDefinition {
            name: "create_card".to_string(),
            description: "Create a card on a board. Geometry defaults to 320x176."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "board_id": { "type": "string", "description": "Board id" },
                    "title": { "type": "string", "description": "Card title" },
                    "description": { "type": "string", "description": "Optional card description" },
                    "x": { "type": "number", "default": 0, "description": "X position" },
                    "y": { "type": "number", "default": 0, "description": "Y position" },
                    "width": { "type": "number", "default": 320, "description": "Width" },
                    "height": { "type": "number", "default": 176, "description": "Height" }
                },
                "required": ["board_id", "title"]
            }),
        },
        // === Mutation and removal ===
        ToolDefinition {
            name: "update_item".to_string(),
            description: "Update an existing item. item_type selects the variant \
                          endpoint; at least one of data, style, position, or geometry \
                          must be supplied and is forwarded as-is."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "board_id": { "type": "string", "description": "Board id" },
                    "item_id": { "type": "string", "description": "Item id" },
                    "item_type": {
                        "type": "string",
                        "enum": ITEM_TYPES,
                        "description": "Variant of the item being updated"
                    },
                    "data": { "type": "object", "description": "Variant-specific data fields" },
                    "style": { "type": "object", "description": "Style fields" },
                    "position": { "type": "object", "description": "Position fields" },
                    "geometry": { "type": "object", "description": "Geometry fields" }
                },
                "required": ["board_id", "item_id", "item_type"]
            }),
        },
        ToolDefinition {
            name: "delete_item".to_string(),
            description: "Delete a single item from a board.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "board_id": { "type": "string", "description": "Board id" },
                    "item_id": { "type": "string", "description": "Item id" }
                },
                "required": ["board_id", "item_id"]
            }),
        },
        // === Bulk operations ===
        ToolDefinition {
            name: "bulk_create_items".to_string(),
            description: format!(
                "Create up to {MAX_CREATE_BATCH} items in a single request. The batch \
                 is all-or-nothing: if the service rejects it, no item is created. \
                 Each entry must carry the full creation payload including its type."
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "board_id": { "type": "string", "description": "Board id" },
                    "items": {
                        "type": "array",
                        "minItems": 1,
                        "maxItems": MAX_CREATE_BATCH,
                        "items": { "type": "object" },
                        "description": "Full creation payloads, one per item"
                    }
                },
                "required": ["board_id", "items"]
            }),
        },
        ToolDefinition {
            name: "bulk_delete_items".to_string(),
            description: format!(
                "Delete up to {MAX_DELETE_BATCH} items, best-effort. Deletes run \
                 sequentially and independently; a failure does not stop the remaining \
                 attempts. The result lists the deleted ids and the per-item errors."
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "board_id": { "type": "string", "description": "Board id" },
                    "item_ids": {
                        "type": "array",
                        "minItems": 1,
                        "maxItems": MAX_DELETE_BATCH,
                        "items": { "type": "string" },
                        "description": "Ids of the items to delete"
                    }
                },
                "required": ["board_id", "item_ids"]
            }),
        },
    ]
}
