//! Integration tests for tool dispatch.
//!
//! A recording fake stands in for the HTTP client, capturing every remote
//! operation. These tests pin the dispatcher's contract: validation happens
//! strictly before any network call, documented defaults are applied exactly,
//! and each item variant's payload keeps its discriminant in the right slot.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use miro_mcp::board::ItemKind;
use miro_mcp::client::{BoardApi, ItemFilter};
use miro_mcp::error::Error;
use miro_mcp::tools;

/// Records every remote operation for later inspection.
#[derive(Default)]
struct RecordingApi {
    calls: Mutex<Vec<Value>>,
}

impl RecordingApi {
    fn calls(&self) -> Vec<Value> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Value) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl BoardApi for RecordingApi {
    async fn list_boards(&self, limit: Option<u64>, cursor: Option<&str>) -> Result<Value, Error> {
        self.record(json!({ "op": "list_boards", "limit": limit, "cursor": cursor }));
        Ok(json!({ "data": [], "cursor": "next-page==" }))
    }

    async fn get_board(&self, board_id: &str) -> Result<Value, Error> {
        self.record(json!({ "op": "get_board", "board": board_id }));
        Ok(json!({ "id": board_id }))
    }

    async fn list_items(&self, board_id: &str, filter: &ItemFilter) -> Result<Value, Error> {
        self.record(json!({
            "op": "list_items",
            "board": board_id,
            "type": filter.item_type,
            "parent": filter.parent_item_id,
            "limit": filter.limit,
            "cursor": filter.cursor,
        }));
        Ok(json!({ "data": [] }))
    }

    async fn get_item(&self, board_id: &str, item_id: &str) -> Result<Value, Error> {
        self.record(json!({ "op": "get_item", "board": board_id, "item": item_id }));
        Ok(json!({ "id": item_id }))
    }

    async fn create_item(
        &self,
        board_id: &str,
        kind: ItemKind,
        payload: Value,
    ) -> Result<Value, Error> {
        self.record(json!({
            "op": "create_item",
            "board": board_id,
            "kind": kind.as_str(),
            "payload": payload,
        }));
        Ok(json!({ "id": "created-1" }))
    }

    async fn update_item(
        &self,
        board_id: &str,
        kind: ItemKind,
        item_id: &str,
        payload: Value,
    ) -> Result<Value, Error> {
        self.record(json!({
            "op": "update_item",
            "board": board_id,
            "kind": kind.as_str(),
            "item": item_id,
            "payload": payload,
        }));
        Ok(json!({ "id": item_id }))
    }

    async fn delete_item(&self, board_id: &str, item_id: &str) -> Result<(), Error> {
        self.record(json!({ "op": "delete_item", "board": board_id, "item": item_id }));
        Ok(())
    }

    async fn bulk_create(&self, board_id: &str, items: Vec<Value>) -> Result<Value, Error> {
        self.record(json!({ "op": "bulk_create", "board": board_id, "items": items }));
        Ok(json!({ "data": [] }))
    }
}

// =============================================================================
// Validation before network
// =============================================================================

#[tokio::test]
async fn unknown_tool_fails_without_network() {
    let api = RecordingApi::default();
    let result = tools::dispatch(&api, "frobnicate", &json!({})).await;

    assert!(result.is_error);
    assert!(api.calls().is_empty(), "no HTTP request may be issued");
}

#[tokio::test]
async fn missing_required_argument_fails_without_network() {
    let api = RecordingApi::default();
    let result = tools::dispatch(&api, "create_sticky_note", &json!({ "board_id": "B1" })).await;

    assert!(result.is_error);
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn invalid_item_type_fails_without_network() {
    let api = RecordingApi::default();
    let args = json!({ "board_id": "B1", "item_type": "hologram" });
    let result = tools::dispatch(&api, "list_items", &args).await;

    assert!(result.is_error);
    assert!(api.calls().is_empty());
}

// =============================================================================
// Documented defaults and payload quirks
// =============================================================================

#[tokio::test]
async fn sticky_note_defaults_applied() {
    let api = RecordingApi::default();
    let args = json!({ "board_id": "B1", "content": "Hi" });
    let result = tools::dispatch(&api, "create_sticky_note", &args).await;

    assert!(!result.is_error);
    let calls = api.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0]["kind"], "sticky_note");

    let payload = &calls[0]["payload"];
    assert_eq!(payload["data"]["content"], "Hi");
    assert_eq!(payload["style"]["fillColor"], "yellow");
    assert_eq!(payload["position"]["x"], 0.0);
    assert_eq!(payload["position"]["y"], 0.0);
}

#[tokio::test]
async fn shape_discriminant_under_data_shape() {
    let api = RecordingApi::default();
    let args = json!({ "board_id": "B1", "shape": "rectangle" });
    let result = tools::dispatch(&api, "create_shape", &args).await;

    assert!(!result.is_error);
    let calls = api.calls();
    let payload = &calls[0]["payload"];
    assert_eq!(payload["data"]["shape"], "rectangle");
    assert!(
        payload["data"].get("type").is_none(),
        "shape discriminant must never be sent as data.type"
    );
    assert!(payload["data"].get("content").is_none());
}

#[tokio::test]
async fn shape_defaults_applied() {
    let api = RecordingApi::default();
    let result = tools::dispatch(&api, "create_shape", &json!({ "board_id": "B1" })).await;

    assert!(!result.is_error);
    let payload = &api.calls()[0]["payload"];
    assert_eq!(payload["data"]["shape"], "rectangle");
    assert_eq!(payload["geometry"]["width"], 200.0);
    assert_eq!(payload["geometry"]["height"], 200.0);
    assert_eq!(payload["geometry"]["rotation"], 0.0);
}

#[tokio::test]
async fn frame_defaults_and_forced_fields() {
    let api = RecordingApi::default();
    let result = tools::dispatch(&api, "create_frame", &json!({ "board_id": "B1" })).await;

    assert!(!result.is_error);
    let payload = &api.calls()[0]["payload"];
    assert_eq!(payload["data"]["type"], "freeform");
    assert_eq!(payload["data"]["format"], "custom");
    assert_eq!(payload["geometry"]["width"], 800.0);
    assert_eq!(payload["geometry"]["height"], 600.0);
}

#[tokio::test]
async fn card_geometry_defaults() {
    let api = RecordingApi::default();
    let args = json!({ "board_id": "B1", "title": "Task" });
    let result = tools::dispatch(&api, "create_card", &args).await;

    assert!(!result.is_error);
    let payload = &api.calls()[0]["payload"];
    assert_eq!(payload["geometry"]["width"], 320.0);
    assert_eq!(payload["geometry"]["height"], 176.0);
}

#[tokio::test]
async fn connector_line_shape_defaults_to_curved() {
    let api = RecordingApi::default();
    let args = json!({
        "board_id": "B1",
        "start_item_id": "a",
        "end_item_id": "b",
    });
    let result = tools::dispatch(&api, "create_connector", &args).await;

    assert!(!result.is_error);
    let payload = &api.calls()[0]["payload"];
    assert_eq!(payload["shape"], "curved");
    assert_eq!(payload["startItem"]["id"], "a");
    assert_eq!(payload["endItem"]["id"], "b");
}

// =============================================================================
// Pagination and filters
// =============================================================================

#[tokio::test]
async fn cursor_and_limit_forwarded_verbatim() {
    let api = RecordingApi::default();
    let args = json!({
        "board_id": "B1",
        "limit": 25,
        "cursor": "opaque-token==",
    });
    let result = tools::dispatch(&api, "list_items", &args).await;

    assert!(!result.is_error);
    let calls = api.calls();
    assert_eq!(calls[0]["limit"], 25);
    assert_eq!(calls[0]["cursor"], "opaque-token==");
}

#[tokio::test]
async fn returned_cursor_not_transformed() {
    let api = RecordingApi::default();
    let result = tools::dispatch(&api, "list_boards", &json!({})).await;

    assert!(!result.is_error);
    // The response, cursor included, is passed through as pretty JSON.
    let json = serde_json::to_value(&result).unwrap();
    let text = json["content"][0]["text"].as_str().unwrap();
    assert!(text.contains("next-page=="));
}

#[tokio::test]
async fn get_items_in_frame_filters_by_parent() {
    let api = RecordingApi::default();
    let args = json!({ "board_id": "B1", "frame_id": "F1" });
    let result = tools::dispatch(&api, "get_items_in_frame", &args).await;

    assert!(!result.is_error);
    let calls = api.calls();
    assert_eq!(calls[0]["op"], "list_items");
    assert_eq!(calls[0]["parent"], "F1");
    assert_eq!(calls[0]["type"], Value::Null);
}

// =============================================================================
// Updates and deletes
// =============================================================================

#[tokio::test]
async fn update_item_routes_by_variant() {
    let api = RecordingApi::default();
    let args = json!({
        "board_id": "B1",
        "item_id": "i1",
        "item_type": "sticky_note",
        "data": { "content": "new text" },
    });
    let result = tools::dispatch(&api, "update_item", &args).await;

    assert!(!result.is_error);
    let calls = api.calls();
    assert_eq!(calls[0]["op"], "update_item");
    assert_eq!(calls[0]["kind"], "sticky_note");
    assert_eq!(calls[0]["payload"]["data"]["content"], "new text");
    assert!(calls[0]["payload"].get("style").is_none());
}

#[tokio::test]
async fn update_item_requires_some_change() {
    let api = RecordingApi::default();
    let args = json!({
        "board_id": "B1",
        "item_id": "i1",
        "item_type": "shape",
    });
    let result = tools::dispatch(&api, "update_item", &args).await;

    assert!(result.is_error);
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn delete_item_confirmation() {
    let api = RecordingApi::default();
    let args = json!({ "board_id": "B1", "item_id": "i9" });
    let result = tools::dispatch(&api, "delete_item", &args).await;

    assert!(!result.is_error);
    let json = serde_json::to_value(&result).unwrap();
    let text = json["content"][0]["text"].as_str().unwrap();
    assert!(text.contains("i9"));
    assert!(text.contains("B1"));
}
