//! Tool registry and invocation dispatch.
//!
//! Every invocable operation is declared once in [`schema::definitions`] and
//! routed here. Dispatch order is fixed:
//!
//! 1. Unknown tool names fail before any network access.
//! 2. Required arguments are checked; missing ones fail, still offline.
//! 3. Documented defaults fill omitted optional fields.
//! 4. The variant-correct payload is built and exactly one [`BoardApi`]
//!    operation runs (bulk delete loops, see [`bulk`]).
//! 5. The outcome becomes a uniform sequence of content blocks: a short
//!    confirmation for mutations, pretty-printed JSON for reads.
//!
//! All non-fatal failures are normalised into an `isError` result here; the
//! request loop never sees a panic or a stray `Err`.

pub mod bulk;
pub mod schema;

mod handlers;

use serde::Serialize;
use serde_json::Value;

use crate::client::BoardApi;

/// A tool definition for the tools/list response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    /// Unique tool name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// JSON Schema for the tool's input parameters.
    pub input_schema: Value,
}

/// Content item in a tool call response.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ToolContent {
    /// Text content.
    Text {
        /// The text content.
        text: String,
    },
}

#[allow(clippy::trivially_copy_pass_by_ref)] // serde's skip_serializing_if requires fn(&T) -> bool
const fn is_false(b: &bool) -> bool {
    !*b
}

/// Result of a tool call: an ordered sequence of content blocks.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCallResult {
    /// Content returned by the tool.
    pub content: Vec<ToolContent>,
    /// Whether the tool call resulted in an error.
    #[serde(skip_serializing_if = "is_false")]
    pub is_error: bool,
}

impl ToolCallResult {
    /// Creates a successful text result.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text { text: text.into() }],
            is_error: false,
        }
    }

    /// Creates a successful result carrying pretty-printed JSON.
    #[must_use]
    pub fn json(value: &Value) -> Self {
        Self::text(serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string()))
    }

    /// Creates an error text result.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text {
                text: message.into(),
            }],
            is_error: true,
        }
    }
}

/// Routes one validated invocation to its handler.
///
/// Unknown names are rejected here, before any handler (and therefore any
/// network call) runs. Handler errors of every kind are folded into an
/// `isError` result.
pub async fn dispatch(api: &dyn BoardApi, name: &str, arguments: &Value) -> ToolCallResult {
    let result = match name {
        // Reads
        "list_boards" => handlers::list_boards(api, arguments).await,
        "get_board" => handlers::get_board(api, arguments).await,
        "list_items" => handlers::list_items(api, arguments).await,
        "get_item" => handlers::get_item(api, arguments).await,
        "get_items_in_frame" => handlers::get_items_in_frame(api, arguments).await,
        // Creation
        "create_sticky_note" => handlers::create_sticky_note(api, arguments).await,
        "create_shape" => handlers::create_shape(api, arguments).await,
        "create_connector" => handlers::create_connector(api, arguments).await,
        "create_frame" => handlers::create_frame(api, arguments).await,
        "create_text" => handlers::create_text(api, arguments).await,
        "create_card" => handlers::create_card(api, arguments).await,
        // Mutation and removal
        "update_item" => handlers::update_item(api, arguments).await,
        "delete_item" => handlers::delete_item(api, arguments).await,
        // Bulk operations
        "bulk_create_items" => bulk::create_items(api, arguments).await,
        "bulk_delete_items" => bulk::delete_items(api, arguments).await,
        // Unknown tool
        _ => return ToolCallResult::error(format!("Unknown tool: {name}")),
    };

    result.unwrap_or_else(|e| ToolCallResult::error(e.to_string()))
}
