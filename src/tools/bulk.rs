//! Bulk operation executor.
//!
//! Two deliberately asymmetric policies live here:
//!
//! - **delete**: the service has no multi-item delete endpoint, so the
//!   executor loops single deletes strictly sequentially, best-effort. A
//!   failure is recorded and the remaining ids are still attempted; the
//!   outcome is an aggregated summary, never an exception.
//! - **create**: the service has a native single-shot bulk endpoint, so the
//!   whole batch is delegated upstream as one unit. An upstream rejection
//!   fails the entire call; there is no local per-item retry.
//!
//! Do not parallelise the delete loop without redefining the ordered
//! failure-reporting contract.

use serde_json::{json, Value};

use crate::client::BoardApi;
use crate::error::Error;

use super::handlers::require_str;
use super::ToolCallResult;

/// Maximum number of ids accepted by `bulk_delete_items`.
pub const MAX_DELETE_BATCH: usize = 50;
/// Maximum number of items accepted by `bulk_create_items`.
///
/// The bound is enforced locally before the upstream call rather than left
/// to the service's own limit.
pub const MAX_CREATE_BATCH: usize = 20;

/// Outcome of a best-effort bulk delete.
#[derive(Debug, Default)]
struct BulkDeleteOutcome {
    /// Ids deleted successfully, in attempt order.
    deleted: Vec<String>,
    /// Per-id failures, in attempt order.
    errors: Vec<(String, String)>,
}

impl BulkDeleteOutcome {
    fn into_result(self, board_id: &str) -> ToolCallResult {
        let summary = json!({
            "boardId": board_id,
            "deletedCount": self.deleted.len(),
            "errorCount": self.errors.len(),
            "deleted": self.deleted,
            "errors": self
                .errors
                .iter()
                .map(|(item_id, error)| json!({ "itemId": item_id, "error": error }))
                .collect::<Vec<_>>(),
        });
        ToolCallResult::json(&summary)
    }
}

/// Handles `bulk_delete_items`: sequential, partial-failure-tolerant deletes.
pub(super) async fn delete_items(
    api: &dyn BoardApi,
    args: &Value,
) -> Result<ToolCallResult, Error> {
    let board_id = require_str(args, "board_id")?;
    let ids = string_array(args, "item_ids")?;

    if ids.is_empty() || ids.len() > MAX_DELETE_BATCH {
        return Err(Error::validation(format!(
            "item_ids must contain between 1 and {MAX_DELETE_BATCH} ids, got {}",
            ids.len()
        )));
    }

    let mut outcome = BulkDeleteOutcome::default();
    for item_id in ids {
        match api.delete_item(board_id, &item_id).await {
            Ok(()) => outcome.deleted.push(item_id),
            Err(e) => {
                tracing::warn!(item_id = %item_id, error = %e, "bulk delete attempt failed");
                outcome.errors.push((item_id, e.to_string()));
            }
        }
    }

    Ok(outcome.into_result(board_id))
}

/// Handles `bulk_create_items`: one delegated all-or-nothing upstream call.
pub(super) async fn create_items(
    api: &dyn BoardApi,
    args: &Value,
) -> Result<ToolCallResult, Error> {
    let board_id = require_str(args, "board_id")?;
    let items = args
        .get("items")
        .and_then(Value::as_array)
        .ok_or_else(|| Error::validation("missing required parameter: items"))?;

    if items.is_empty() || items.len() > MAX_CREATE_BATCH {
        return Err(Error::validation(format!(
            "items must contain between 1 and {MAX_CREATE_BATCH} entries, got {}",
            items.len()
        )));
    }

    let response = api.bulk_create(board_id, items.clone()).await?;
    let count = response
        .get("data")
        .and_then(Value::as_array)
        .map_or(items.len(), Vec::len);

    Ok(ToolCallResult::text(format!(
        "Created {count} items on board {board_id}"
    )))
}

/// Extracts a required array-of-strings argument.
fn string_array(args: &Value, field: &str) -> Result<Vec<String>, Error> {
    let array = args
        .get(field)
        .and_then(Value::as_array)
        .ok_or_else(|| Error::validation(format!("missing required parameter: {field}")))?;

    array
        .iter()
        .map(|v| {
            v.as_str()
                .map(String::from)
                .ok_or_else(|| Error::validation(format!("{field} must contain only strings")))
        })
        .collect()
}
