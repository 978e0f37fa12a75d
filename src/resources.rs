//! Resource catalogue: boards as addressable MCP resources.
//!
//! Every board maps to a URI of the fixed form `miro://board/<id>`. Reading a
//! resource resolves the id back to the board's item collection and returns
//! it as serialised JSON text. URIs without the scheme prefix are rejected
//! before any network access.

use serde_json::{json, Value};

use crate::client::{BoardApi, ItemFilter};
use crate::error::Error;

/// URI prefix for board resources.
pub const BOARD_URI_PREFIX: &str = "miro://board/";

/// Builds the resource URI for a board id.
#[must_use]
pub fn board_uri(board_id: &str) -> String {
    format!("{BOARD_URI_PREFIX}{board_id}")
}

/// Extracts the board id from a resource URI.
///
/// # Errors
///
/// Returns a validation error for any URI lacking the `miro://board/` prefix
/// or carrying an empty id.
pub fn parse_board_uri(uri: &str) -> Result<&str, Error> {
    let board_id = uri.strip_prefix(BOARD_URI_PREFIX).ok_or_else(|| {
        Error::validation(format!(
            "invalid resource URI '{uri}': expected {BOARD_URI_PREFIX}<boardId>"
        ))
    })?;

    if board_id.is_empty() {
        return Err(Error::validation(format!(
            "invalid resource URI '{uri}': empty board id"
        )));
    }

    Ok(board_id)
}

/// Lists boards as resource descriptors for the resources/list response.
///
/// # Errors
///
/// Propagates remote failures from the board listing call.
pub async fn list(api: &dyn BoardApi) -> Result<Vec<Value>, Error> {
    let response = api.list_boards(None, None).await?;

    let boards = response
        .get("data")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    Ok(boards
        .iter()
        .filter_map(|board| {
            let id = board.get("id").and_then(Value::as_str)?;
            let name = board
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or("Untitled board");
            Some(json!({
                "uri": board_uri(id),
                "name": name,
                "description": board.get("description").and_then(Value::as_str),
                "mimeType": "application/json",
            }))
        })
        .collect())
}

/// Reads a board resource: resolves the URI and fetches the item collection.
///
/// # Errors
///
/// Returns a validation error for a malformed URI (no network call), or a
/// remote error from the item fetch.
pub async fn read(api: &dyn BoardApi, uri: &str) -> Result<String, Error> {
    let board_id = parse_board_uri(uri)?;
    let items = api.list_items(board_id, &ItemFilter::default()).await?;
    Ok(serde_json::to_string_pretty(&items)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_uri_round_trip() {
        let uri = board_uri("B123");
        assert_eq!(uri, "miro://board/B123");
        assert_eq!(parse_board_uri(&uri).unwrap(), "B123");
    }

    #[test]
    fn rejects_foreign_scheme() {
        let err = parse_board_uri("https://example.test/board/B1").unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }

    #[test]
    fn rejects_missing_prefix() {
        assert!(parse_board_uri("board/B1").is_err());
        assert!(parse_board_uri("miro://boards/B1").is_err());
    }

    #[test]
    fn rejects_empty_id() {
        let err = parse_board_uri("miro://board/").unwrap_err();
        assert!(err.to_string().contains("empty board id"));
    }
}
