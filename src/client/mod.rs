//! Authenticated HTTP client for the Miro REST API.
//!
//! [`MiroClient`] is a thin request/response wrapper: it attaches the bearer
//! token and JSON headers, performs one round trip, and normalises the
//! outcome. Every typed operation is a specialisation that fixes method, path
//! template, and body shape — no operation interprets response content.
//!
//! The dispatcher depends on the [`BoardApi`] trait rather than the concrete
//! client, so tests can substitute a recording fake and prove that validation
//! failures never reach the network.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;

use crate::board::ItemKind;
use crate::config::Config;
use crate::error::{ConfigError, Error};

/// HTTP request timeout for a single round trip.
const REQUEST_TIMEOUT_SECS: u64 = 30;
/// Connection establishment timeout.
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Filter and pagination parameters for item list operations.
///
/// `cursor` is an opaque token from a previous response; it is forwarded
/// verbatim and never parsed or regenerated locally.
#[derive(Debug, Clone, Default)]
pub struct ItemFilter {
    /// Restrict results to one item variant.
    pub item_type: Option<String>,
    /// Restrict results to children of this item (frame filtering).
    pub parent_item_id: Option<String>,
    /// Maximum number of results per page.
    pub limit: Option<u64>,
    /// Opaque pagination cursor from the previous page.
    pub cursor: Option<String>,
}

impl ItemFilter {
    /// Renders the filter as query parameters, omitting unset fields.
    #[must_use]
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(ref item_type) = self.item_type {
            query.push(("type", item_type.clone()));
        }
        if let Some(ref parent) = self.parent_item_id {
            query.push(("parent_item_id", parent.clone()));
        }
        if let Some(limit) = self.limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(ref cursor) = self.cursor {
            query.push(("cursor", cursor.clone()));
        }
        query
    }
}

/// The remote operations the dispatcher can invoke.
///
/// One method per upstream endpoint family; each performs exactly one HTTP
/// round trip. Bulk delete is intentionally absent — the service has no
/// multi-item delete endpoint, so the executor loops single deletes.
#[async_trait]
pub trait BoardApi: Send + Sync {
    /// `GET /boards` with optional pagination.
    async fn list_boards(&self, limit: Option<u64>, cursor: Option<&str>) -> Result<Value, Error>;

    /// `GET /boards/{id}`.
    async fn get_board(&self, board_id: &str) -> Result<Value, Error>;

    /// `GET /boards/{id}/items` with filter and pagination parameters.
    async fn list_items(&self, board_id: &str, filter: &ItemFilter) -> Result<Value, Error>;

    /// `GET /boards/{id}/items/{itemId}`.
    async fn get_item(&self, board_id: &str, item_id: &str) -> Result<Value, Error>;

    /// `POST /boards/{id}/<variant-plural>`.
    async fn create_item(
        &self,
        board_id: &str,
        kind: ItemKind,
        payload: Value,
    ) -> Result<Value, Error>;

    /// `PATCH /boards/{id}/<variant-plural>/{itemId}`.
    async fn update_item(
        &self,
        board_id: &str,
        kind: ItemKind,
        item_id: &str,
        payload: Value,
    ) -> Result<Value, Error>;

    /// `DELETE /boards/{id}/items/{itemId}`. Success is an empty 204.
    async fn delete_item(&self, board_id: &str, item_id: &str) -> Result<(), Error>;

    /// `POST /boards/{id}/items/bulk` — single-shot, all-or-nothing upstream.
    async fn bulk_create(&self, board_id: &str, items: Vec<Value>) -> Result<Value, Error>;
}

/// Authenticated client for the Miro REST API.
pub struct MiroClient {
    http: reqwest::Client,
    access_token: String,
    base_url: String,
}

impl MiroClient {
    /// Builds a client from the immutable process configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the underlying HTTP client cannot
    /// be constructed.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| ConfigError::Invalid {
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            http,
            access_token: config.access_token.clone(),
            base_url: config.base_url.clone(),
        })
    }

    /// Performs one authenticated round trip against `path`.
    ///
    /// Returns `Ok(None)` for an empty 204 response, `Ok(Some(json))` for a
    /// decoded success body, and a normalised error otherwise.
    ///
    /// # Errors
    ///
    /// [`Error::Remote`] for any status ≥ 400, [`Error::Transport`] when the
    /// round trip fails, [`Error::Json`] when a success body is not JSON.
    async fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<Option<Value>, Error> {
        let url = format!("{}{path}", self.base_url);
        tracing::debug!(method = %method, path, "remote request");

        let mut builder = self
            .http
            .request(method, &url)
            .bearer_auth(&self.access_token);
        if !query.is_empty() {
            builder = builder.query(query);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let text = response.text().await?;

        if !status.is_success() {
            return Err(remote_error(status.as_u16(), &text));
        }

        let value: Value = serde_json::from_str(&text)?;
        Ok(Some(value))
    }

    /// Like [`Self::request`] but requires a JSON body in the response.
    async fn request_json(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<Value, Error> {
        self.request(method, path, query, body)
            .await?
            .ok_or_else(|| Error::Remote {
                status: 204,
                message: "unexpected empty response body".to_string(),
            })
    }
}

/// Normalises a non-success response into [`Error::Remote`].
///
/// The service reports failures as a JSON body with an optional `message`
/// field; when absent or unparseable, a generic message carries the status.
fn remote_error(status: u16, body: &str) -> Error {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(String::from))
        .unwrap_or_else(|| format!("request failed with status {status}"));

    Error::Remote { status, message }
}

#[async_trait]
impl BoardApi for MiroClient {
    async fn list_boards(&self, limit: Option<u64>, cursor: Option<&str>) -> Result<Value, Error> {
        let mut query = Vec::new();
        if let Some(limit) = limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(cursor) = cursor {
            query.push(("cursor", cursor.to_string()));
        }
        self.request_json(Method::GET, "/boards", &query, None).await
    }

    async fn get_board(&self, board_id: &str) -> Result<Value, Error> {
        self.request_json(Method::GET, &format!("/boards/{board_id}"), &[], None)
            .await
    }

    async fn list_items(&self, board_id: &str, filter: &ItemFilter) -> Result<Value, Error> {
        self.request_json(
            Method::GET,
            &format!("/boards/{board_id}/items"),
            &filter.to_query(),
            None,
        )
        .await
    }

    async fn get_item(&self, board_id: &str, item_id: &str) -> Result<Value, Error> {
        self.request_json(
            Method::GET,
            &format!("/boards/{board_id}/items/{item_id}"),
            &[],
            None,
        )
        .await
    }

    async fn create_item(
        &self,
        board_id: &str,
        kind: ItemKind,
        payload: Value,
    ) -> Result<Value, Error> {
        self.request_json(
            Method::POST,
            &format!("/boards/{board_id}/{}", kind.path_segment()),
            &[],
            Some(&payload),
        )
        .await
    }

    async fn update_item(
        &self,
        board_id: &str,
        kind: ItemKind,
        item_id: &str,
        payload: Value,
    ) -> Result<Value, Error> {
        self.request_json(
            Method::PATCH,
            &format!("/boards/{board_id}/{}/{item_id}", kind.path_segment()),
            &[],
            Some(&payload),
        )
        .await
    }

    async fn delete_item(&self, board_id: &str, item_id: &str) -> Result<(), Error> {
        self.request(
            Method::DELETE,
            &format!("/boards/{board_id}/items/{item_id}"),
            &[],
            None,
        )
        .await?;
        Ok(())
    }

    async fn bulk_create(&self, board_id: &str, items: Vec<Value>) -> Result<Value, Error> {
        let body = Value::Array(items);
        self.request_json(
            Method::POST,
            &format!("/boards/{board_id}/items/bulk"),
            &[],
            Some(&body),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_error_uses_service_message() {
        let err = remote_error(404, r#"{"message": "Item not found", "code": "not_found"}"#);
        let Error::Remote { status, message } = err else {
            panic!("expected Remote error");
        };
        assert_eq!(status, 404);
        assert_eq!(message, "Item not found");
    }

    #[test]
    fn remote_error_falls_back_without_message() {
        let err = remote_error(500, r#"{"code": "oops"}"#);
        let Error::Remote { status, message } = err else {
            panic!("expected Remote error");
        };
        assert_eq!(status, 500);
        assert!(message.contains("500"));
    }

    #[test]
    fn remote_error_falls_back_on_non_json_body() {
        let err = remote_error(502, "<html>Bad Gateway</html>");
        let Error::Remote { status, message } = err else {
            panic!("expected Remote error");
        };
        assert_eq!(status, 502);
        assert!(message.contains("502"));
    }

    #[test]
    fn item_filter_forwards_cursor_verbatim() {
        let filter = ItemFilter {
            item_type: Some("shape".to_string()),
            parent_item_id: Some("F1".to_string()),
            limit: Some(25),
            cursor: Some("opaque-token==".to_string()),
        };
        let query = filter.to_query();
        assert_eq!(
            query,
            vec![
                ("type", "shape".to_string()),
                ("parent_item_id", "F1".to_string()),
                ("limit", "25".to_string()),
                ("cursor", "opaque-token==".to_string()),
            ]
        );
    }

    #[test]
    fn empty_filter_yields_no_query() {
        assert!(ItemFilter::default().to_query().is_empty());
    }
}
