//! MCP server implementation for the whiteboard bridge.
//!
//! This module implements the MCP server lifecycle:
//!
//! 1. **Initialisation**: capability negotiation and version agreement
//! 2. **Operation**: tool calls, resource reads, prompt serving
//! 3. **Shutdown**: graceful termination on EOF or signal
//!
//! The server is stateless across invocations apart from the lifecycle state
//! and the immutable configuration; every request performs its own remote
//! round trip(s) through the injected [`BoardApi`].

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::client::BoardApi;
use crate::config::Config;
use crate::error::Error;
use crate::mcp::protocol::{
    ErrorCode, IncomingMessage, JsonRpcError, JsonRpcErrorData, JsonRpcNotification,
    JsonRpcRequest, JsonRpcResponse, RequestId, MCP_PROTOCOL_VERSION, SERVER_NAME,
};
use crate::mcp::transport::StdioTransport;
use crate::{prompts, resources, tools};

/// Server state in the MCP lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerState {
    /// Waiting for initialize request.
    AwaitingInit,
    /// Initialize received, waiting for initialized notification.
    Initialising,
    /// Ready for normal operation.
    Running,
    /// Shutdown in progress.
    ShuttingDown,
}

/// Server capabilities advertised during initialisation.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ServerCapabilities {
    /// Tool-related capabilities.
    pub tools: EmptyCapability,
    /// Resource-related capabilities.
    pub resources: EmptyCapability,
    /// Prompt-related capabilities.
    pub prompts: EmptyCapability,
}

/// A capability advertised without options.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EmptyCapability {}

/// Server information for the initialisation response.
#[derive(Debug, Clone, Serialize)]
pub struct ServerInfo {
    /// Server name.
    pub name: String,
    /// Server version.
    pub version: String,
}

impl Default for ServerInfo {
    fn default() -> Self {
        Self {
            name: SERVER_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Parameters for the initialize request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeParams {
    /// Protocol version requested by client.
    pub protocol_version: String,
    /// Client capabilities.
    #[serde(default)]
    pub capabilities: Value,
    /// Client information.
    #[serde(default)]
    pub client_info: Option<Value>,
}

/// Parameters for the tools/call request.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolCallParams {
    /// Name of the tool to call.
    pub name: String,
    /// Arguments for the tool.
    #[serde(default)]
    pub arguments: Value,
}

/// Parameters for the resources/read request.
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceReadParams {
    /// URI of the resource to read.
    pub uri: String,
}

/// Parameters for the prompts/get request.
#[derive(Debug, Clone, Deserialize)]
pub struct PromptGetParams {
    /// Name of the prompt.
    pub name: String,
}

/// The MCP server bridging callers to the remote whiteboard service.
pub struct McpServer {
    /// Current server state.
    state: ServerState,
    /// The transport layer.
    transport: StdioTransport,
    /// Negotiated protocol version (set after initialisation).
    protocol_version: Option<String>,
    /// Immutable process configuration.
    config: Config,
    /// Remote operations, injected for testability.
    api: Box<dyn BoardApi>,
}

impl McpServer {
    /// Creates a new MCP server over the given remote API.
    #[must_use]
    pub fn new(config: Config, api: Box<dyn BoardApi>) -> Self {
        Self {
            state: ServerState::AwaitingInit,
            transport: StdioTransport::new(),
            protocol_version: None,
            config,
            api,
        }
    }

    /// Returns the current server state.
    #[must_use]
    pub const fn state(&self) -> ServerState {
        self.state
    }

    /// Runs the MCP server main loop with graceful shutdown handling.
    ///
    /// # Errors
    ///
    /// Returns an error if transport I/O fails.
    pub async fn run(&mut self) -> std::io::Result<()> {
        self.run_with_shutdown().await
    }

    /// Runs the main loop and handles shutdown.
    #[cfg(unix)]
    async fn run_with_shutdown(&mut self) -> std::io::Result<()> {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigint = signal(SignalKind::interrupt()).map_err(std::io::Error::other)?;
        let mut sigterm = signal(SignalKind::terminate()).map_err(std::io::Error::other)?;

        loop {
            tokio::select! {
                _ = sigint.recv() => {
                    tracing::info!("Received SIGINT, initiating graceful shutdown");
                    self.state = ServerState::ShuttingDown;
                    return Ok(());
                }

                _ = sigterm.recv() => {
                    tracing::info!("Received SIGTERM, initiating graceful shutdown");
                    self.state = ServerState::ShuttingDown;
                    return Ok(());
                }

                line_result = self.transport.read_line() => {
                    if self.handle_transport_result(line_result).await? {
                        return Ok(());
                    }
                }
            }
        }
    }

    /// Runs the main loop and handles shutdown.
    #[cfg(windows)]
    async fn run_with_shutdown(&mut self) -> std::io::Result<()> {
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        loop {
            tokio::select! {
                _ = &mut ctrl_c => {
                    tracing::info!("Received Ctrl+C, initiating graceful shutdown");
                    self.state = ServerState::ShuttingDown;
                    return Ok(());
                }

                line_result = self.transport.read_line() => {
                    if self.handle_transport_result(line_result).await? {
                        return Ok(());
                    }
                }
            }
        }
    }

    /// Handles the result from transport read.
    ///
    /// Returns `true` if the server should shut down.
    async fn handle_transport_result(
        &mut self,
        line_result: std::io::Result<Option<String>>,
    ) -> std::io::Result<bool> {
        let Some(line) = line_result? else {
            self.state = ServerState::ShuttingDown;
            return Ok(true);
        };

        if line.trim().is_empty() {
            return Ok(false);
        }

        self.handle_line(&line).await?;

        if self.state == ServerState::ShuttingDown {
            return Ok(true);
        }

        Ok(false)
    }

    /// Handles a single line of input.
    async fn handle_line(&mut self, line: &str) -> std::io::Result<()> {
        use crate::mcp::protocol::parse_message;

        match parse_message(line) {
            Ok(msg) => self.handle_message(msg).await,
            Err(error) => {
                self.transport.write_error(&error).await?;
                Ok(())
            }
        }
    }

    /// Handles a parsed incoming message.
    async fn handle_message(&mut self, msg: IncomingMessage) -> std::io::Result<()> {
        match msg {
            IncomingMessage::Request(req) => {
                let response = self.dispatch_request(&req).await;
                match response {
                    Ok(resp) => self.transport.write_response(&resp).await,
                    Err(error) => self.transport.write_error(&error).await,
                }
            }
            IncomingMessage::Notification(ref notif) => {
                self.handle_notification(notif);
                Ok(())
            }
        }
    }

    /// Routes an incoming request to its method handler.
    ///
    /// Transport-independent so the full method surface is unit-testable.
    pub async fn dispatch_request(
        &mut self,
        req: &JsonRpcRequest,
    ) -> Result<JsonRpcResponse, JsonRpcError> {
        match req.method.as_str() {
            "initialize" => self.handle_initialize(req),
            "ping" => Ok(Self::handle_ping(req)),
            "tools/list" => self.handle_tools_list(req),
            "tools/call" => self.handle_tools_call(req).await,
            "resources/list" => self.handle_resources_list(req).await,
            "resources/read" => self.handle_resources_read(req).await,
            "prompts/list" => self.handle_prompts_list(req),
            "prompts/get" => self.handle_prompts_get(req).await,
            _ => Err(JsonRpcError::method_not_found(req.id.clone(), &req.method)),
        }
    }

    /// Handles an incoming notification.
    fn handle_notification(&mut self, notif: &JsonRpcNotification) {
        if notif.method == "notifications/initialized" && self.state == ServerState::Initialising {
            self.state = ServerState::Running;
        }
    }

    /// Handles the initialize request.
    fn handle_initialize(&mut self, req: &JsonRpcRequest) -> Result<JsonRpcResponse, JsonRpcError> {
        if self.state != ServerState::AwaitingInit {
            return Err(JsonRpcError::new(
                Some(req.id.clone()),
                JsonRpcErrorData::with_message(
                    ErrorCode::InvalidRequest,
                    "Server already initialised",
                ),
            ));
        }

        let _params: InitializeParams = parse_params(req, "initialize")?;

        let negotiated_version = MCP_PROTOCOL_VERSION.to_string();

        self.protocol_version = Some(negotiated_version.clone());
        self.state = ServerState::Initialising;

        let result = json!({
            "protocolVersion": negotiated_version,
            "capabilities": ServerCapabilities::default(),
            "serverInfo": ServerInfo::default(),
        });

        Ok(JsonRpcResponse::success(req.id.clone(), result))
    }

    /// Handles the ping request.
    fn handle_ping(req: &JsonRpcRequest) -> JsonRpcResponse {
        JsonRpcResponse::success(req.id.clone(), json!({}))
    }

    /// Handles the tools/list request.
    fn handle_tools_list(&self, req: &JsonRpcRequest) -> Result<JsonRpcResponse, JsonRpcError> {
        self.require_running(&req.id)?;

        let result = json!({ "tools": tools::schema::definitions() });

        Ok(JsonRpcResponse::success(req.id.clone(), result))
    }

    /// Handles the tools/call request.
    async fn handle_tools_call(
        &self,
        req: &JsonRpcRequest,
    ) -> Result<JsonRpcResponse, JsonRpcError> {
        self.require_running(&req.id)?;

        let params: ToolCallParams = parse_params(req, "tool call")?;

        let result = tools::dispatch(self.api.as_ref(), &params.name, &params.arguments).await;

        let result_value = serde_json::to_value(&result).map_err(|e| {
            tracing::error!(error = %e, "Failed to serialise tool call result");
            JsonRpcError::internal_error(req.id.clone(), "Internal error: failed to serialise result")
        })?;

        Ok(JsonRpcResponse::success(req.id.clone(), result_value))
    }

    /// Handles the resources/list request.
    async fn handle_resources_list(
        &self,
        req: &JsonRpcRequest,
    ) -> Result<JsonRpcResponse, JsonRpcError> {
        self.require_running(&req.id)?;

        let descriptors = resources::list(self.api.as_ref())
            .await
            .map_err(|e| invocation_error(&req.id, &e))?;

        Ok(JsonRpcResponse::success(
            req.id.clone(),
            json!({ "resources": descriptors }),
        ))
    }

    /// Handles the resources/read request.
    async fn handle_resources_read(
        &self,
        req: &JsonRpcRequest,
    ) -> Result<JsonRpcResponse, JsonRpcError> {
        self.require_running(&req.id)?;

        let params: ResourceReadParams = parse_params(req, "resource read")?;

        let body = resources::read(self.api.as_ref(), &params.uri)
            .await
            .map_err(|e| invocation_error(&req.id, &e))?;

        let result = json!({
            "contents": [{
                "uri": params.uri,
                "mimeType": "application/json",
                "text": body,
            }]
        });

        Ok(JsonRpcResponse::success(req.id.clone(), result))
    }

    /// Handles the prompts/list request.
    fn handle_prompts_list(&self, req: &JsonRpcRequest) -> Result<JsonRpcResponse, JsonRpcError> {
        self.require_running(&req.id)?;

        let result = json!({
            "prompts": [{
                "name": prompts::PROMPT_NAME,
                "description": prompts::PROMPT_DESCRIPTION,
            }]
        });

        Ok(JsonRpcResponse::success(req.id.clone(), result))
    }

    /// Handles the prompts/get request.
    async fn handle_prompts_get(
        &self,
        req: &JsonRpcRequest,
    ) -> Result<JsonRpcResponse, JsonRpcError> {
        self.require_running(&req.id)?;

        let params: PromptGetParams = parse_params(req, "prompt get")?;

        let body = prompts::load(&params.name, self.config.prompt_file.as_deref())
            .await
            .map_err(|e| invocation_error(&req.id, &e))?;

        let result = json!({
            "description": prompts::PROMPT_DESCRIPTION,
            "messages": [{
                "role": "user",
                "content": { "type": "text", "text": body },
            }]
        });

        Ok(JsonRpcResponse::success(req.id.clone(), result))
    }

    /// Ensures the server is in the Running state.
    fn require_running(&self, id: &RequestId) -> Result<(), JsonRpcError> {
        if self.state != ServerState::Running {
            return Err(JsonRpcError::new(
                Some(id.clone()),
                JsonRpcErrorData::with_message(ErrorCode::InvalidRequest, "Server not initialised"),
            ));
        }
        Ok(())
    }
}

/// Deserialises request params, mapping failures to invalid-params errors.
fn parse_params<T: serde::de::DeserializeOwned>(
    req: &JsonRpcRequest,
    context: &str,
) -> Result<T, JsonRpcError> {
    req.params
        .as_ref()
        .map(|p| serde_json::from_value(p.clone()))
        .transpose()
        .map_err(|e| {
            JsonRpcError::invalid_params(req.id.clone(), format!("Invalid {context} params: {e}"))
        })?
        .ok_or_else(|| {
            JsonRpcError::invalid_params(req.id.clone(), format!("Missing {context} params"))
        })
}

/// Maps a bridge error to the appropriate JSON-RPC error for non-tool methods.
fn invocation_error(id: &RequestId, error: &Error) -> JsonRpcError {
    match error {
        Error::Validation { .. } => JsonRpcError::invalid_params(id.clone(), error.to_string()),
        _ => JsonRpcError::internal_error(id.clone(), error.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::board::ItemKind;
    use crate::client::ItemFilter;
    use crate::config::{Config, DEFAULT_BASE_URL};

    /// A `BoardApi` that counts calls and answers with canned data.
    #[derive(Default)]
    struct FakeApi {
        calls: AtomicUsize,
    }

    impl FakeApi {
        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl BoardApi for FakeApi {
        async fn list_boards(
            &self,
            _limit: Option<u64>,
            _cursor: Option<&str>,
        ) -> Result<Value, Error> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(json!({ "data": [{ "id": "B1", "name": "Planning" }] }))
        }

        async fn get_board(&self, _board_id: &str) -> Result<Value, Error> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(json!({ "id": "B1", "name": "Planning" }))
        }

        async fn list_items(
            &self,
            _board_id: &str,
            _filter: &ItemFilter,
        ) -> Result<Value, Error> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(json!({ "data": [] }))
        }

        async fn get_item(&self, _board_id: &str, _item_id: &str) -> Result<Value, Error> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(json!({ "id": "i1" }))
        }

        async fn create_item(
            &self,
            _board_id: &str,
            _kind: ItemKind,
            _payload: Value,
        ) -> Result<Value, Error> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(json!({ "id": "new-item" }))
        }

        async fn update_item(
            &self,
            _board_id: &str,
            _kind: ItemKind,
            _item_id: &str,
            _payload: Value,
        ) -> Result<Value, Error> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(json!({ "id": "i1" }))
        }

        async fn delete_item(&self, _board_id: &str, _item_id: &str) -> Result<(), Error> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn bulk_create(&self, _board_id: &str, items: Vec<Value>) -> Result<Value, Error> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(json!({ "data": items }))
        }
    }

    fn test_config() -> Config {
        Config::resolve(
            Some("test-token".to_string()),
            DEFAULT_BASE_URL.to_string(),
            None,
        )
        .unwrap()
    }

    fn request(id: i64, method: &str, params: Value) -> JsonRpcRequest {
        JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: RequestId::Number(id),
            method: method.to_string(),
            params: Some(params),
        }
    }

    async fn running_server() -> McpServer {
        let mut server = McpServer::new(test_config(), Box::<FakeApi>::default());
        let init = request(1, "initialize", json!({ "protocolVersion": "2024-11-05" }));
        server.dispatch_request(&init).await.unwrap();
        server.handle_notification(&JsonRpcNotification {
            jsonrpc: "2.0".to_string(),
            method: "notifications/initialized".to_string(),
            params: None,
        });
        assert_eq!(server.state(), ServerState::Running);
        server
    }

    #[tokio::test]
    async fn initialize_advertises_all_capabilities() {
        let mut server = McpServer::new(test_config(), Box::<FakeApi>::default());
        let init = request(1, "initialize", json!({ "protocolVersion": "2024-11-05" }));
        let resp = server.dispatch_request(&init).await.unwrap();

        assert_eq!(resp.result["protocolVersion"], MCP_PROTOCOL_VERSION);
        assert!(resp.result["capabilities"].get("tools").is_some());
        assert!(resp.result["capabilities"].get("resources").is_some());
        assert!(resp.result["capabilities"].get("prompts").is_some());
        assert_eq!(resp.result["serverInfo"]["name"], SERVER_NAME);
    }

    #[tokio::test]
    async fn requests_rejected_before_initialisation() {
        let mut server = McpServer::new(test_config(), Box::<FakeApi>::default());
        let req = request(1, "tools/list", json!({}));
        let err = server.dispatch_request(&req).await.unwrap_err();
        assert_eq!(err.error.code, ErrorCode::InvalidRequest.code());
    }

    #[tokio::test]
    async fn tools_list_contains_bulk_tools() {
        let mut server = running_server().await;
        let req = request(2, "tools/list", json!({}));
        let resp = server.dispatch_request(&req).await.unwrap();

        let names: Vec<&str> = resp.result["tools"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|t| t["name"].as_str())
            .collect();
        assert!(names.contains(&"bulk_create_items"));
        assert!(names.contains(&"bulk_delete_items"));
        assert!(names.contains(&"create_sticky_note"));
    }

    #[tokio::test]
    async fn unknown_tool_reported_as_error_result() {
        let mut server = running_server().await;
        let req = request(
            3,
            "tools/call",
            json!({ "name": "frobnicate", "arguments": {} }),
        );
        let resp = server.dispatch_request(&req).await.unwrap();

        assert_eq!(resp.result["isError"], true);
        let text = resp.result["content"][0]["text"].as_str().unwrap();
        assert!(text.contains("Unknown tool"));
    }

    #[tokio::test]
    async fn resources_list_maps_boards_to_uris() {
        let mut server = running_server().await;
        let req = request(4, "resources/list", json!({}));
        let resp = server.dispatch_request(&req).await.unwrap();

        let resource = &resp.result["resources"][0];
        assert_eq!(resource["uri"], "miro://board/B1");
        assert_eq!(resource["name"], "Planning");
        assert_eq!(resource["mimeType"], "application/json");
    }

    #[tokio::test]
    async fn resources_read_rejects_bad_scheme_offline() {
        let mut server = running_server().await;
        let req = request(
            5,
            "resources/read",
            json!({ "uri": "https://example.test/B1" }),
        );
        let err = server.dispatch_request(&req).await.unwrap_err();
        assert_eq!(err.error.code, ErrorCode::InvalidParams.code());
    }

    #[tokio::test]
    async fn bad_resource_uri_issues_no_network_call() {
        let api = FakeApi::default();
        let err = resources::read(&api, "board/B1").await.unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
        assert_eq!(api.call_count(), 0);
    }

    #[tokio::test]
    async fn prompts_list_and_get() {
        let mut server = running_server().await;

        let list = request(6, "prompts/list", json!({}));
        let resp = server.dispatch_request(&list).await.unwrap();
        assert_eq!(resp.result["prompts"][0]["name"], prompts::PROMPT_NAME);

        let get = request(7, "prompts/get", json!({ "name": prompts::PROMPT_NAME }));
        let resp = server.dispatch_request(&get).await.unwrap();
        let text = resp.result["messages"][0]["content"]["text"]
            .as_str()
            .unwrap();
        assert!(!text.is_empty());
    }

    #[tokio::test]
    async fn unknown_prompt_rejected() {
        let mut server = running_server().await;
        let req = request(8, "prompts/get", json!({ "name": "missing" }));
        let err = server.dispatch_request(&req).await.unwrap_err();
        assert_eq!(err.error.code, ErrorCode::InvalidParams.code());
    }

    #[tokio::test]
    async fn unknown_method_not_found() {
        let mut server = running_server().await;
        let req = request(9, "boards/teleport", json!({}));
        let err = server.dispatch_request(&req).await.unwrap_err();
        assert_eq!(err.error.code, ErrorCode::MethodNotFound.code());
    }

    #[tokio::test]
    async fn ping_always_answers() {
        let mut server = running_server().await;
        let req = request(10, "ping", json!({}));
        let resp = server.dispatch_request(&req).await.unwrap();
        assert_eq!(resp.result, json!({}));
    }
}
