//! miro-mcp: MCP server bridging AI assistants to Miro whiteboards
//!
//! This library exposes the Miro REST API v2 through the Model Context
//! Protocol: a typed tool/resource dispatcher that validates invocations,
//! maps them to remote operations, threads pagination cursors through
//! unchanged, and normalises every outcome into a uniform result shape.
//!
//! # Architecture
//!
//! - [`client`] — authenticated HTTP wrapper over the remote service, behind
//!   the `BoardApi` trait so tests never touch the network
//! - [`board`] — item variants and per-variant payload construction
//! - [`tools`] — tool registry, dispatch, and the bulk executor
//! - [`resources`] — boards as `miro://board/<id>` resources
//! - [`prompts`] — the static usage prompt
//! - [`mcp`] — JSON-RPC protocol, stdio transport, server lifecycle
//! - [`config`] — immutable startup configuration
//! - [`error`] — error taxonomy
//!
//! The process is stateless across invocations: only the (token, base URL)
//! configuration captured at startup outlives a single request.

pub mod board;
pub mod client;
pub mod config;
pub mod error;
pub mod mcp;
pub mod prompts;
pub mod resources;
pub mod tools;
