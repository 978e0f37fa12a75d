//! MCP protocol implementation: JSON-RPC messages, stdio transport, and the
//! request/response server loop.

pub mod protocol;
pub mod server;
pub mod transport;
