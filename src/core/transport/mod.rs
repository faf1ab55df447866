//! Transport layer for the MCP server.
//!
//! Every transport carries line-delimited JSON-RPC over a byte stream and
//! hands both halves of the stream to [`McpServer::serve`](crate::core::McpServer::serve):
//! - **STDIO**: Standard input/output (default for MCP) - feature: `stdio`
//! - **TCP**: Raw TCP socket, one client at a time - feature: `tcp`

mod config;
mod error;
mod service;

#[cfg(feature = "tcp")]
pub mod tcp;

#[cfg(feature = "stdio")]
pub mod stdio;

pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};
pub use service::TransportService;

#[cfg(feature = "tcp")]
pub use config::TcpConfig;
