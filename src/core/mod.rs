//! Core module containing shared infrastructure components.
//!
//! This module provides the foundational building blocks for the MCP server:
//! configuration, error handling, the JSON-RPC protocol engine, the shared
//! server context and the transport layer.

pub mod config;
pub mod context;
pub mod error;
pub mod protocol;
pub mod server;
pub mod transport;

pub use config::Config;
pub use context::ServerContext;
pub use error::{Error, Result};
pub use server::McpServer;
pub use transport::{TransportConfig, TransportService};
