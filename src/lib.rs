//! Prompt template MCP server library.
//!
//! Prompt templates are read from YAML or JSON files and exposed to MCP
//! clients as tools. Calling a template tool substitutes the supplied
//! arguments into the template's message text and returns the result.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the JSON-RPC protocol engine,
//!   the shared server context and the transports
//! - **domains**: business logic organized by bounded contexts
//!   - **prompts**: template models, loading, storage, rendering and hot reload
//!   - **tools**: the tool registry and the template and management tools
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use prompt_mcp_server::core::{Config, McpServer, ServerContext, TransportService};
//! use prompt_mcp_server::domains::prompts::DirectorySource;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let source = DirectorySource::new(&config.prompts.directory);
//!     let context = ServerContext::init(Arc::new(source))?;
//!     let server = McpServer::new(config.server.clone(), context);
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result, ServerContext};
