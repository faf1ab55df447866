//! Tools domain module.
//!
//! This module handles all tool-related functionality for the MCP server.
//! Tools are the callable units exposed to MCP clients: one per prompt
//! template plus a few built-in management tools.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool kind)
//! - `handlers.rs` - Tagged handlers resolved at call time
//! - `registry.rs` - Central tool registry and dispatch
//! - `schema.rs` - Tool metadata for `tools/list`
//! - `error.rs` - Tool-specific error types

pub mod definitions;
mod error;
mod handlers;
mod registry;
pub mod schema;

pub use error::ToolError;
pub use handlers::{BuiltIn, Handler, ReloadOutcome, ToolContext, text_result};
pub use registry::{Tool, ToolRegistry};
pub use schema::{InputSchema, ParameterSpec, ToolInfo};

#[cfg(test)]
pub(crate) use handlers::result_text;
