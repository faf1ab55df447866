//! Tool-specific error types.

use thiserror::Error;

/// Errors that can occur during tool operations.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The tool cannot be registered (empty name or no handler).
    #[error("Invalid tool: {0}")]
    InvalidTool(String),

    /// The requested tool was not found.
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// The tool handler failed.
    #[error("Execution failed: {0}")]
    ExecutionFailed(String),
}

impl ToolError {
    /// Create a new "invalid tool" error.
    pub fn invalid_tool(msg: impl Into<String>) -> Self {
        Self::InvalidTool(msg.into())
    }

    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create a new "execution failed" error.
    pub fn execution_failed(msg: impl Into<String>) -> Self {
        Self::ExecutionFailed(msg.into())
    }
}
