//! Tool handlers.
//!
//! A handler is plain data: either the name of the template it renders or a
//! built-in operation. It is resolved against a [`ToolContext`] when the tool
//! is called, so a call always sees the current template generation.

use rmcp::model::{CallToolResult, Content};
use std::sync::Arc;

use super::definitions::{GetPromptNamesTool, PromptTool, ReloadPromptsTool};
use super::error::ToolError;
use crate::domains::prompts::{Arguments, Template};

/// Built-in management operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltIn {
    /// Reload every template from the definition source.
    Reload,
    /// List the loaded template names.
    ListNames,
}

/// What a tool does when called.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Handler {
    /// Render the template with this name.
    Template(String),
    BuiltIn(BuiltIn),
}

/// Summary of a completed reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReloadOutcome {
    /// Templates now loaded.
    pub prompts: usize,
    /// Template-backed tools now registered.
    pub tools: usize,
    /// Definitions skipped during the load.
    pub skipped: usize,
}

/// State a handler may consult while running.
pub trait ToolContext {
    /// Look up a template from the current generation.
    fn template(&self, name: &str) -> Option<Arc<Template>>;

    /// Names of all loaded templates.
    fn template_names(&self) -> Vec<String>;

    /// Reload templates from the source and re-register their tools.
    fn reload(&self) -> crate::Result<ReloadOutcome>;
}

impl Handler {
    /// Run the handler.
    pub fn invoke(
        &self,
        arguments: &Arguments,
        ctx: &dyn ToolContext,
    ) -> Result<CallToolResult, ToolError> {
        match self {
            Self::Template(name) => PromptTool::execute(name, arguments, ctx),
            Self::BuiltIn(BuiltIn::Reload) => Ok(ReloadPromptsTool::execute(ctx)),
            Self::BuiltIn(BuiltIn::ListNames) => Ok(GetPromptNamesTool::execute(ctx)),
        }
    }

    pub fn is_template(&self) -> bool {
        matches!(self, Self::Template(_))
    }
}

/// Wrap text as a successful tool result (`isError: false`).
pub fn text_result(text: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text.into())])
}

/// Extract the first text block of a tool result.
#[cfg(test)]
pub(crate) fn result_text(result: &CallToolResult) -> String {
    let value = serde_json::to_value(result).unwrap_or_default();
    value["content"][0]["text"]
        .as_str()
        .unwrap_or_default()
        .to_string()
}
