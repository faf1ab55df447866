//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - A thread-safe map of tool name to tool
//! - Atomic replacement of the template-backed tools after a reload
//! - Tool metadata for listing and dispatch for calls

use parking_lot::RwLock;
use rmcp::model::CallToolResult;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

use super::definitions::{GetPromptNamesTool, ReloadPromptsTool};
use super::error::ToolError;
use super::handlers::{Handler, ToolContext};
use super::schema::{InputSchema, ParameterSpec, ToolInfo};
use crate::domains::prompts::Arguments;

// ============================================================================
// Tool
// ============================================================================

/// A registered, callable tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tool {
    pub name: String,
    pub description: String,
    pub parameters: BTreeMap<String, ParameterSpec>,
    pub handler: Option<Handler>,
}

impl Tool {
    /// Create a tool without parameters or handler.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: BTreeMap::new(),
            handler: None,
        }
    }

    pub fn with_parameters(mut self, parameters: BTreeMap<String, ParameterSpec>) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn with_handler(mut self, handler: Handler) -> Self {
        self.handler = Some(handler);
        self
    }

    /// Metadata as exposed by `tools/list`.
    pub fn info(&self) -> ToolInfo {
        ToolInfo {
            name: self.name.clone(),
            description: self.description.clone(),
            input_schema: InputSchema::from_parameters(&self.parameters),
        }
    }

    pub fn is_template_backed(&self) -> bool {
        self.handler.as_ref().is_some_and(Handler::is_template)
    }

    fn validate(&self) -> Result<(), ToolError> {
        if self.name.is_empty() {
            return Err(ToolError::invalid_tool("tool name cannot be empty"));
        }
        if self.handler.is_none() {
            return Err(ToolError::invalid_tool(format!(
                "tool '{}' has no handler",
                self.name
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - owns every tool exposed by the server.
///
/// Reads take a shared lock and whole-set replacements an exclusive one, so
/// a listing never mixes tools from two template generations.
#[derive(Debug, Default)]
pub struct ToolRegistry {
    tools: RwLock<HashMap<String, Tool>>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in management tools.
    pub fn with_builtins() -> Result<Self, ToolError> {
        let registry = Self::new();
        for tool in Self::builtin_tools() {
            registry.register(tool)?;
        }
        Ok(registry)
    }

    /// The built-in management tools.
    pub fn builtin_tools() -> Vec<Tool> {
        vec![ReloadPromptsTool::to_tool(), GetPromptNamesTool::to_tool()]
    }

    /// Register a tool, replacing any tool of the same name.
    pub fn register(&self, tool: Tool) -> Result<(), ToolError> {
        tool.validate()?;
        debug!("Registering tool: {}", tool.name);
        self.tools.write().insert(tool.name.clone(), tool);
        Ok(())
    }

    /// Swap in a new set of template-backed tools.
    ///
    /// All previously registered template tools are removed in the same
    /// critical section. A tool whose name belongs to a built-in is skipped.
    /// Returns the number of tools inserted.
    pub fn replace_template_tools(&self, tools: Vec<Tool>) -> Result<usize, ToolError> {
        for tool in &tools {
            tool.validate()?;
        }

        let mut map = self.tools.write();
        map.retain(|_, tool| !tool.is_template_backed());

        let mut inserted = 0;
        for tool in tools {
            if map.contains_key(&tool.name) {
                warn!(
                    "Prompt '{}' collides with a built-in tool, skipping",
                    tool.name
                );
                continue;
            }
            map.insert(tool.name.clone(), tool);
            inserted += 1;
        }

        Ok(inserted)
    }

    /// Get a tool by name.
    pub fn get(&self, name: &str) -> Option<Tool> {
        self.tools.read().get(name).cloned()
    }

    /// Metadata for every tool, sorted by name.
    pub fn list(&self) -> Vec<ToolInfo> {
        let mut infos: Vec<ToolInfo> = self.tools.read().values().map(Tool::info).collect();
        infos.sort_by(|a, b| a.name.cmp(&b.name));
        infos
    }

    /// All tool names, sorted.
    pub fn tool_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.tools.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every tool.
    pub fn clear(&self) {
        self.tools.write().clear();
    }

    /// Call a tool by name.
    ///
    /// The handler is cloned out of the registry before it runs, so a handler
    /// may itself replace registry contents (as `reload_prompts` does).
    pub fn call(
        &self,
        name: &str,
        arguments: &Arguments,
        ctx: &dyn ToolContext,
    ) -> Result<CallToolResult, ToolError> {
        let handler = self
            .tools
            .read()
            .get(name)
            .and_then(|tool| tool.handler.clone());

        let Some(handler) = handler else {
            warn!("Unknown tool requested: {}", name);
            return Err(ToolError::not_found(name));
        };

        handler.invoke(arguments, ctx)
    }
}
