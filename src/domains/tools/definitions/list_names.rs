//! Get prompt names tool definition.

use rmcp::model::CallToolResult;
use tracing::info;

use crate::domains::tools::handlers::{BuiltIn, Handler, ToolContext, text_result};
use crate::domains::tools::registry::Tool;

/// Lists the names of all loaded prompts, one per line.
pub struct GetPromptNamesTool;

impl GetPromptNamesTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_prompt_names";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get the names of all available prompts";

    pub fn to_tool() -> Tool {
        Tool::new(Self::NAME, Self::DESCRIPTION).with_handler(Handler::BuiltIn(BuiltIn::ListNames))
    }

    pub fn execute(ctx: &dyn ToolContext) -> CallToolResult {
        let mut names = ctx.template_names();
        names.sort();
        info!("Listing {} prompt names", names.len());

        text_result(names.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::testing::StaticContext;
    use crate::domains::tools::handlers::result_text;

    #[test]
    fn test_names_sorted_and_newline_joined() {
        let ctx = StaticContext::default()
            .with_template("zeta", "z")
            .with_template("alpha", "a");

        let result = GetPromptNamesTool::execute(&ctx);
        assert_eq!(result_text(&result), "alpha\nzeta");
    }

    #[test]
    fn test_no_names_yields_empty_text() {
        let result = GetPromptNamesTool::execute(&StaticContext::default());
        assert_eq!(result_text(&result), "");
    }
}
