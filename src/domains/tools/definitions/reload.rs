//! Reload prompts tool definition.

use rmcp::model::CallToolResult;
use tracing::{info, warn};

use crate::domains::tools::handlers::{BuiltIn, Handler, ToolContext, text_result};
use crate::domains::tools::registry::Tool;

/// Reloads every prompt from the definition source.
///
/// Failures are reported in the tool output, never as protocol errors.
pub struct ReloadPromptsTool;

impl ReloadPromptsTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "reload_prompts";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Reload all prompt templates from the prompts directory";

    pub fn to_tool() -> Tool {
        Tool::new(Self::NAME, Self::DESCRIPTION).with_handler(Handler::BuiltIn(BuiltIn::Reload))
    }

    pub fn execute(ctx: &dyn ToolContext) -> CallToolResult {
        info!("Reload prompts tool called");

        let text = match ctx.reload() {
            Ok(outcome) if outcome.skipped > 0 => format!(
                "Successfully reloaded {} prompts ({} definitions skipped).",
                outcome.prompts, outcome.skipped
            ),
            Ok(outcome) => format!("Successfully reloaded {} prompts.", outcome.prompts),
            Err(e) => {
                warn!("Reload failed: {}", e);
                format!("Reload failed: {e}")
            }
        };

        text_result(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::ReloadOutcome;
    use crate::domains::tools::definitions::testing::StaticContext;
    use crate::domains::tools::handlers::result_text;

    #[test]
    fn test_reload_reports_count() {
        let ctx = StaticContext::default()
            .with_template("a", "A")
            .with_template("b", "B");

        let result = ReloadPromptsTool::execute(&ctx);
        assert_eq!(result_text(&result), "Successfully reloaded 2 prompts.");
        assert_eq!(*ctx.reloads.lock(), 1);
    }

    #[test]
    fn test_reload_reports_skipped() {
        let ctx = StaticContext {
            reload_result: Some(Ok(ReloadOutcome {
                prompts: 3,
                tools: 3,
                skipped: 2,
            })),
            ..Default::default()
        };

        let text = result_text(&ReloadPromptsTool::execute(&ctx));
        assert!(text.contains("3 prompts"));
        assert!(text.contains("2 definitions skipped"));
    }

    #[test]
    fn test_reload_failure_is_tool_output() {
        let ctx = StaticContext {
            reload_result: Some(Err("directory vanished".to_string())),
            ..Default::default()
        };

        let result = ReloadPromptsTool::execute(&ctx);
        let text = result_text(&result);
        assert!(text.starts_with("Reload failed"));
        assert!(text.contains("directory vanished"));
    }
}
