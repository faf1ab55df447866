//! Prompt tool definition.
//!
//! Every valid template is exposed as a tool of the same name. Calling it
//! renders the template with the call arguments.

use rmcp::model::CallToolResult;
use std::collections::BTreeMap;
use tracing::{info, instrument, warn};

use crate::domains::prompts::{Arguments, Template, render};
use crate::domains::tools::handlers::{Handler, ToolContext, text_result};
use crate::domains::tools::registry::Tool;
use crate::domains::tools::schema::ParameterSpec;
use crate::domains::tools::ToolError;

/// Template-backed tool.
pub struct PromptTool;

impl PromptTool {
    /// Derive the tool for a template.
    pub fn to_tool(template: &Template) -> Tool {
        let parameters: BTreeMap<String, ParameterSpec> = template
            .arguments
            .iter()
            .map(|arg| {
                (
                    arg.name.clone(),
                    ParameterSpec::new(&arg.kind, &arg.description, arg.required),
                )
            })
            .collect();

        Tool::new(&template.name, &template.description)
            .with_parameters(parameters)
            .with_handler(Handler::Template(template.name.clone()))
    }

    /// Render the named template from the current generation.
    #[instrument(skip_all, fields(prompt = %name))]
    pub fn execute(
        name: &str,
        arguments: &Arguments,
        ctx: &dyn ToolContext,
    ) -> Result<CallToolResult, ToolError> {
        let Some(template) = ctx.template(name) else {
            warn!("Prompt no longer available: {}", name);
            return Err(ToolError::execution_failed(format!(
                "failed to execute prompt: prompt '{name}' is no longer loaded"
            )));
        };

        info!("Rendering prompt with {} argument(s)", arguments.len());
        Ok(text_result(render(&template, arguments)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::prompts::Argument;
    use crate::domains::tools::definitions::testing::StaticContext;
    use crate::domains::tools::handlers::result_text;
    use serde_json::json;

    #[test]
    fn test_to_tool_copies_arguments() {
        let template = Template {
            name: "review".to_string(),
            description: "Review code".to_string(),
            arguments: vec![
                Argument {
                    name: "code".to_string(),
                    description: "The code".to_string(),
                    required: true,
                    kind: "string".to_string(),
                },
                Argument {
                    name: "level".to_string(),
                    description: "Depth".to_string(),
                    required: false,
                    kind: "number".to_string(),
                },
            ],
            messages: vec![],
        };

        let tool = PromptTool::to_tool(&template);
        assert_eq!(tool.name, "review");
        assert_eq!(tool.description, "Review code");
        assert_eq!(tool.handler, Some(Handler::Template("review".to_string())));
        assert!(tool.parameters["code"].required);
        assert_eq!(tool.parameters["level"].kind, "number");

        let info = tool.info();
        assert_eq!(info.input_schema.required, vec!["code".to_string()]);
    }

    #[test]
    fn test_execute_renders_current_template() {
        let ctx = StaticContext::default().with_template("greet", "Hello {{name}}!");
        let args = json!({"name": "Ann"}).as_object().cloned().unwrap();

        let result = PromptTool::execute("greet", &args, &ctx).unwrap();
        assert_eq!(result_text(&result), "Hello Ann!");
    }

    #[test]
    fn test_execute_missing_template_fails() {
        let ctx = StaticContext::default();
        let err = PromptTool::execute("gone", &Arguments::new(), &ctx).unwrap_err();
        assert!(matches!(err, ToolError::ExecutionFailed(_)));
        assert!(err.to_string().contains("gone"));
    }
}
