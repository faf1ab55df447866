//! Prompt template data model.
//!
//! These types mirror the on-disk definition format (YAML or JSON) and are
//! decoded directly with serde.

use serde::{Deserialize, Serialize};

use super::error::PromptError;

/// Role that marks a message as part of the rendered output.
pub const USER_ROLE: &str = "user";

/// Content kind that carries renderable text.
pub const TEXT_CONTENT: &str = "text";

/// A named, parameterizable prompt template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    /// The unique name of the template.
    #[serde(default)]
    pub name: String,

    /// A description of what the template does.
    #[serde(default)]
    pub description: String,

    /// The arguments this template accepts, in declaration order.
    #[serde(default)]
    pub arguments: Vec<Argument>,

    /// The messages making up the template, in render order.
    #[serde(default)]
    pub messages: Vec<Message>,
}

/// A template argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub required: bool,

    /// Advisory type, copied into the tool parameter schema.
    #[serde(rename = "type", default = "default_argument_type")]
    pub kind: String,
}

/// A role-tagged template message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub role: String,

    #[serde(default)]
    pub content: Content,
}

/// Message content: a kind tag plus text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(rename = "type", default)]
    pub kind: String,

    #[serde(default)]
    pub text: String,
}

fn default_argument_type() -> String {
    "string".to_string()
}

impl Template {
    /// Check the template invariants.
    ///
    /// A template needs a non-empty name and at least one `user` message.
    pub fn validate(&self, origin: &str) -> Result<(), PromptError> {
        if self.name.is_empty() {
            return Err(PromptError::invalid(origin, "prompt name cannot be empty"));
        }

        if self.messages.is_empty() {
            return Err(PromptError::invalid(
                origin,
                "prompt must have at least one message",
            ));
        }

        if !self.messages.iter().any(|m| m.role == USER_ROLE) {
            return Err(PromptError::invalid(
                origin,
                "prompt must have at least one user message",
            ));
        }

        Ok(())
    }
}

impl Message {
    /// Create a user text message.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(USER_ROLE, text)
    }

    /// Create a text message with the given role.
    pub fn new(role: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: Content {
                kind: TEXT_CONTENT.to_string(),
                text: text.into(),
            },
        }
    }

    /// Whether this message contributes to rendered output.
    pub fn is_renderable(&self) -> bool {
        self.role == USER_ROLE && self.content.kind == TEXT_CONTENT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(messages: Vec<Message>) -> Template {
        Template {
            name: "t".to_string(),
            description: String::new(),
            arguments: vec![],
            messages,
        }
    }

    #[test]
    fn test_validate_accepts_user_message() {
        assert!(template(vec![Message::user("hi")]).validate("t.yaml").is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_name() {
        let mut t = template(vec![Message::user("hi")]);
        t.name.clear();
        let err = t.validate("t.yaml").unwrap_err();
        assert!(err.to_string().contains("name cannot be empty"));
    }

    #[test]
    fn test_validate_rejects_no_messages() {
        assert!(template(vec![]).validate("t.yaml").is_err());
    }

    #[test]
    fn test_validate_rejects_only_assistant_messages() {
        let t = template(vec![Message::new("assistant", "hello")]);
        let err = t.validate("t.yaml").unwrap_err();
        assert!(err.to_string().contains("user message"));
    }

    #[test]
    fn test_argument_type_defaults_to_string() {
        let arg: Argument = serde_json::from_str(r#"{"name":"code"}"#).unwrap();
        assert_eq!(arg.kind, "string");
        assert!(!arg.required);
    }
}
