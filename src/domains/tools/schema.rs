//! Tool metadata as exposed by `tools/list`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Schema entry for a single tool parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSpec {
    #[serde(rename = "type")]
    pub kind: String,

    pub description: String,

    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,
}

impl ParameterSpec {
    pub fn new(kind: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        Self {
            kind: kind.into(),
            description: description.into(),
            required,
        }
    }
}

/// JSON-schema-like description of a tool's input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSchema {
    #[serde(rename = "type")]
    pub kind: String,

    pub properties: BTreeMap<String, ParameterSpec>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
}

impl InputSchema {
    /// Build an object schema; `required` lists the required parameters.
    pub fn from_parameters(parameters: &BTreeMap<String, ParameterSpec>) -> Self {
        Self {
            kind: "object".to_string(),
            required: parameters
                .iter()
                .filter(|(_, spec)| spec.required)
                .map(|(name, _)| name.clone())
                .collect(),
            properties: parameters.clone(),
        }
    }
}

/// One entry of the `tools/list` result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolInfo {
    pub name: String,
    pub description: String,
    pub input_schema: InputSchema,
}

fn is_false(value: &bool) -> bool {
    !*value
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_schema_omits_required_when_none() {
        let mut params = BTreeMap::new();
        params.insert("a".to_string(), ParameterSpec::new("string", "first", false));

        let value = serde_json::to_value(InputSchema::from_parameters(&params)).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "object",
                "properties": {"a": {"type": "string", "description": "first"}}
            })
        );
    }

    #[test]
    fn test_schema_lists_required() {
        let mut params = BTreeMap::new();
        params.insert("b".to_string(), ParameterSpec::new("string", "second", true));
        params.insert("a".to_string(), ParameterSpec::new("number", "first", false));

        let value = serde_json::to_value(InputSchema::from_parameters(&params)).unwrap();
        assert_eq!(value["required"], json!(["b"]));
        assert_eq!(value["properties"]["b"]["required"], json!(true));
        assert_eq!(value["properties"]["a"]["type"], json!("number"));
    }

    #[test]
    fn test_tool_info_uses_camel_case() {
        let info = ToolInfo {
            name: "t".to_string(),
            description: "d".to_string(),
            input_schema: InputSchema::from_parameters(&BTreeMap::new()),
        };
        let value = serde_json::to_value(info).unwrap();
        assert!(value.get("inputSchema").is_some());
    }
}
