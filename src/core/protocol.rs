//! JSON-RPC envelope types.
//!
//! One request or response per line. Error codes are the standard JSON-RPC
//! reserved codes, taken from rmcp.

use rmcp::model::ErrorCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Protocol version tag written on every response.
pub const JSONRPC_VERSION: &str = "2.0";

/// MCP protocol revision reported by `initialize`.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

pub const PARSE_ERROR: i32 = ErrorCode::PARSE_ERROR.0;
pub const METHOD_NOT_FOUND: i32 = ErrorCode::METHOD_NOT_FOUND.0;
pub const INVALID_PARAMS: i32 = ErrorCode::INVALID_PARAMS.0;
pub const INTERNAL_ERROR: i32 = ErrorCode::INTERNAL_ERROR.0;

/// JSON-RPC request structure.
///
/// `jsonrpc` is accepted but not checked; `id` is absent for notifications.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    #[serde(default)]
    pub jsonrpc: Option<String>,
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

/// JSON-RPC response structure.
///
/// `id` is always written; it is `null` when the request had none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcResponse {
    /// Create a success response.
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: id.unwrap_or(Value::Null),
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response.
    pub fn error(
        id: Option<Value>,
        code: i32,
        message: impl Into<String>,
        data: Option<Value>,
    ) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: id.unwrap_or(Value::Null),
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
                data,
            }),
        }
    }

    /// Parse error; the request id is unknown.
    pub fn parse_error(detail: impl Into<String>) -> Self {
        Self::error(None, PARSE_ERROR, "Parse error", Some(Value::String(detail.into())))
    }

    /// Method not found error.
    pub fn method_not_found(id: Option<Value>, method: &str) -> Self {
        Self::error(
            id,
            METHOD_NOT_FOUND,
            "Method not found",
            Some(Value::String(format!("Unknown method: {method}"))),
        )
    }

    /// Invalid params error.
    pub fn invalid_params(id: Option<Value>, detail: impl Into<String>) -> Self {
        Self::error(id, INVALID_PARAMS, "Invalid params", Some(Value::String(detail.into())))
    }

    /// Internal error.
    pub fn internal_error(id: Option<Value>, detail: impl Into<String>) -> Self {
        Self::error(id, INTERNAL_ERROR, "Internal error", Some(Value::String(detail.into())))
    }
}
