//! MCP Server implementation - the protocol engine.
//!
//! The engine reads one JSON-RPC request per line, dispatches it by method
//! and writes at most one response line before reading the next request.
//! Every protocol-level failure becomes an error response; only stream I/O
//! errors end the loop.

use serde::Deserialize;
use serde_json::{Map, Value, json};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, instrument, warn};

use super::config::ServerConfig;
use super::context::ServerContext;
use super::protocol::{JsonRpcRequest, JsonRpcResponse, PROTOCOL_VERSION};
use super::transport::TransportResult;

/// Parameters of a `tools/call` request.
#[derive(Debug, Deserialize)]
struct CallToolParams {
    name: String,
    #[serde(default)]
    arguments: Option<Map<String, Value>>,
}

/// The main MCP server handler.
///
/// Cheap to clone; all clones share the same [`ServerContext`].
#[derive(Clone)]
pub struct McpServer {
    /// Server identification.
    info: ServerConfig,

    /// Template store and tool registry.
    context: Arc<ServerContext>,
}

impl McpServer {
    /// Create a new MCP server over the given context.
    pub fn new(info: ServerConfig, context: Arc<ServerContext>) -> Self {
        Self { info, context }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.info.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.info.version
    }

    pub fn context(&self) -> &Arc<ServerContext> {
        &self.context
    }

    /// Serve requests from `reader` until end of stream.
    ///
    /// Each request is fully handled and its response flushed before the
    /// next line is read.
    pub async fn serve<R, W>(&self, mut reader: R, mut writer: W) -> TransportResult<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut line = Vec::new();

        loop {
            line.clear();
            if reader.read_until(b'\n', &mut line).await? == 0 {
                info!("Received EOF, shutting down...");
                break;
            }

            let Some(response) = self.handle_line(&line) else {
                continue;
            };

            let mut out = serde_json::to_vec(&response)?;
            out.push(b'\n');
            writer.write_all(&out).await?;
            writer.flush().await?;
        }

        Ok(())
    }

    /// Handle one raw input line. Returns `None` when nothing is to be sent.
    pub fn handle_line(&self, line: &[u8]) -> Option<JsonRpcResponse> {
        let line = match std::str::from_utf8(line) {
            Ok(s) => s.trim(),
            Err(e) => {
                warn!("Received non UTF-8 input: {}", e);
                return Some(JsonRpcResponse::parse_error(e.to_string()));
            }
        };

        if line.is_empty() {
            return None;
        }

        match serde_json::from_str::<JsonRpcRequest>(line) {
            Ok(request) => self.handle_request(request),
            Err(e) => {
                warn!("Failed to parse request: {}", e);
                Some(JsonRpcResponse::parse_error(e.to_string()))
            }
        }
    }

    /// Dispatch a decoded request by method.
    #[instrument(skip_all, fields(method = %request.method))]
    pub fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        debug!("Received JSON-RPC request");

        match request.method.as_str() {
            "initialize" => Some(self.handle_initialize(request)),
            "tools/list" => Some(self.handle_tools_list(request)),
            "tools/call" => Some(self.handle_tools_call(request)),
            "notifications/initialized" => {
                info!("Client sent initialized notification");
                None
            }
            method => {
                warn!("Unknown method: {}", method);
                Some(JsonRpcResponse::method_not_found(request.id, method))
            }
        }
    }

    fn handle_initialize(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let client = request
            .params
            .as_ref()
            .and_then(|p| p.get("clientInfo"))
            .and_then(|c| c.get("name"))
            .and_then(Value::as_str)
            .unwrap_or("unknown");
        info!("Processing initialize request from {}", client);

        let result = json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "tools": {}
            },
            "serverInfo": {
                "name": self.name(),
                "version": self.version()
            }
        });

        JsonRpcResponse::success(request.id, result)
    }

    fn handle_tools_list(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let tools = self.context.registry().list();
        info!("Processing tools/list request ({} tools)", tools.len());

        JsonRpcResponse::success(request.id, json!({ "tools": tools }))
    }

    fn handle_tools_call(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let Some(params) = request.params else {
            return JsonRpcResponse::invalid_params(request.id, "Missing params");
        };

        let params: CallToolParams = match serde_json::from_value(params) {
            Ok(p) => p,
            Err(e) => return JsonRpcResponse::invalid_params(request.id, e.to_string()),
        };

        info!("Processing tools/call request for {}", params.name);
        let arguments = params.arguments.unwrap_or_default();

        match self.context.call_tool(&params.name, &arguments) {
            Ok(result) => match serde_json::to_value(result) {
                Ok(value) => JsonRpcResponse::success(request.id, value),
                Err(e) => JsonRpcResponse::internal_error(request.id, e.to_string()),
            },
            Err(e) => {
                warn!("Tool call failed: {}", e);
                JsonRpcResponse::internal_error(request.id, e.to_string())
            }
        }
    }
}
