//! STDIO transport implementation.
//!
//! Standard input/output transport for MCP - the default and recommended mode.

use tokio::io::BufReader;
use tracing::info;

use super::TransportResult;
use crate::core::McpServer;

/// STDIO transport handler.
pub struct StdioTransport;

impl StdioTransport {
    /// Run the STDIO transport until stdin is closed.
    pub async fn run(server: McpServer) -> TransportResult<()> {
        info!("Ready - communicating via stdin/stdout");

        let stdin = BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();
        server.serve(stdin, stdout).await?;

        info!("STDIO transport finished");
        Ok(())
    }
}
