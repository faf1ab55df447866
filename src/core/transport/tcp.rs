//! TCP transport implementation.
//!
//! Raw TCP socket transport with line-delimited JSON-RPC messages. Clients
//! are served one at a time: the next connection is accepted only after the
//! current one closes.

use tokio::io::BufReader;
use tokio::net::{TcpListener, TcpStream};
use tracing::{info, warn};

use super::{TransportError, TransportResult, config::TcpConfig};
use crate::core::McpServer;

/// TCP transport handler.
pub struct TcpTransport {
    config: TcpConfig,
}

impl TcpTransport {
    /// Create a new TCP transport with the given config.
    pub fn new(config: TcpConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Run the TCP transport.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.address();

        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        info!("Ready - listening on {} (JSON-RPC over TCP)", addr);
        Self::accept_loop(listener, server).await
    }

    async fn accept_loop(listener: TcpListener, server: McpServer) -> TransportResult<()> {
        loop {
            match listener.accept().await {
                Ok((stream, peer_addr)) => {
                    info!("Accepted connection from {}", peer_addr);
                    Self::handle_connection(&server, stream, peer_addr).await;
                }
                Err(e) => {
                    warn!("Failed to accept connection: {}", e);
                    // Small delay to avoid spinning on persistent errors
                    tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
                }
            }
        }
    }

    /// Serve a single TCP connection until it closes.
    async fn handle_connection(
        server: &McpServer,
        stream: TcpStream,
        peer_addr: std::net::SocketAddr,
    ) {
        // Set TCP_NODELAY to disable Nagle's algorithm
        if let Err(e) = stream.set_nodelay(true) {
            warn!("Failed to set TCP_NODELAY for {}: {}", peer_addr, e);
        }

        let (reader, writer) = stream.into_split();
        match server.serve(BufReader::new(reader), writer).await {
            Ok(()) => info!("Client {} disconnected cleanly", peer_addr),
            Err(e) => warn!("Error while serving client {}: {}", peer_addr, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ServerContext;
    use crate::core::config::ServerConfig;
    use crate::domains::prompts::DirectorySource;
    use std::sync::Arc;
    use tempfile::TempDir;
    use tokio::io::{AsyncBufReadExt, AsyncWriteExt};

    #[tokio::test]
    async fn test_tcp_round_trip() {
        let dir = TempDir::new().unwrap();
        let ctx = ServerContext::init(Arc::new(DirectorySource::new(dir.path()))).unwrap();
        let server = McpServer::new(
            ServerConfig {
                name: "tcp-test".to_string(),
                version: "0.0.1".to_string(),
            },
            ctx,
        );

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let task = tokio::spawn(TcpTransport::accept_loop(listener, server));

        let stream = TcpStream::connect(addr).await.unwrap();
        let (reader, mut writer) = stream.into_split();
        writer
            .write_all(b"{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"tools/list\"}\n")
            .await
            .unwrap();

        let mut line = String::new();
        BufReader::new(reader).read_line(&mut line).await.unwrap();
        let response: serde_json::Value = serde_json::from_str(line.trim()).unwrap();
        assert_eq!(response["id"], serde_json::json!(1));
        assert_eq!(response["result"]["tools"].as_array().unwrap().len(), 2);

        task.abort();
    }
}
