//! MCP Server Entry Point
//!
//! Initializes logging, loads configuration, loads the prompt templates and
//! starts the server with the configured transport.

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

use prompt_mcp_server::core::{Config, McpServer, ServerContext, TransportService};
use prompt_mcp_server::domains::prompts::DirectorySource;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from environment
    let config = Config::from_env();

    // Initialize logging
    init_logging(&config.logging.level);

    info!("Starting {} v{}", config.server.name, config.server.version);

    let directory = &config.prompts.directory;
    std::fs::create_dir_all(directory).with_context(|| {
        format!("failed to create prompts directory {}", directory.display())
    })?;

    let context = ServerContext::init(Arc::new(DirectorySource::new(directory)))
        .context("failed to load prompt templates")?;

    if config.prompts.watch {
        context.watch(config.prompts.poll_interval());
        info!(
            "Watching {} for changes every {}ms",
            directory.display(),
            config.prompts.poll_interval_ms
        );
    }

    let server = McpServer::new(config.server.clone(), Arc::clone(&context));

    info!("Server initialized");

    let transport = TransportService::new(config.transport);
    let outcome = transport.run(server).await;

    info!("Server shutting down");
    context.shutdown();

    outcome?;
    Ok(())
}

/// Initialize the logging subsystem.
///
/// Logs go to stderr; stdout carries the protocol stream.
fn init_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
