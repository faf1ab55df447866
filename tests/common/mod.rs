#![allow(dead_code)]

use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

/// A server process speaking line-delimited JSON-RPC over stdio.
pub struct ServerProcess {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
}

impl ServerProcess {
    pub fn spawn(prompts_dir: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let mut child = Command::new(env!("CARGO_BIN_EXE_prompt_mcp_server"))
            .env("MCP_PROMPTS_DIR", prompts_dir)
            .env("MCP_PROMPTS_WATCH", "false")
            .env("MCP_SERVER_NAME", "prompt-test-server")
            .env("MCP_TRANSPORT", "stdio")
            .env("MCP_LOG_LEVEL", "error")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()?;

        let stdin = child.stdin.take().expect("stdin available");
        let stdout = BufReader::new(child.stdout.take().expect("stdout available"));
        Ok(Self {
            child,
            stdin,
            stdout,
        })
    }

    pub fn send_raw(&mut self, line: &str) -> Result<(), Box<dyn std::error::Error>> {
        writeln!(self.stdin, "{line}")?;
        self.stdin.flush()?;
        Ok(())
    }

    pub fn read_response(&mut self) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
        let mut line = String::new();
        self.stdout.read_line(&mut line)?;
        Ok(serde_json::from_str(line.trim())?)
    }

    pub fn request(
        &mut self,
        request: serde_json::Value,
    ) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
        self.send_raw(&serde_json::to_string(&request)?)?;
        self.read_response()
    }

    /// Close stdin and wait for the server to exit on its own.
    pub fn finish(mut self) -> Result<std::process::ExitStatus, Box<dyn std::error::Error>> {
        drop(self.stdin);
        Ok(self.child.wait()?)
    }
}

const GREETING_YAML: &str = r#"name: greeting
description: Greet someone
arguments:
  - name: name
    description: Who to greet
    required: true
messages:
  - role: user
    content:
      type: text
      text: "Hello {{name}}!"
"#;

pub fn write_greeting(dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::write(dir.join("greeting.yaml"), GREETING_YAML)?;
    Ok(())
}
