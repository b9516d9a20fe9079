//! External MCP server adapter
//!
//! Drives a PDF extraction server over the MCP stdio transport. The
//! whole exchange is two newline-delimited JSON-RPC messages written up
//! front (initialize, then the tool call), after which stdin is closed
//! and the process runs to completion under a timeout.
//!
//! Failures here are soft: a missing, crashing, or silent server turns
//! into an empty page list plus a warning, never an error, so one broken
//! binary cannot sink a whole benchmark run.

use crate::adapter::ExtractorAdapter;
use crate::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

const NAME: &str = "pdf-mcp";

/// Binary name probed in build directories and on PATH
const SERVER_BINARY: &str = "pdf-mcp-server";

/// MCP protocol revision announced in the initialize request
const PROTOCOL_VERSION: &str = "2024-11-05";

/// Line prefix the server prints between pages in its text output.
///
/// This is a convention of the server's human-readable rendering, not a
/// structured protocol field. A server that rewords it makes the whole
/// document collapse into one page.
const PAGE_MARKER: &str = "--- Page ";

#[derive(Serialize)]
struct McpRequest<P: Serialize> {
    jsonrpc: &'static str,
    id: i64,
    method: &'static str,
    params: P,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InitializeParams {
    protocol_version: &'static str,
    capabilities: serde_json::Map<String, serde_json::Value>,
    client_info: ClientInfo,
}

#[derive(Serialize)]
struct ClientInfo {
    name: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
struct ToolCallParams<'a> {
    name: &'static str,
    arguments: ToolArguments<'a>,
}

#[derive(Serialize)]
struct ToolArguments<'a> {
    path: &'a str,
}

#[derive(Deserialize)]
struct McpResponse {
    #[serde(default)]
    id: Option<i64>,
    #[serde(default)]
    result: Option<McpResult>,
}

#[derive(Deserialize)]
struct McpResult {
    #[serde(default)]
    content: Vec<McpContent>,
}

/// Content items come either as typed blocks or as bare strings; anything
/// else is tolerated and ignored.
#[derive(Deserialize)]
#[serde(untagged)]
enum McpContent {
    Block {
        #[serde(rename = "type", default)]
        kind: Option<String>,
        #[serde(default)]
        text: Option<String>,
    },
    Plain(String),
    Other(serde_json::Value),
}

/// Adapter that shells out to an MCP extraction server
pub struct McpAdapter {
    server: PathBuf,
    timeout: Duration,
}

impl McpAdapter {
    /// Locate a server binary and build the adapter.
    ///
    /// An explicit path is trusted as given, without an existence check; a
    /// wrong path degrades to per-document warnings instead of a startup
    /// error. Without one, the usual build output locations are probed
    /// first, then PATH. Returns `None` when no server can be found, in
    /// which case the adapter is simply not registered.
    pub fn resolve(explicit: Option<&Path>, timeout: Duration) -> Option<Self> {
        let server = find_server(explicit)?;
        Some(Self { server, timeout })
    }

    /// Path of the server binary this adapter will spawn
    pub fn server_path(&self) -> &Path {
        &self.server
    }

    async fn run_server(&self, path: &Path) -> Result<String> {
        let batch = request_batch(path)?;

        let mut cmd = Command::new(&self.server);
        cmd.stdin(Stdio::piped());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::null());
        // Without this a timed-out server would outlive the benchmark.
        cmd.kill_on_drop(true);

        let mut child = cmd.spawn().map_err(|e| {
            Error::Benchmark(format!("Failed to spawn {}: {}", self.server.display(), e))
        })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(batch.as_bytes()).await.map_err(Error::Io)?;
            // Dropping stdin closes the pipe; the server sees EOF and exits.
        }

        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return Err(Error::Benchmark(format!(
                    "Failed to wait for server: {}",
                    e
                )));
            }
            Err(_) => {
                return Err(Error::Timeout(format!(
                    "Server exceeded {:?}",
                    self.timeout
                )));
            }
        };

        // Exit status is deliberately not checked: a crashing server just
        // yields no usable response line.
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

fn find_server(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    for candidate in [
        "target/release/pdf-mcp-server",
        "target/debug/pdf-mcp-server",
    ] {
        let path = PathBuf::from(candidate);
        if path.exists() {
            return Some(path);
        }
    }
    which::which(SERVER_BINARY).ok()
}

/// Serialize the two-message request batch, newline-terminated
fn request_batch(path: &Path) -> Result<String> {
    let path_str = path.to_string_lossy();

    let initialize = McpRequest {
        jsonrpc: "2.0",
        id: 1,
        method: "initialize",
        params: InitializeParams {
            protocol_version: PROTOCOL_VERSION,
            capabilities: serde_json::Map::new(),
            client_info: ClientInfo {
                name: "pdfbench",
                version: env!("CARGO_PKG_VERSION"),
            },
        },
    };
    let tool_call = McpRequest {
        jsonrpc: "2.0",
        id: 2,
        method: "tools/call",
        params: ToolCallParams {
            name: "pdf_extract_text",
            arguments: ToolArguments { path: &path_str },
        },
    };

    Ok(format!(
        "{}\n{}\n",
        serde_json::to_string(&initialize)?,
        serde_json::to_string(&tool_call)?
    ))
}

/// Pull the tool-call reply text out of the server's stdout stream.
///
/// Servers freely interleave log lines and other responses, so every
/// line is tried independently; anything unparseable, with the wrong id,
/// without a result, or with an empty content array is skipped. Returns
/// the concatenated text of the first usable response.
fn tool_call_text(stdout: &str) -> Option<String> {
    for line in stdout.trim().lines() {
        if line.trim().is_empty() {
            continue;
        }
        let response: McpResponse = match serde_json::from_str(line) {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!(error = %e, "skipping unparseable server output line");
                continue;
            }
        };
        if response.id != Some(2) {
            continue;
        }
        let Some(result) = response.result else {
            continue;
        };
        if result.content.is_empty() {
            continue;
        }

        let mut text = String::new();
        for item in result.content {
            match item {
                McpContent::Block {
                    kind: Some(kind),
                    text: Some(part),
                } if kind == "text" => text.push_str(&part),
                McpContent::Plain(part) => text.push_str(&part),
                _ => {}
            }
        }
        return Some(text);
    }
    None
}

/// Split server text into pages at marker lines.
///
/// A marker line flushes the page accumulated so far (when non-empty) and
/// is itself dropped; every other line is kept with its newline restored.
fn split_marker_pages(text: &str) -> Vec<String> {
    let mut pages = Vec::new();
    let mut current = String::new();
    for line in text.split('\n') {
        if line.starts_with(PAGE_MARKER) {
            if !current.is_empty() {
                pages.push(std::mem::take(&mut current));
            }
        } else {
            current.push_str(line);
            current.push('\n');
        }
    }
    if !current.is_empty() {
        pages.push(current);
    }
    pages
}

#[async_trait]
impl ExtractorAdapter for McpAdapter {
    fn name(&self) -> &str {
        NAME
    }

    async fn extract_pages(&self, path: &Path) -> Result<Vec<String>> {
        match self.run_server(path).await {
            Ok(stdout) => {
                let Some(text) = tool_call_text(&stdout) else {
                    tracing::debug!(file = %path.display(), "no usable tool response from server");
                    return Ok(Vec::new());
                };
                Ok(split_marker_pages(&text))
            }
            Err(Error::Timeout(_)) => {
                eprintln!("Warning: MCP extraction timed out for {}", path.display());
                Ok(Vec::new())
            }
            Err(e) => {
                eprintln!("Warning: MCP extraction failed: {}", e);
                Ok(Vec::new())
            }
        }
    }
}
