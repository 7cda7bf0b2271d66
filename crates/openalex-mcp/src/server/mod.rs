//! MCP server implementation.
//!
//! The server owns the registered tool table and a `ToolContext` holding the
//! shared API client; it is constructed once at startup and passed to the
//! transport, so nothing lives in process-wide mutable state.

pub mod stdio;

use std::sync::Arc;

use crate::client::OpenAlexClient;
use crate::tools::{self, McpTool, ToolContext};

/// MCP server for OpenAlex.
pub struct McpServer {
    /// Tool execution context.
    ctx: ToolContext,

    /// Registered tools.
    tools: Vec<Box<dyn McpTool>>,
}

impl McpServer {
    /// Create a new MCP server.
    #[must_use]
    pub fn new(client: OpenAlexClient) -> Self {
        let ctx = ToolContext::new(Arc::new(client));
        let tools = tools::register_all_tools();

        Self { ctx, tools }
    }

    /// Run the server in stdio mode (for MCP clients like Claude Desktop).
    ///
    /// # Errors
    ///
    /// Returns error on I/O failure.
    pub async fn run_stdio(self) -> anyhow::Result<()> {
        tracing::info!("Starting MCP server in stdio mode");
        tracing::info!("Registered {} tools", self.tools.len());

        stdio::run_stdio(self.tools, self.ctx).await
    }

    /// Get tool by name.
    #[must_use]
    pub fn get_tool(&self, name: &str) -> Option<&dyn McpTool> {
        self.tools.iter().find(|t| t.name() == name).map(|t| t.as_ref())
    }

    /// List all available tools.
    #[must_use]
    pub fn list_tools(&self) -> Vec<(&str, &str)> {
        self.tools.iter().map(|t| (t.name(), t.description())).collect()
    }

    /// Get tool context for execution.
    #[must_use]
    pub const fn context(&self) -> &ToolContext {
        &self.ctx
    }
}

impl std::fmt::Debug for McpServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("McpServer").field("tools", &self.tools.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn test_server() -> McpServer {
        let client = OpenAlexClient::new(Config::for_testing("http://localhost:1")).unwrap();
        McpServer::new(client)
    }

    #[test]
    fn test_server_registers_all_tools() {
        let server = test_server();
        assert_eq!(server.list_tools().len(), 13);
    }

    #[test]
    fn test_get_tool_by_name() {
        let server = test_server();
        assert!(server.get_tool("search_works").is_some());
        assert!(server.get_tool("get_citation_network").is_some());
        assert!(server.get_tool("no_such_tool").is_none());
    }

    #[test]
    fn test_tool_names_are_unique() {
        let server = test_server();
        let mut names: Vec<&str> = server.list_tools().iter().map(|(n, _)| *n).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), server.list_tools().len());
    }
}
