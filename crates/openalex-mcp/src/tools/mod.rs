//! MCP tool implementations.
//!
//! Each tool:
//! 1. Validates the raw argument bag, aggregating every violation
//! 2. Deserializes into a typed input model
//! 3. Calls the OpenAlex client
//! 4. Projects results into the summary or detail tier and serializes JSON

mod bibliometrics;
mod discovery;
mod enrichment;
mod networks;
mod validation;

pub use bibliometrics::*;
pub use discovery::*;
pub use enrichment::*;
pub use networks::*;
pub use validation::Validator;

use std::sync::Arc;

use serde_json::json;

use crate::client::OpenAlexClient;
use crate::error::ToolResult;
use crate::formatters;
use crate::models::{ListResponse, Work};

/// Tool execution context.
pub struct ToolContext {
    /// API client.
    pub client: Arc<OpenAlexClient>,
}

impl ToolContext {
    /// Create a new tool context.
    #[must_use]
    pub fn new(client: Arc<OpenAlexClient>) -> Self {
        Self { client }
    }
}

/// Trait for MCP tools.
#[async_trait::async_trait]
pub trait McpTool: Send + Sync {
    /// Tool name (e.g. "search_works").
    fn name(&self) -> &'static str;

    /// Tool description for the LLM.
    fn description(&self) -> &'static str;

    /// JSON Schema for input parameters.
    fn input_schema(&self) -> serde_json::Value;

    /// Execute the tool with given input.
    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String>;
}

/// Serialize a work list response: summaries when paginated, buckets when grouped.
pub(crate) fn render_work_list(result: &ListResponse<Work>) -> ToolResult<String> {
    let payload = match &result.group_by {
        Some(groups) => json!({
            "meta": result.meta,
            "group_by": groups,
        }),
        None => json!({
            "meta": result.meta,
            "results": result.results.iter().map(formatters::work_summary).collect::<Vec<_>>(),
        }),
    };

    Ok(serde_json::to_string_pretty(&payload)?)
}

/// Register all tools.
#[must_use]
pub fn register_all_tools() -> Vec<Box<dyn McpTool>> {
    vec![
        // Discovery tools (4)
        Box::new(discovery::SearchWorksTool),
        Box::new(discovery::SearchEntitiesTool),
        Box::new(discovery::AutocompleteTool),
        Box::new(discovery::FindSimilarWorksTool),
        // Enrichment tools (4)
        Box::new(enrichment::GetWorkTool),
        Box::new(enrichment::GetAuthorTool),
        Box::new(enrichment::GetEntityTool),
        Box::new(enrichment::SearchAuthorsTool),
        // Network tools (3)
        Box::new(networks::CitationNetworkTool),
        Box::new(networks::RelatedWorksTool),
        Box::new(networks::CollaboratorAnalysisTool),
        // Bibliometrics tools (2)
        Box::new(bibliometrics::InfluentialWorksTool),
        Box::new(bibliometrics::CompareTopicsTool),
    ]
}
