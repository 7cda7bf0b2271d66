//! Bibliometrics tools: influential-works lookup and topic comparison.

use serde_json::json;

use super::{McpTool, ToolContext, Validator, render_work_list};
use crate::client::{FilterSet, SearchOptions, publication_year_filter};
use crate::config::api;
use crate::error::ToolResult;
use crate::formatters;
use crate::models::{CompareTopicsInput, InfluentialWorksInput};

/// Influential-works lookup tool.
pub struct InfluentialWorksTool;

#[async_trait::async_trait]
impl McpTool for InfluentialWorksTool {
    fn name(&self) -> &'static str {
        "find_influential_works"
    }

    fn description(&self) -> &'static str {
        "Find the most-cited works for a query. Applies a minimum-citation floor \
         (default 50, pass 0 to disable) and sorts by citation count descending."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "search": {
                    "type": "string",
                    "description": "Full-text search query"
                },
                "min_citations": {
                    "type": "integer",
                    "default": 50,
                    "description": "Citation floor; 0 disables it"
                },
                "from_publication_year": {
                    "type": "integer"
                },
                "to_publication_year": {
                    "type": "integer"
                },
                "per_page": {
                    "type": "integer",
                    "default": 25,
                    "maximum": 200
                }
            }
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let mut v = Validator::new(&input);
        v.optional_string("search")
            .optional_int("min_citations", 0, 1_000_000)
            .optional_int("from_publication_year", 1000, 3000)
            .optional_int("to_publication_year", 1000, 3000)
            .ordered_int_pair("from_publication_year", "to_publication_year")
            .optional_int("per_page", 1, i64::from(api::MAX_PER_PAGE));
        v.finish()?;

        let params: InfluentialWorksInput = serde_json::from_value(input)?;

        let mut filters = FilterSet::new();

        if let Some(expr) =
            publication_year_filter(params.from_publication_year, params.to_publication_year)
        {
            filters.set("publication_year", expr);
        }

        if params.min_citations > 0 {
            filters.set("cited_by_count", format!(">{}", params.min_citations));
        }

        let options = SearchOptions {
            search: params.search.clone(),
            filters,
            sort: Some("cited_by_count".to_string()),
            per_page: params.per_page,
            ..SearchOptions::default()
        };

        let result = ctx.client.list_works(&options).await?;
        render_work_list(&result)
    }
}

/// Topic comparison tool.
pub struct CompareTopicsTool;

#[async_trait::async_trait]
impl McpTool for CompareTopicsTool {
    fn name(&self) -> &'static str {
        "compare_topics"
    }

    fn description(&self) -> &'static str {
        "Compare 2-5 research topics by the number of matching works, optionally \
         restricted to a year range. Each topic also reports its most-cited work."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "topics": {
                    "type": "array",
                    "items": {"type": "string"},
                    "minItems": 2,
                    "maxItems": 5,
                    "description": "Topic queries to compare"
                },
                "from_publication_year": {
                    "type": "integer"
                },
                "to_publication_year": {
                    "type": "integer"
                }
            },
            "required": ["topics"]
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let mut v = Validator::new(&input);
        v.require_string_list("topics", 2, 5)
            .optional_int("from_publication_year", 1000, 3000)
            .optional_int("to_publication_year", 1000, 3000)
            .ordered_int_pair("from_publication_year", "to_publication_year");
        v.finish()?;

        let params: CompareTopicsInput = serde_json::from_value(input)?;

        let mut entries = Vec::with_capacity(params.topics.len());

        for topic in &params.topics {
            let mut filters = FilterSet::new();

            if let Some(expr) =
                publication_year_filter(params.from_publication_year, params.to_publication_year)
            {
                filters.set("publication_year", expr);
            }

            let options = SearchOptions {
                search: Some(topic.clone()),
                filters,
                sort: Some("cited_by_count".to_string()),
                per_page: Some(1),
                ..SearchOptions::default()
            };

            let result = ctx.client.list_works(&options).await?;

            entries.push(json!({
                "topic": topic,
                "works_count": result.meta.count,
                "top_work": result.results.first().map(formatters::work_summary),
            }));
        }

        // Rank by works count descending.
        entries.sort_by_key(|e| std::cmp::Reverse(e["works_count"].as_i64().unwrap_or(0)));

        Ok(serde_json::to_string_pretty(&json!({
            "comparison": entries,
        }))?)
    }
}
