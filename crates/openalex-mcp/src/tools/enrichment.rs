//! Enrichment tools: get_work, get_author, get_entity, search_authors.

use serde_json::json;

use super::{McpTool, ToolContext, Validator};
use crate::client::{FilterSet, SearchOptions};
use crate::config::api;
use crate::error::ToolResult;
use crate::formatters;
use crate::models::{GetAuthorInput, GetEntityInput, GetWorkInput, SearchAuthorsInput};

/// Single-work lookup tool (full-detail projection).
pub struct GetWorkTool;

#[async_trait::async_trait]
impl McpTool for GetWorkTool {
    fn name(&self) -> &'static str {
        "get_work"
    }

    fn description(&self) -> &'static str {
        "Get the full record for one work: complete author roster with roles and \
         affiliations, reconstructed abstract, topics, grants, references. \
         Accepts an OpenAlex ID, a DOI, or a URL."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "work_id": {
                    "type": "string",
                    "description": "OpenAlex ID (W...), DOI (bare or doi:-prefixed), or URL"
                }
            },
            "required": ["work_id"]
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let mut v = Validator::new(&input);
        v.require_string("work_id");
        v.finish()?;

        let params: GetWorkInput = serde_json::from_value(input)?;
        let work = ctx.client.get_work(&params.work_id).await?;
        let detail = formatters::work_detail(&work)?;

        Ok(serde_json::to_string_pretty(&detail)?)
    }
}

/// Single-author lookup tool.
pub struct GetAuthorTool;

#[async_trait::async_trait]
impl McpTool for GetAuthorTool {
    fn name(&self) -> &'static str {
        "get_author"
    }

    fn description(&self) -> &'static str {
        "Get the full record for one author: metrics, ORCID, and affiliation history."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "author_id": {
                    "type": "string",
                    "description": "OpenAlex ID (A...) or ORCID URL"
                }
            },
            "required": ["author_id"]
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let mut v = Validator::new(&input);
        v.require_string("author_id");
        v.finish()?;

        let params: GetAuthorInput = serde_json::from_value(input)?;
        let author = ctx.client.get_author(&params.author_id).await?;

        Ok(serde_json::to_string_pretty(&formatters::author_detail(&author))?)
    }
}

/// Generic entity lookup tool.
pub struct GetEntityTool;

#[async_trait::async_trait]
impl McpTool for GetEntityTool {
    fn name(&self) -> &'static str {
        "get_entity"
    }

    fn description(&self) -> &'static str {
        "Get the upstream record for any entity: institution, source, topic, \
         publisher, funder (or work/author without projection)."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "entity_type": {
                    "type": "string",
                    "enum": ["works", "authors", "institutions", "sources", "topics", "publishers", "funders"]
                },
                "entity_id": {
                    "type": "string",
                    "description": "OpenAlex ID, DOI, ROR, ORCID, or URL"
                }
            },
            "required": ["entity_type", "entity_id"]
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let mut v = Validator::new(&input);
        v.require_entity_type("entity_type").require_string("entity_id");
        v.finish()?;

        let params: GetEntityInput = serde_json::from_value(input)?;
        let record = ctx.client.get_entity(params.entity_type, &params.entity_id).await?;

        Ok(serde_json::to_string_pretty(&record)?)
    }
}

/// Author search tool.
pub struct SearchAuthorsTool;

#[async_trait::async_trait]
impl McpTool for SearchAuthorsTool {
    fn name(&self) -> &'static str {
        "search_authors"
    }

    fn description(&self) -> &'static str {
        "Search authors by name, optionally filtered by productivity, country, \
         or institution."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "search": {
                    "type": "string",
                    "description": "Author name to search for"
                },
                "works_count": {
                    "type": "string",
                    "description": "Works-count comparator: '>10', '<100', or '10-100'"
                },
                "country_code": {
                    "type": "string",
                    "description": "ISO country code of the last known institution"
                },
                "institution": {
                    "type": "string",
                    "description": "Institution name to filter by"
                },
                "sort": {
                    "type": "string"
                },
                "page": {
                    "type": "integer",
                    "default": 1
                },
                "per_page": {
                    "type": "integer",
                    "default": 25,
                    "maximum": 200
                }
            },
            "required": ["search"]
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let mut v = Validator::new(&input);
        v.require_string("search")
            .optional_string("works_count")
            .optional_string("country_code")
            .optional_string("institution")
            .optional_string("sort")
            .optional_int("page", 1, 10_000)
            .optional_int("per_page", 1, i64::from(api::MAX_PER_PAGE));
        v.finish()?;

        let params: SearchAuthorsInput = serde_json::from_value(input)?;

        let mut filters = FilterSet::new();

        if let Some(ref expr) = params.works_count {
            filters.set("works_count", expr.clone());
        }

        if let Some(ref country) = params.country_code {
            filters.set("last_known_institutions.country_code", country.clone());
        }

        if let Some(ref institution) = params.institution {
            filters.set("last_known_institutions.display_name.search", institution.clone());
        }

        let options = SearchOptions {
            search: Some(params.search.clone()),
            filters,
            sort: params.sort.clone(),
            page: params.page,
            per_page: params.per_page,
            ..SearchOptions::default()
        };

        let result = ctx.client.list_authors(&options).await?;

        Ok(serde_json::to_string_pretty(&json!({
            "meta": result.meta,
            "results": result.results.iter().map(formatters::author_summary).collect::<Vec<_>>(),
        }))?)
    }
}
