//! Network tools: citation network assembly, related-works resolution,
//! collaborator analysis.

use std::collections::HashMap;
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use serde_json::json;

use super::{McpTool, ToolContext, Validator};
use crate::client::{FilterSet, SearchOptions};
use crate::config::api;
use crate::error::{ClientError, ToolResult};
use crate::formatters;
use crate::models::{CitationNetworkInput, CollaboratorsInput, RelatedWorksInput, short_id};

/// Citation network assembly tool.
pub struct CitationNetworkTool;

#[async_trait::async_trait]
impl McpTool for CitationNetworkTool {
    fn name(&self) -> &'static str {
        "get_citation_network"
    }

    fn description(&self) -> &'static str {
        "Assemble the local citation neighborhood of a work: a capped set of \
         citing works plus the work's outbound reference IDs. Reference IDs are \
         returned unresolved to keep the response small."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "work_id": {
                    "type": "string",
                    "description": "Focal work: OpenAlex ID, DOI, or URL"
                },
                "max_citing": {
                    "type": "integer",
                    "default": 20,
                    "maximum": 100,
                    "description": "Maximum citing works to fetch"
                },
                "max_references": {
                    "type": "integer",
                    "default": 20,
                    "maximum": 100,
                    "description": "Maximum outbound reference IDs to return"
                }
            },
            "required": ["work_id"]
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let mut v = Validator::new(&input);
        v.require_string("work_id")
            .optional_int("max_citing", 1, 100)
            .optional_int("max_references", 1, 100);
        v.finish()?;

        let params: CitationNetworkInput = serde_json::from_value(input)?;

        let focal = ctx.client.get_work(&params.work_id).await?;

        let mut filters = FilterSet::new();
        filters.set("cites", focal.short_id());

        let options = SearchOptions {
            filters,
            sort: Some("cited_by_count".to_string()),
            per_page: Some(params.max_citing),
            ..SearchOptions::default()
        };

        let citing = ctx.client.list_works(&options).await?;

        let references: Vec<&String> =
            focal.referenced_works.iter().take(params.max_references as usize).collect();

        Ok(serde_json::to_string_pretty(&json!({
            "work": formatters::work_summary(&focal),
            "citing_works": {
                "total": citing.meta.count,
                "results": citing.results.iter().map(formatters::work_summary).collect::<Vec<_>>(),
            },
            "referenced_works": references,
            "referenced_works_total": focal.referenced_works.len(),
        }))?)
    }
}

/// Related-works resolution tool.
pub struct RelatedWorksTool;

#[async_trait::async_trait]
impl McpTool for RelatedWorksTool {
    fn name(&self) -> &'static str {
        "get_related_works"
    }

    fn description(&self) -> &'static str {
        "Resolve a work's related-work IDs to compact summaries. IDs that no \
         longer resolve upstream are skipped."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "work_id": {
                    "type": "string",
                    "description": "Focal work: OpenAlex ID, DOI, or URL"
                },
                "limit": {
                    "type": "integer",
                    "default": 10,
                    "maximum": 25,
                    "description": "Maximum related works to resolve"
                }
            },
            "required": ["work_id"]
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let mut v = Validator::new(&input);
        v.require_string("work_id").optional_int("limit", 1, 25);
        v.finish()?;

        let params: RelatedWorksInput = serde_json::from_value(input)?;

        let focal = ctx.client.get_work(&params.work_id).await?;
        let ids: Vec<String> =
            focal.related_works.iter().take(params.limit as usize).cloned().collect();

        // Bounded fan-out; one vanished id must not sink the batch.
        let outcomes: Vec<_> = stream::iter(ids)
            .map(|id| {
                let client = Arc::clone(&ctx.client);
                async move { client.get_work(&id).await }
            })
            .buffered(api::MAX_CONCURRENT_LOOKUPS)
            .collect()
            .await;

        let mut related = Vec::new();
        for outcome in outcomes {
            match outcome {
                Ok(work) => related.push(formatters::work_summary(&work)),
                Err(ClientError::NotFound { resource }) => {
                    tracing::warn!(resource, "skipping missing related work");
                }
                Err(err) => return Err(err.into()),
            }
        }

        Ok(serde_json::to_string_pretty(&json!({
            "work": formatters::work_summary(&focal),
            "related_works": related,
            "related_works_total": focal.related_works.len(),
        }))?)
    }
}

/// Collaborator analysis tool.
pub struct CollaboratorAnalysisTool;

#[async_trait::async_trait]
impl McpTool for CollaboratorAnalysisTool {
    fn name(&self) -> &'static str {
        "analyze_collaborators"
    }

    fn description(&self) -> &'static str {
        "Tally an author's co-authors across their works, filter by a minimum \
         number of shared works, and rank by collaboration count."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "author_id": {
                    "type": "string",
                    "description": "Focal author: OpenAlex ID (A...) or ORCID URL"
                },
                "min_collaborations": {
                    "type": "integer",
                    "default": 2,
                    "description": "Minimum shared works for a collaborator to be reported"
                },
                "max_works": {
                    "type": "integer",
                    "default": 200,
                    "maximum": 200,
                    "description": "Maximum works of the focal author to analyze"
                }
            },
            "required": ["author_id"]
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let mut v = Validator::new(&input);
        v.require_string("author_id")
            .optional_int("min_collaborations", 1, 10_000)
            .optional_int("max_works", 1, i64::from(api::MAX_PER_PAGE));
        v.finish()?;

        let params: CollaboratorsInput = serde_json::from_value(input)?;

        let author = ctx.client.get_author(&params.author_id).await?;
        let focal_id = author.short_id().to_string();

        let mut filters = FilterSet::new();
        filters.set("author.id", focal_id.clone());

        let options = SearchOptions {
            filters,
            per_page: Some(params.max_works),
            ..SearchOptions::default()
        };

        let works = ctx.client.list_works(&options).await?;

        struct Collaborator {
            name: String,
            count: i64,
        }

        let mut tally: HashMap<String, Collaborator> = HashMap::new();

        for work in &works.results {
            for authorship in &work.authorships {
                let Some(ref id) = authorship.author.id else { continue };
                let id = short_id(id);

                if id.eq_ignore_ascii_case(&focal_id) {
                    continue;
                }

                let entry = tally.entry(id.to_string()).or_insert_with(|| Collaborator {
                    name: authorship.author.name_or_default().to_string(),
                    count: 0,
                });
                entry.count += 1;
            }
        }

        let mut collaborators: Vec<(String, Collaborator)> = tally
            .into_iter()
            .filter(|(_, c)| c.count >= i64::from(params.min_collaborations))
            .collect();

        // Descending by count, then by name for a stable ordering.
        collaborators.sort_by(|a, b| b.1.count.cmp(&a.1.count).then_with(|| a.1.name.cmp(&b.1.name)));

        let entries: Vec<_> = collaborators
            .iter()
            .map(|(id, c)| {
                json!({
                    "id": id,
                    "name": c.name,
                    "shared_works": c.count,
                })
            })
            .collect();

        Ok(serde_json::to_string_pretty(&json!({
            "author": {
                "id": author.id,
                "name": author.name_or_default(),
            },
            "works_analyzed": works.results.len(),
            "min_collaborations": params.min_collaborations,
            "collaborators": entries,
        }))?)
    }
}
