//! Discovery tools: search_works, search_entities, autocomplete, find_similar_works.

use serde_json::json;

use super::{McpTool, ToolContext, Validator, render_work_list};
use crate::client::{FilterSet, SearchOptions, publication_year_filter};
use crate::config::api;
use crate::error::ToolResult;
use crate::models::{
    AutocompleteInput, FindSimilarWorksInput, SearchEntitiesInput, SearchWorksInput,
};

/// Build client search options from validated work-search parameters.
fn work_search_options(params: &SearchWorksInput) -> SearchOptions {
    let mut filters = FilterSet::new();

    if let Some(expr) =
        publication_year_filter(params.from_publication_year, params.to_publication_year)
    {
        filters.set("publication_year", expr);
    }

    if let Some(ref expr) = params.cited_by_count {
        filters.set("cited_by_count", expr.clone());
    }

    if let Some(open_access) = params.is_open_access {
        filters.set("is_oa", open_access.to_string());
    }

    if let Some(ref work_type) = params.work_type {
        filters.set("type", work_type.clone());
    }

    SearchOptions {
        search: params.search.clone(),
        filters,
        sort: params.sort.clone(),
        page: params.page,
        per_page: params.per_page,
        select: params.select.clone(),
        group_by: params.group_by.clone(),
        sample: params.sample,
    }
}

/// Work search tool.
pub struct SearchWorksTool;

#[async_trait::async_trait]
impl McpTool for SearchWorksTool {
    fn name(&self) -> &'static str {
        "search_works"
    }

    fn description(&self) -> &'static str {
        "Search scholarly works with filters for year range, citations, open access \
         and type. Returns compact summaries; use get_work for full records."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "search": {
                    "type": "string",
                    "description": "Full-text search query (e.g. 'transformer attention')"
                },
                "from_publication_year": {
                    "type": "integer",
                    "description": "Minimum publication year (inclusive)"
                },
                "to_publication_year": {
                    "type": "integer",
                    "description": "Maximum publication year (inclusive)"
                },
                "cited_by_count": {
                    "type": "string",
                    "description": "Citation comparator: '>100', '<50', or '100-200'"
                },
                "is_open_access": {
                    "type": "boolean",
                    "description": "Only return open-access works"
                },
                "work_type": {
                    "type": "string",
                    "description": "Work type (e.g. 'article', 'review', 'book-chapter')"
                },
                "sort": {
                    "type": "string",
                    "description": "Sort field; bare names sort descending (e.g. 'cited_by_count')"
                },
                "page": {
                    "type": "integer",
                    "default": 1
                },
                "per_page": {
                    "type": "integer",
                    "default": 25,
                    "maximum": 200
                },
                "select": {
                    "type": "array",
                    "items": {"type": "string"},
                    "description": "Restrict returned fields"
                },
                "group_by": {
                    "type": "string",
                    "description": "Group results by a field instead of paginating"
                },
                "sample": {
                    "type": "integer",
                    "description": "Return a random sample of this many works"
                }
            }
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let mut v = Validator::new(&input);
        v.optional_string("search")
            .optional_int("from_publication_year", 1000, 3000)
            .optional_int("to_publication_year", 1000, 3000)
            .ordered_int_pair("from_publication_year", "to_publication_year")
            .optional_string("cited_by_count")
            .optional_bool("is_open_access")
            .optional_string("work_type")
            .optional_string("sort")
            .optional_int("page", 1, 10_000)
            .optional_int("per_page", 1, i64::from(api::MAX_PER_PAGE))
            .optional_string_list("select")
            .optional_string("group_by")
            .optional_int("sample", 1, 10_000);
        v.finish()?;

        let params: SearchWorksInput = serde_json::from_value(input)?;
        let options = work_search_options(&params);

        let result = ctx.client.list_works(&options).await?;
        render_work_list(&result)
    }
}

/// Generic entity search tool covering all seven collections.
pub struct SearchEntitiesTool;

#[async_trait::async_trait]
impl McpTool for SearchEntitiesTool {
    fn name(&self) -> &'static str {
        "search_entities"
    }

    fn description(&self) -> &'static str {
        "Search any OpenAlex collection (works, authors, institutions, sources, \
         topics, publishers, funders) by name or text."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "entity_type": {
                    "type": "string",
                    "enum": ["works", "authors", "institutions", "sources", "topics", "publishers", "funders"]
                },
                "search": {
                    "type": "string",
                    "description": "Full-text search query"
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
                },
                "group_by": {
                    "type": "string"
                }
            },
            "required": ["entity_type"]
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let mut v = Validator::new(&input);
        v.require_entity_type("entity_type")
            .optional_string("search")
            .optional_string("sort")
            .optional_int("page", 1, 10_000)
            .optional_int("per_page", 1, i64::from(api::MAX_PER_PAGE))
            .optional_string("group_by");
        v.finish()?;

        let params: SearchEntitiesInput = serde_json::from_value(input)?;

        let options = SearchOptions {
            search: params.search.clone(),
            sort: params.sort.clone(),
            page: params.page,
            per_page: params.per_page,
            group_by: params.group_by.clone(),
            ..SearchOptions::default()
        };

        let result = ctx.client.list_entities(params.entity_type, &options).await?;

        let payload = match &result.group_by {
            Some(groups) => json!({
                "entity_type": params.entity_type,
                "meta": result.meta,
                "group_by": groups,
            }),
            None => json!({
                "entity_type": params.entity_type,
                "meta": result.meta,
                "results": result.results,
            }),
        };

        Ok(serde_json::to_string_pretty(&payload)?)
    }
}

/// Autocomplete tool.
pub struct AutocompleteTool;

#[async_trait::async_trait]
impl McpTool for AutocompleteTool {
    fn name(&self) -> &'static str {
        "autocomplete"
    }

    fn description(&self) -> &'static str {
        "Type-ahead suggestions for a partial name or title against any \
         OpenAlex collection."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "entity_type": {
                    "type": "string",
                    "enum": ["works", "authors", "institutions", "sources", "topics", "publishers", "funders"]
                },
                "query": {
                    "type": "string",
                    "description": "Partial text to complete"
                }
            },
            "required": ["entity_type", "query"]
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let mut v = Validator::new(&input);
        v.require_entity_type("entity_type").require_string("query");
        v.finish()?;

        let params: AutocompleteInput = serde_json::from_value(input)?;
        let matches = ctx.client.autocomplete(params.entity_type, &params.query).await?;

        Ok(serde_json::to_string_pretty(&json!({
            "entity_type": params.entity_type,
            "query": params.query,
            "results": matches,
        }))?)
    }
}

/// Text-similarity search tool.
pub struct FindSimilarWorksTool;

#[async_trait::async_trait]
impl McpTool for FindSimilarWorksTool {
    fn name(&self) -> &'static str {
        "find_similar_works"
    }

    fn description(&self) -> &'static str {
        "Find works similar to a block of text (a title, an abstract, a research \
         question). Returns compact summaries."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "text": {
                    "type": "string",
                    "description": "Text to find similar works for"
                },
                "per_page": {
                    "type": "integer",
                    "default": 25,
                    "maximum": 200
                }
            },
            "required": ["text"]
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let mut v = Validator::new(&input);
        v.require_string("text").optional_int("per_page", 1, i64::from(api::MAX_PER_PAGE));
        v.finish()?;

        let params: FindSimilarWorksInput = serde_json::from_value(input)?;
        let result = ctx.client.find_similar_works(&params.text, params.per_page).await?;
        render_work_list(&result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_work_search_options_collapse_year_bounds() {
        let params = SearchWorksInput {
            search: Some("attention".to_string()),
            from_publication_year: Some(2020),
            to_publication_year: Some(2023),
            cited_by_count: None,
            is_open_access: None,
            work_type: None,
            sort: Some("cited_by_count".to_string()),
            page: None,
            per_page: None,
            select: None,
            group_by: None,
            sample: None,
        };

        let options = work_search_options(&params);
        assert_eq!(options.filters.get("publication_year"), Some("2020-2023"));
        assert_eq!(options.filters.len(), 1);
        assert_eq!(options.sort.as_deref(), Some("cited_by_count"));
    }

    #[test]
    fn test_work_search_options_pass_through_filters() {
        let params = SearchWorksInput {
            search: None,
            from_publication_year: None,
            to_publication_year: None,
            cited_by_count: Some(">100".to_string()),
            is_open_access: Some(true),
            work_type: Some("article".to_string()),
            sort: None,
            page: None,
            per_page: None,
            select: None,
            group_by: None,
            sample: None,
        };

        let options = work_search_options(&params);
        assert_eq!(options.filters.get("cited_by_count"), Some(">100"));
        assert_eq!(options.filters.get("is_oa"), Some("true"));
        assert_eq!(options.filters.get("type"), Some("article"));
        assert!(options.filters.get("publication_year").is_none());
    }
}
