//! Input models for MCP tool parameters.
//!
//! Deserialized from the raw argument bag only after shape validation has
//! passed (see `tools::validation`), so serde defaults here never paper over
//! out-of-range values.

use serde::{Deserialize, Serialize};

use super::EntityType;
use crate::config::api;

/// Input for work search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchWorksInput {
    /// Full-text search query.
    #[serde(default)]
    pub search: Option<String>,

    /// Minimum publication year (inclusive).
    #[serde(default)]
    pub from_publication_year: Option<i32>,

    /// Maximum publication year (inclusive).
    #[serde(default)]
    pub to_publication_year: Option<i32>,

    /// Citation-count comparator expression (e.g. ">100", "<50", "100-200").
    #[serde(default)]
    pub cited_by_count: Option<String>,

    /// Only return open-access works.
    #[serde(default)]
    pub is_open_access: Option<bool>,

    /// Filter by work type (e.g. "article", "review").
    #[serde(default)]
    pub work_type: Option<String>,

    /// Sort field, optionally suffixed ":asc" or ":desc" (bare fields sort descending).
    #[serde(default)]
    pub sort: Option<String>,

    /// Page number (1-based).
    #[serde(default)]
    pub page: Option<i32>,

    /// Results per page (max 200).
    #[serde(default)]
    pub per_page: Option<i32>,

    /// Restrict returned fields to this projection.
    #[serde(default)]
    pub select: Option<Vec<String>>,

    /// Group results by a field instead of paginating.
    #[serde(default)]
    pub group_by: Option<String>,

    /// Return a random sample of this many works.
    #[serde(default)]
    pub sample: Option<i32>,
}

/// Input for author search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchAuthorsInput {
    /// Author name to search for.
    pub search: String,

    /// Works-count comparator expression (e.g. ">10").
    #[serde(default)]
    pub works_count: Option<String>,

    /// Filter by country code of the last known institution.
    #[serde(default)]
    pub country_code: Option<String>,

    /// Filter by institution name.
    #[serde(default)]
    pub institution: Option<String>,

    /// Sort field.
    #[serde(default)]
    pub sort: Option<String>,

    /// Page number (1-based).
    #[serde(default)]
    pub page: Option<i32>,

    /// Results per page (max 200).
    #[serde(default)]
    pub per_page: Option<i32>,
}

/// Input for generic entity search across all seven kinds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchEntitiesInput {
    /// Which entity collection to search.
    pub entity_type: EntityType,

    /// Full-text search query.
    #[serde(default)]
    pub search: Option<String>,

    /// Sort field.
    #[serde(default)]
    pub sort: Option<String>,

    /// Page number (1-based).
    #[serde(default)]
    pub page: Option<i32>,

    /// Results per page (max 200).
    #[serde(default)]
    pub per_page: Option<i32>,

    /// Group results by a field instead of paginating.
    #[serde(default)]
    pub group_by: Option<String>,
}

/// Input for autocomplete suggestions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutocompleteInput {
    /// Which entity collection to complete against.
    pub entity_type: EntityType,

    /// Partial text to complete.
    pub query: String,
}

/// Input for text-similarity work search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindSimilarWorksInput {
    /// Text to find similar works for (e.g. a title or abstract).
    pub text: String,

    /// Results per page (max 200).
    #[serde(default)]
    pub per_page: Option<i32>,
}

/// Input for single-work lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetWorkInput {
    /// Work identifier: OpenAlex ID, DOI (bare or `doi:`-prefixed), or URL.
    pub work_id: String,
}

/// Input for single-author lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetAuthorInput {
    /// Author identifier: OpenAlex ID, ORCID URL, or other supported form.
    pub author_id: String,
}

/// Input for generic entity lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetEntityInput {
    /// Which entity collection the identifier belongs to.
    pub entity_type: EntityType,

    /// Entity identifier.
    pub entity_id: String,
}

/// Input for citation network assembly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CitationNetworkInput {
    /// Focal work identifier.
    pub work_id: String,

    /// Maximum citing works to fetch.
    #[serde(default = "default_max_citing")]
    pub max_citing: i32,

    /// Maximum outbound reference IDs to return (never resolved to records).
    #[serde(default = "default_max_references")]
    pub max_references: i32,
}

fn default_max_citing() -> i32 {
    20
}

fn default_max_references() -> i32 {
    20
}

/// Input for related-works resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelatedWorksInput {
    /// Focal work identifier.
    pub work_id: String,

    /// Maximum related works to resolve.
    #[serde(default = "default_related_limit")]
    pub limit: i32,
}

fn default_related_limit() -> i32 {
    10
}

/// Input for collaborator analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollaboratorsInput {
    /// Focal author identifier.
    pub author_id: String,

    /// Minimum number of shared works for a collaborator to be reported.
    #[serde(default = "default_min_collaborations")]
    pub min_collaborations: i32,

    /// Maximum works of the focal author to analyze (max 200, one page).
    #[serde(default = "default_max_works")]
    pub max_works: i32,
}

fn default_min_collaborations() -> i32 {
    2
}

fn default_max_works() -> i32 {
    api::MAX_PER_PAGE
}

/// Input for influential-works lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfluentialWorksInput {
    /// Full-text search query.
    #[serde(default)]
    pub search: Option<String>,

    /// Citation floor injected as a ">" comparator; 0 disables the floor.
    #[serde(default = "default_min_citations")]
    pub min_citations: i32,

    /// Minimum publication year (inclusive).
    #[serde(default)]
    pub from_publication_year: Option<i32>,

    /// Maximum publication year (inclusive).
    #[serde(default)]
    pub to_publication_year: Option<i32>,

    /// Results per page (max 200).
    #[serde(default)]
    pub per_page: Option<i32>,
}

fn default_min_citations() -> i32 {
    api::DEFAULT_MIN_CITATIONS
}

/// Input for topic comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareTopicsInput {
    /// Topics to compare (2-5 entries).
    pub topics: Vec<String>,

    /// Minimum publication year (inclusive).
    #[serde(default)]
    pub from_publication_year: Option<i32>,

    /// Maximum publication year (inclusive).
    #[serde(default)]
    pub to_publication_year: Option<i32>,
}
