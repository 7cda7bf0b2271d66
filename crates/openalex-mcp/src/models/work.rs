//! Work data model matching the OpenAlex schema.
//!
//! Only the fields needed for literature-review workflows are modeled; the
//! upstream record carries many more, which serde ignores.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A scholarly work from OpenAlex.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Work {
    /// OpenAlex ID (full URL form, e.g. `https://openalex.org/W2741809807`).
    pub id: String,

    /// DOI in URL form.
    #[serde(default)]
    pub doi: Option<String>,

    /// Work title.
    #[serde(default)]
    pub title: Option<String>,

    /// Display name (usually identical to the title).
    #[serde(default)]
    pub display_name: Option<String>,

    /// Publication year.
    #[serde(default)]
    pub publication_year: Option<i32>,

    /// Publication date in ISO format (YYYY-MM-DD).
    #[serde(default)]
    pub publication_date: Option<String>,

    /// Work type (e.g. "article", "book-chapter").
    #[serde(default)]
    pub r#type: Option<String>,

    /// Number of citations this work has received.
    #[serde(default)]
    pub cited_by_count: Option<i64>,

    /// Authorship list in byline order.
    #[serde(default)]
    pub authorships: Vec<Authorship>,

    /// Highest-scoring topic classification.
    #[serde(default)]
    pub primary_topic: Option<Topic>,

    /// All topic classifications, primary first.
    #[serde(default)]
    pub topics: Vec<Topic>,

    /// Keywords assigned upstream.
    #[serde(default)]
    pub keywords: Vec<Keyword>,

    /// Open access status and URLs.
    #[serde(default)]
    pub open_access: Option<OpenAccess>,

    /// Primary hosting location (venue).
    #[serde(default)]
    pub primary_location: Option<Location>,

    /// Best open-access location, if any.
    #[serde(default)]
    pub best_oa_location: Option<Location>,

    /// Bibliographic volume/issue/pages.
    #[serde(default)]
    pub biblio: Option<Biblio>,

    /// Grants that funded the work.
    #[serde(default)]
    pub grants: Vec<Grant>,

    /// Abstract stored as a word -> positions inverted index.
    #[serde(default)]
    pub abstract_inverted_index: Option<HashMap<String, Vec<i64>>>,

    /// Outbound citations (OpenAlex work IDs).
    #[serde(default)]
    pub referenced_works: Vec<String>,

    /// Related works (OpenAlex work IDs).
    #[serde(default)]
    pub related_works: Vec<String>,

    /// Citation percentile normalized by publication year.
    #[serde(default)]
    pub citation_normalized_percentile: Option<CitationPercentile>,

    /// Field-weighted citation impact.
    #[serde(default)]
    pub fwci: Option<f64>,

    /// Language code.
    #[serde(default)]
    pub language: Option<String>,
}

impl Work {
    /// Get the work title, falling back to "Untitled" if not available.
    #[must_use]
    pub fn title_or_default(&self) -> &str {
        self.display_name.as_deref().or(self.title.as_deref()).unwrap_or("Untitled")
    }

    /// Get the short OpenAlex ID (`W...`) from the URL-form id.
    #[must_use]
    pub fn short_id(&self) -> &str {
        short_id(&self.id)
    }

    /// Get citation count or 0 if not available.
    #[must_use]
    pub fn citations(&self) -> i64 {
        self.cited_by_count.unwrap_or(0)
    }

    /// Get the venue display name if available.
    #[must_use]
    pub fn venue_name(&self) -> Option<&str> {
        self.primary_location.as_ref()?.source.as_ref()?.display_name.as_deref()
    }

    /// Get the landing page URL if available.
    #[must_use]
    pub fn landing_page_url(&self) -> Option<&str> {
        self.primary_location.as_ref()?.landing_page_url.as_deref()
    }

    /// Get the open-access PDF URL if available.
    #[must_use]
    pub fn pdf_url(&self) -> Option<&str> {
        self.best_oa_location
            .as_ref()
            .and_then(|l| l.pdf_url.as_deref())
            .or_else(|| self.primary_location.as_ref().and_then(|l| l.pdf_url.as_deref()))
    }
}

/// Strip the `https://openalex.org/` prefix from a URL-form entity id.
#[must_use]
pub fn short_id(id: &str) -> &str {
    id.rsplit('/').next().unwrap_or(id)
}

/// One entry in a work's authorship list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Authorship {
    /// The author.
    #[serde(default)]
    pub author: AuthorRef,

    /// Byline position reported upstream ("first", "middle", "last").
    #[serde(default)]
    pub author_position: Option<String>,

    /// Institutional affiliations for this authorship.
    #[serde(default)]
    pub institutions: Vec<InstitutionRef>,

    /// Whether this author is a corresponding author.
    #[serde(default)]
    pub is_corresponding: Option<bool>,

    /// Affiliation strings exactly as printed on the work.
    #[serde(default)]
    pub raw_affiliation_strings: Vec<String>,
}

/// Minimal author reference embedded in authorships.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthorRef {
    /// OpenAlex author ID (URL form).
    #[serde(default)]
    pub id: Option<String>,

    /// Author display name.
    #[serde(default)]
    pub display_name: Option<String>,

    /// ORCID iD (URL form).
    #[serde(default)]
    pub orcid: Option<String>,
}

impl AuthorRef {
    /// Get the author name or "Unknown".
    #[must_use]
    pub fn name_or_default(&self) -> &str {
        self.display_name.as_deref().unwrap_or("Unknown")
    }
}

/// Minimal institution reference embedded in authorships and author records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstitutionRef {
    /// OpenAlex institution ID (URL form).
    #[serde(default)]
    pub id: Option<String>,

    /// Institution display name.
    #[serde(default)]
    pub display_name: Option<String>,

    /// ROR registry ID.
    #[serde(default)]
    pub ror: Option<String>,

    /// ISO country code.
    #[serde(default)]
    pub country_code: Option<String>,

    /// Institution type (e.g. "education", "company").
    #[serde(default)]
    pub r#type: Option<String>,
}

/// Topic classification with its hierarchy labels.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Topic {
    /// OpenAlex topic ID (URL form).
    #[serde(default)]
    pub id: Option<String>,

    /// Topic display name.
    #[serde(default)]
    pub display_name: Option<String>,

    /// Classifier confidence score.
    #[serde(default)]
    pub score: Option<f64>,

    /// Subfield this topic belongs to.
    #[serde(default)]
    pub subfield: Option<FieldRef>,

    /// Field this topic belongs to.
    #[serde(default)]
    pub field: Option<FieldRef>,

    /// Top-level domain.
    #[serde(default)]
    pub domain: Option<FieldRef>,
}

/// A level in the topic hierarchy (subfield/field/domain).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldRef {
    /// OpenAlex ID (URL form).
    #[serde(default)]
    pub id: Option<String>,

    /// Display name.
    #[serde(default)]
    pub display_name: Option<String>,
}

/// A keyword assigned to a work.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Keyword {
    /// OpenAlex keyword ID (URL form).
    #[serde(default)]
    pub id: Option<String>,

    /// Keyword display name.
    #[serde(default)]
    pub display_name: Option<String>,

    /// Relevance score.
    #[serde(default)]
    pub score: Option<f64>,
}

/// Open access status for a work.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpenAccess {
    /// Whether the work is open access anywhere.
    #[serde(default)]
    pub is_oa: Option<bool>,

    /// OA status ("gold", "green", "hybrid", "bronze", "closed").
    #[serde(default)]
    pub oa_status: Option<String>,

    /// Best open-access URL.
    #[serde(default)]
    pub oa_url: Option<String>,
}

/// A hosting location for a work.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Location {
    /// The hosting source (journal, repository, conference).
    #[serde(default)]
    pub source: Option<SourceRef>,

    /// Landing page URL.
    #[serde(default)]
    pub landing_page_url: Option<String>,

    /// Direct PDF URL.
    #[serde(default)]
    pub pdf_url: Option<String>,

    /// Whether this location is open access.
    #[serde(default)]
    pub is_oa: Option<bool>,
}

/// Minimal source reference embedded in locations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceRef {
    /// OpenAlex source ID (URL form).
    #[serde(default)]
    pub id: Option<String>,

    /// Source display name.
    #[serde(default)]
    pub display_name: Option<String>,

    /// Source type (e.g. "journal", "repository").
    #[serde(default)]
    pub r#type: Option<String>,
}

/// Bibliographic fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Biblio {
    /// Volume.
    #[serde(default)]
    pub volume: Option<String>,

    /// Issue.
    #[serde(default)]
    pub issue: Option<String>,

    /// First page.
    #[serde(default)]
    pub first_page: Option<String>,

    /// Last page.
    #[serde(default)]
    pub last_page: Option<String>,
}

/// A grant acknowledged by a work.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Grant {
    /// OpenAlex funder ID (URL form).
    #[serde(default)]
    pub funder: Option<String>,

    /// Funder display name.
    #[serde(default)]
    pub funder_display_name: Option<String>,

    /// Award identifier.
    #[serde(default)]
    pub award_id: Option<String>,
}

/// Year-normalized citation percentile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CitationPercentile {
    /// Percentile value in [0, 1].
    #[serde(default)]
    pub value: Option<f64>,

    /// Whether the work is in the top 1% for its year.
    #[serde(default)]
    pub is_in_top_1_percent: Option<bool>,

    /// Whether the work is in the top 10% for its year.
    #[serde(default)]
    pub is_in_top_10_percent: Option<bool>,
}

/// Paginated (or grouped) list response from OpenAlex.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T> {
    /// Result metadata.
    #[serde(default)]
    pub meta: Meta,

    /// Records in this page; empty when the response is grouped.
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,

    /// Group-by buckets; mutually exclusive with paginated results.
    #[serde(default)]
    pub group_by: Option<Vec<GroupByBucket>>,
}

/// Metadata attached to every list response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Meta {
    /// Total number of matching records.
    #[serde(default)]
    pub count: i64,

    /// Current page (1-based).
    #[serde(default)]
    pub page: Option<i32>,

    /// Page size.
    #[serde(default)]
    pub per_page: Option<i32>,

    /// Upstream query time in milliseconds.
    #[serde(default)]
    pub db_response_time_ms: Option<i64>,

    /// Number of groups when the response is grouped.
    #[serde(default)]
    pub groups_count: Option<i64>,
}

/// One bucket of a grouped response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroupByBucket {
    /// Group key.
    #[serde(default)]
    pub key: String,

    /// Human-readable key.
    #[serde(default)]
    pub key_display_name: Option<String>,

    /// Records in this group.
    #[serde(default)]
    pub count: i64,
}

/// A single autocomplete suggestion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AutocompleteMatch {
    /// OpenAlex ID (URL form).
    #[serde(default)]
    pub id: String,

    /// Suggested entity display name.
    #[serde(default)]
    pub display_name: Option<String>,

    /// Disambiguation hint (e.g. author affiliation, work byline).
    #[serde(default)]
    pub hint: Option<String>,

    /// Citation count of the suggested entity.
    #[serde(default)]
    pub cited_by_count: Option<i64>,

    /// Entity type of the suggestion.
    #[serde(default)]
    pub entity_type: Option<String>,

    /// External canonical ID (DOI, ORCID, ROR, ...).
    #[serde(default)]
    pub external_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_work_deserialize_minimal() {
        let json = r#"{"id": "https://openalex.org/W123"}"#;
        let work: Work = serde_json::from_str(json).unwrap();

        assert_eq!(work.id, "https://openalex.org/W123");
        assert_eq!(work.short_id(), "W123");
        assert!(work.title.is_none());
        assert!(work.authorships.is_empty());
        assert_eq!(work.citations(), 0);
    }

    #[test]
    fn test_work_deserialize_full() {
        let json = r#"{
            "id": "https://openalex.org/W123",
            "doi": "https://doi.org/10.1234/test",
            "display_name": "Test Work",
            "publication_year": 2024,
            "cited_by_count": 42,
            "type": "article",
            "authorships": [{
                "author": {"id": "https://openalex.org/A1", "display_name": "Jane Doe"},
                "author_position": "first",
                "institutions": [{"display_name": "MIT", "country_code": "US"}],
                "is_corresponding": true
            }],
            "primary_location": {
                "source": {"display_name": "Nature"},
                "landing_page_url": "https://nature.com/articles/1"
            },
            "open_access": {"is_oa": true, "oa_status": "gold"}
        }"#;

        let work: Work = serde_json::from_str(json).unwrap();
        assert_eq!(work.title_or_default(), "Test Work");
        assert_eq!(work.citations(), 42);
        assert_eq!(work.venue_name(), Some("Nature"));
        assert_eq!(work.landing_page_url(), Some("https://nature.com/articles/1"));
        assert_eq!(work.authorships[0].author.name_or_default(), "Jane Doe");
        assert_eq!(work.authorships[0].is_corresponding, Some(true));
    }

    #[test]
    fn test_list_response_paginated() {
        let json = r#"{
            "meta": {"count": 100, "page": 1, "per_page": 25},
            "results": [{"id": "https://openalex.org/W1"}]
        }"#;

        let result: ListResponse<Work> = serde_json::from_str(json).unwrap();
        assert_eq!(result.meta.count, 100);
        assert_eq!(result.results.len(), 1);
        assert!(result.group_by.is_none());
    }

    #[test]
    fn test_list_response_grouped() {
        let json = r#"{
            "meta": {"count": 50, "groups_count": 2},
            "group_by": [
                {"key": "2023", "key_display_name": "2023", "count": 30},
                {"key": "2024", "key_display_name": "2024", "count": 20}
            ]
        }"#;

        let result: ListResponse<Work> = serde_json::from_str(json).unwrap();
        assert!(result.results.is_empty());
        let groups = result.group_by.unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].count, 30);
    }

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("https://openalex.org/W123"), "W123");
        assert_eq!(short_id("W123"), "W123");
    }

    #[test]
    fn test_pdf_url_prefers_best_oa_location() {
        let json = r#"{
            "id": "https://openalex.org/W1",
            "primary_location": {"pdf_url": "https://publisher.example/paywalled.pdf"},
            "best_oa_location": {"pdf_url": "https://repo.example/open.pdf"}
        }"#;

        let work: Work = serde_json::from_str(json).unwrap();
        assert_eq!(work.pdf_url(), Some("https://repo.example/open.pdf"));
    }
}
