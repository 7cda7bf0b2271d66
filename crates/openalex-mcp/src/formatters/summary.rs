//! Compact projections for list-returning operations.
//!
//! Summaries are deliberately lossy: bounded author list, primary topic only,
//! bounded abstract preview. They keep many-result responses small enough for
//! a downstream LLM context window.

use serde_json::{Value, json};

use super::abstracts::abstract_preview;
use crate::models::{Author, Work};

/// Maximum authors included in a work summary.
pub const SUMMARY_MAX_AUTHORS: usize = 5;

/// Project a work into its compact summary view.
#[must_use]
pub fn work_summary(work: &Work) -> Value {
    let authors: Vec<Value> = work
        .authorships
        .iter()
        .take(SUMMARY_MAX_AUTHORS)
        .map(|a| {
            json!({
                "id": a.author.id,
                "name": a.author.name_or_default(),
            })
        })
        .collect();

    let primary_topic = work.primary_topic.as_ref().map(|topic| {
        json!({
            "display_name": topic.display_name,
            "field": topic.field.as_ref().and_then(|f| f.display_name.clone()),
            "subfield": topic.subfield.as_ref().and_then(|f| f.display_name.clone()),
        })
    });

    let open_access = work.open_access.as_ref().map(|oa| {
        json!({
            "is_oa": oa.is_oa,
            "oa_status": oa.oa_status,
            "oa_url": oa.oa_url,
        })
    });

    json!({
        "id": work.id,
        "doi": work.doi,
        "title": work.title_or_default(),
        "publication_year": work.publication_year,
        "publication_date": work.publication_date,
        "cited_by_count": work.citations(),
        "type": work.r#type,
        "authors": authors,
        "authors_truncated": (work.authorships.len() > SUMMARY_MAX_AUTHORS),
        "primary_topic": primary_topic,
        "open_access": open_access,
        "venue": work.venue_name(),
        "landing_page_url": work.landing_page_url(),
        "pdf_url": work.pdf_url(),
        "abstract_preview": work.abstract_inverted_index.as_ref().and_then(abstract_preview),
    })
}

/// Project an author into its compact summary view.
#[must_use]
pub fn author_summary(author: &Author) -> Value {
    let institutions: Vec<Value> = author
        .last_known_institutions
        .iter()
        .map(|i| {
            json!({
                "id": i.id,
                "display_name": i.display_name,
                "country_code": i.country_code,
            })
        })
        .collect();

    json!({
        "id": author.id,
        "name": author.name_or_default(),
        "orcid": author.orcid,
        "works_count": author.works(),
        "cited_by_count": author.citations(),
        "h_index": author.h_index_value(),
        "last_known_institutions": institutions,
    })
}
