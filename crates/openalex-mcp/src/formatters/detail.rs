//! Full-detail projections for single-entity point lookups.

use serde_json::{Value, json};

use super::abstracts::reconstruct_abstract;
use crate::error::ToolResult;
use crate::models::{Author, Authorship, Work};

/// Maximum secondary topics included in a work detail.
const DETAIL_MAX_TOPICS: usize = 5;

/// Maximum keywords included in a work detail.
const DETAIL_MAX_KEYWORDS: usize = 10;

/// Maximum grants included in a work detail.
const DETAIL_MAX_GRANTS: usize = 5;

/// Derive the byline role from an authorship's index.
fn position_role(index: usize, total: usize) -> &'static str {
    if index == 0 {
        "first"
    } else if index + 1 == total {
        "last"
    } else {
        "middle"
    }
}

fn authorship_detail(authorship: &Authorship, index: usize, total: usize) -> Value {
    let institutions: Vec<Value> = authorship
        .institutions
        .iter()
        .map(|i| {
            json!({
                "id": i.id,
                "display_name": i.display_name,
                "ror": i.ror,
                "country_code": i.country_code,
                "type": i.r#type,
            })
        })
        .collect();

    json!({
        "id": authorship.author.id,
        "name": authorship.author.name_or_default(),
        "orcid": authorship.author.orcid,
        "position": position_role(index, total),
        "is_corresponding": authorship.is_corresponding.unwrap_or(false),
        "institutions": institutions,
        "raw_affiliations": authorship.raw_affiliation_strings,
    })
}

/// Project a work into its full-detail view.
///
/// # Errors
///
/// Returns an error when the abstract inverted index is present but malformed;
/// every other missing field degrades to null or an empty collection.
pub fn work_detail(work: &Work) -> ToolResult<Value> {
    let total = work.authorships.len();
    let authors: Vec<Value> = work
        .authorships
        .iter()
        .enumerate()
        .map(|(i, a)| authorship_detail(a, i, total))
        .collect();

    let full_abstract = match &work.abstract_inverted_index {
        Some(index) => {
            let text = reconstruct_abstract(index)?;
            (!text.is_empty()).then_some(text)
        }
        None => None,
    };

    let primary_topic = work.primary_topic.as_ref().map(|topic| {
        json!({
            "id": topic.id,
            "display_name": topic.display_name,
            "score": topic.score,
            "subfield": topic.subfield.as_ref().and_then(|f| f.display_name.clone()),
            "field": topic.field.as_ref().and_then(|f| f.display_name.clone()),
            "domain": topic.domain.as_ref().and_then(|f| f.display_name.clone()),
        })
    });

    // The topics list repeats the primary topic first; secondary topics follow.
    let secondary_topics: Vec<Value> = work
        .topics
        .iter()
        .filter(|t| {
            work.primary_topic.as_ref().is_none_or(|primary| primary.id != t.id)
        })
        .take(DETAIL_MAX_TOPICS)
        .map(|t| {
            json!({
                "id": t.id,
                "display_name": t.display_name,
                "score": t.score,
            })
        })
        .collect();

    let keywords: Vec<Value> = work
        .keywords
        .iter()
        .take(DETAIL_MAX_KEYWORDS)
        .map(|k| json!({"display_name": k.display_name, "score": k.score}))
        .collect();

    let grants: Vec<Value> = work
        .grants
        .iter()
        .take(DETAIL_MAX_GRANTS)
        .map(|g| {
            json!({
                "funder": g.funder,
                "funder_display_name": g.funder_display_name,
                "award_id": g.award_id,
            })
        })
        .collect();

    let open_access = work.open_access.as_ref().map(|oa| {
        json!({
            "is_oa": oa.is_oa,
            "oa_status": oa.oa_status,
            "oa_url": oa.oa_url,
        })
    });

    let biblio = work.biblio.as_ref().map(|b| {
        json!({
            "volume": b.volume,
            "issue": b.issue,
            "first_page": b.first_page,
            "last_page": b.last_page,
        })
    });

    Ok(json!({
        "id": work.id,
        "doi": work.doi,
        "title": work.title_or_default(),
        "publication_year": work.publication_year,
        "publication_date": work.publication_date,
        "type": work.r#type,
        "language": work.language,
        "cited_by_count": work.citations(),
        "authors": authors,
        "abstract": full_abstract,
        "primary_topic": primary_topic,
        "secondary_topics": secondary_topics,
        "keywords": keywords,
        "grants": grants,
        "open_access": open_access,
        "venue": work.venue_name(),
        "landing_page_url": work.landing_page_url(),
        "pdf_url": work.pdf_url(),
        "biblio": biblio,
        "referenced_works": work.referenced_works,
        "related_works": work.related_works,
        "citation_percentile": work.citation_normalized_percentile.as_ref().and_then(|p| p.value),
        "fwci": work.fwci,
    }))
}

/// Project an author into its full-detail view.
#[must_use]
pub fn author_detail(author: &Author) -> Value {
    let affiliations: Vec<Value> = author
        .affiliations
        .iter()
        .map(|a| {
            json!({
                "institution": a.institution.as_ref().and_then(|i| i.display_name.clone()),
                "country_code": a.institution.as_ref().and_then(|i| i.country_code.clone()),
                "years": a.years,
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
        "i10_index": author.summary_stats.as_ref().and_then(|s| s.i10_index),
        "affiliations": affiliations,
    })
}
