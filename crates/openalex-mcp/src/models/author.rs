//! Author data model matching the OpenAlex schema.

use serde::{Deserialize, Serialize};

use super::work::InstitutionRef;

/// A researcher from OpenAlex.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Author {
    /// OpenAlex author ID (URL form).
    pub id: String,

    /// Author display name.
    #[serde(default)]
    pub display_name: Option<String>,

    /// ORCID iD (URL form).
    #[serde(default)]
    pub orcid: Option<String>,

    /// Total number of works by this author.
    #[serde(default)]
    pub works_count: Option<i64>,

    /// Total citation count across all works.
    #[serde(default)]
    pub cited_by_count: Option<i64>,

    /// Derived citation metrics.
    #[serde(default)]
    pub summary_stats: Option<SummaryStats>,

    /// Most recent known institutional affiliations.
    #[serde(default)]
    pub last_known_institutions: Vec<InstitutionRef>,

    /// Full affiliation history.
    #[serde(default)]
    pub affiliations: Vec<Affiliation>,
}

impl Author {
    /// Get the author name, falling back to "Unknown" if not available.
    #[must_use]
    pub fn name_or_default(&self) -> &str {
        self.display_name.as_deref().unwrap_or("Unknown")
    }

    /// Get the short OpenAlex ID (`A...`) from the URL-form id.
    #[must_use]
    pub fn short_id(&self) -> &str {
        super::work::short_id(&self.id)
    }

    /// Get the h-index or 0 if not available.
    #[must_use]
    pub fn h_index_value(&self) -> i32 {
        self.summary_stats.as_ref().and_then(|s| s.h_index).unwrap_or(0)
    }

    /// Get citation count or 0 if not available.
    #[must_use]
    pub fn citations(&self) -> i64 {
        self.cited_by_count.unwrap_or(0)
    }

    /// Get works count or 0 if not available.
    #[must_use]
    pub fn works(&self) -> i64 {
        self.works_count.unwrap_or(0)
    }
}

/// Citation metrics derived upstream.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummaryStats {
    /// Mean citations of works from the last two years.
    #[serde(default, rename = "2yr_mean_citedness")]
    pub two_year_mean_citedness: Option<f64>,

    /// h-index.
    #[serde(default)]
    pub h_index: Option<i32>,

    /// i10-index.
    #[serde(default)]
    pub i10_index: Option<i32>,
}

/// One entry in an author's affiliation history.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Affiliation {
    /// The institution.
    #[serde(default)]
    pub institution: Option<InstitutionRef>,

    /// Years the affiliation was active.
    #[serde(default)]
    pub years: Vec<i32>,
}
