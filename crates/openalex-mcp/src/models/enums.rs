//! Enumeration types for API and tool parameters.

use serde::{Deserialize, Serialize};

/// The seven entity kinds OpenAlex serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    /// Scholarly works (articles, books, datasets, ...).
    Works,
    /// Researchers.
    Authors,
    /// Universities, companies, labs.
    Institutions,
    /// Journals, repositories, conferences.
    Sources,
    /// Topic classifications.
    Topics,
    /// Publishing houses.
    Publishers,
    /// Funding bodies.
    Funders,
}

impl EntityType {
    /// Every entity type, in upstream documentation order.
    pub const ALL: [Self; 7] = [
        Self::Works,
        Self::Authors,
        Self::Institutions,
        Self::Sources,
        Self::Topics,
        Self::Publishers,
        Self::Funders,
    ];

    /// The lowercase name used in paths and tool arguments.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Works => "works",
            Self::Authors => "authors",
            Self::Institutions => "institutions",
            Self::Sources => "sources",
            Self::Topics => "topics",
            Self::Publishers => "publishers",
            Self::Funders => "funders",
        }
    }

    /// The API path for this entity's list endpoint.
    #[must_use]
    pub fn path(self) -> String {
        format!("/{}", self.as_str())
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_type_paths() {
        assert_eq!(EntityType::Works.path(), "/works");
        assert_eq!(EntityType::Funders.path(), "/funders");
    }

    #[test]
    fn test_entity_type_serde() {
        let parsed: EntityType = serde_json::from_str(r#""institutions""#).unwrap();
        assert_eq!(parsed, EntityType::Institutions);

        let json = serde_json::to_string(&EntityType::Topics).unwrap();
        assert_eq!(json, r#""topics""#);

        assert!(serde_json::from_str::<EntityType>(r#""journals""#).is_err());
    }

    #[test]
    fn test_all_covers_seven_kinds() {
        assert_eq!(EntityType::ALL.len(), 7);
    }
}
