//! Data models for OpenAlex API entities.
//!
//! All models use `#[serde(default)]` for optional fields; OpenAlex responses
//! are snake_case, so no field renaming is needed.

mod author;
mod enums;
mod inputs;
mod work;

pub use author::{Affiliation, Author, SummaryStats};
pub use enums::EntityType;
pub use inputs::*;
pub use work::{
    AuthorRef, Authorship, AutocompleteMatch, Biblio, CitationPercentile, FieldRef, Grant,
    GroupByBucket, InstitutionRef, Keyword, ListResponse, Location, Meta, OpenAccess, SourceRef,
    Topic, Work, short_id,
};
