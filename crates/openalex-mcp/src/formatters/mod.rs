//! Response reshaping into the two projection tiers.
//!
//! Every list-returning operation emits the compact summary projection; only
//! single-entity point lookups emit the full-detail projection. Neither view
//! is persisted; both are computed per request.

mod abstracts;
mod detail;
mod summary;

pub use abstracts::{PREVIEW_MAX_CHARS, abstract_preview, reconstruct_abstract};
pub use detail::{author_detail, work_detail};
pub use summary::{SUMMARY_MAX_AUTHORS, author_summary, work_summary};
