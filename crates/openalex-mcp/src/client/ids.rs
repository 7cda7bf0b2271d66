//! Entity identifier normalization.
//!
//! OpenAlex accepts three surface forms for a point lookup: a native ID
//! (`W2741809807`), a DOI (bare or `doi:`-prefixed), or a fully-qualified URL.
//! Anything carrying a `/` or a scheme must be disambiguated before it lands
//! in a path segment, or the request path splits and hits the wrong resource.

use std::borrow::Cow;
use std::sync::LazyLock;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use regex::Regex;

use crate::error::{ClientError, ClientResult};

/// Escape everything outside the RFC 3986 unreserved set, so a URL-form
/// identifier always travels as a single path segment.
const SINGLE_SEGMENT: &AsciiSet =
    &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

static BARE_DOI: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^10\.\d{4,9}/\S+$").expect("valid DOI regex"));

/// Normalize an entity identifier for safe use as a URL path segment.
///
/// - native IDs and `doi:`-prefixed DOIs pass through unchanged
/// - bare DOIs gain a `doi:` prefix
/// - URLs (anything starting with `http`) are percent-encoded whole
///
/// # Errors
///
/// Returns [`ClientError::InvalidIdentifier`] for empty input or for an
/// identifier that contains a `/` without being a recognizable DOI or URL.
pub fn normalize_entity_id(raw: &str) -> ClientResult<Cow<'_, str>> {
    let id = raw.trim();

    if id.is_empty() {
        return Err(ClientError::invalid_identifier(raw));
    }

    let bytes = id.as_bytes();

    if bytes.len() >= 4 && bytes[..4].eq_ignore_ascii_case(b"http") {
        return Ok(Cow::Owned(utf8_percent_encode(id, SINGLE_SEGMENT).to_string()));
    }

    if bytes.len() >= 4 && bytes[..4].eq_ignore_ascii_case(b"doi:") {
        return Ok(Cow::Borrowed(id));
    }

    if BARE_DOI.is_match(id) {
        return Ok(Cow::Owned(format!("doi:{id}")));
    }

    if id.contains('/') {
        return Err(ClientError::invalid_identifier(raw));
    }

    Ok(Cow::Borrowed(id))
}
