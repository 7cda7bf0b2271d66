//! The OpenAlex filter grammar and sort normalization.
//!
//! Filters travel upstream as a single comma-joined `filter` query parameter
//! of colon-delimited `key:expression` pairs. Expressions are an exact value,
//! a `>`/`<` one-sided bound, or an `A-B` range literal.

use std::borrow::Cow;

/// An ordered set of filter expressions keyed by filter name.
///
/// Setting a key that is already present replaces its expression in place, so
/// a key can never appear twice in the serialized filter string. Order is
/// otherwise insertion order, which keeps serialized requests deterministic
/// for cache keying.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    entries: Vec<(String, String)>,
}

impl FilterSet {
    /// Create an empty filter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a filter expression, replacing any existing expression for the key.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();

        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Get the expression for a key, if set.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    /// Check if no filters are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of filter entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Serialize to the upstream `filter` parameter value, or `None` if empty.
    #[must_use]
    pub fn to_query(&self) -> Option<String> {
        if self.entries.is_empty() {
            return None;
        }

        Some(
            self.entries
                .iter()
                .map(|(k, v)| format!("{k}:{v}"))
                .collect::<Vec<_>>()
                .join(","),
        )
    }
}

/// Collapse a pair of optional year bounds into a single filter expression.
///
/// Both bounds present become one `from-to` range literal; a lone lower bound
/// becomes `>from-1` (inclusive of `from`); a lone upper bound becomes
/// `<to+1`. Emitting the range as a single expression matters: two separate
/// assignments to the year key would silently drop one bound upstream.
#[must_use]
pub fn publication_year_filter(from: Option<i32>, to: Option<i32>) -> Option<String> {
    match (from, to) {
        (Some(from), Some(to)) => Some(format!("{from}-{to}")),
        (Some(from), None) => Some(format!(">{}", from - 1)),
        (None, Some(to)) => Some(format!("<{}", to + 1)),
        (None, None) => None,
    }
}

/// Normalize a sort specification for transmission.
///
/// A bare field name gets an explicit `:desc` suffix; a field that already
/// carries a direction passes through unchanged.
#[must_use]
pub fn normalize_sort(sort: &str) -> Cow<'_, str> {
    if sort.contains(':') {
        Cow::Borrowed(sort)
    } else {
        Cow::Owned(format!("{sort}:desc"))
    }
}
