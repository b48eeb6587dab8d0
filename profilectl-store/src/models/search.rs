//! Search text and LIKE pattern construction

use serde::{Deserialize, Serialize};

/// Maximum rows returned by a profile search
pub const SEARCH_LIMIT: i64 = 20;

/// Search text, kept exactly as the caller passed it
///
/// An empty query matches every user (up to the limit).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Wrap search text without trimming or length checks.
    ///
    /// # Example
    /// ```
    /// use profilectl_store::SearchQuery;
    ///
    /// assert_eq!(SearchQuery::new(" eng ").as_str(), " eng ");
    /// assert_eq!(SearchQuery::new("").like_pattern(), "%%");
    /// ```
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// The raw text, used for exact skill membership.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `%text%` with LIKE metacharacters escaped, for ILIKE substring matching.
    ///
    /// PostgreSQL's default LIKE escape character is backslash.
    pub fn like_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.0.len() + 2);
        pattern.push('%');
        for c in self.0.chars() {
            if matches!(c, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        pattern.push('%');
        pattern
    }

    /// Case-insensitive substring test with the same semantics as the ILIKE pattern.
    pub fn matches_text(&self, haystack: &str) -> bool {
        haystack.to_lowercase().contains(&self.0.to_lowercase())
    }
}

impl From<String> for SearchQuery {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for SearchQuery {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<SearchQuery> for String {
    fn from(q: SearchQuery) -> Self {
        q.0
    }
}
