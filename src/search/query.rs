//! Parsing of combined `free text #tag` query strings.

use crate::domain::TagPath;
use regex::Regex;
use std::sync::LazyLock;

/// `#` followed by `/`-separated segments of word characters and hyphens.
static TAG_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#([\w-]+(?:/[\w-]+)*)").expect("tag token pattern is valid"));

/// A query split into its free-text portion and `#tag` filters.
///
/// # Examples
///
/// ```
/// use grove::search::ParsedQuery;
///
/// let q = ParsedQuery::parse("project #work/ideas plans");
/// assert_eq!(q.text(), "project plans");
/// assert_eq!(q.tags()[0].as_str(), "work/ideas");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuery {
    text: String,
    tags: Vec<TagPath>,
}

impl ParsedQuery {
    /// Extracts every tag token from `query`; what remains, with whitespace
    /// runs collapsed and trimmed, is the free-text portion.
    ///
    /// A `#` that is not followed by a word character stays in the text.
    /// Repeated tag filters are kept once.
    pub fn parse(query: &str) -> Self {
        let mut tags: Vec<TagPath> = Vec::new();
        for caps in TAG_TOKEN.captures_iter(query) {
            match TagPath::new(&caps[1]) {
                Ok(tag) if !tags.contains(&tag) => tags.push(tag),
                _ => {}
            }
        }

        let stripped = TAG_TOKEN.replace_all(query, " ");
        let text = stripped.split_whitespace().collect::<Vec<_>>().join(" ");

        tracing::trace!(query, text = %text, tags = ?tags, "parsed query");
        Self { text, tags }
    }

    /// Returns the free-text portion (possibly empty).
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the whitespace-separated words of the free-text portion.
    pub fn words(&self) -> Vec<&str> {
        self.text.split_whitespace().collect()
    }

    /// Returns the tag filters in query order.
    pub fn tags(&self) -> &[TagPath] {
        &self.tags
    }

    /// Returns whether there is any free text.
    pub fn has_text(&self) -> bool {
        !self.text.is_empty()
    }

    /// Returns whether the query has neither text nor tag filters.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.tags.is_empty()
    }
}
