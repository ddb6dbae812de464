//! Hierarchical tag path type for organizing notes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Separator between tag path segments.
pub const TAG_SEPARATOR: char = '/';

/// A hierarchical, `/`-delimited tag such as `work/projects/alpha`.
///
/// Tags are case-sensitive. A tag implicitly names every ancestor path
/// (`work`, `work/projects`), which is what makes parent-tag filtering
/// include descendants.
///
/// # Normalization
/// - Surrounding whitespace is trimmed, per path and per segment
/// - Leading/trailing slashes are stripped
/// - Consecutive slashes are collapsed
///
/// # Examples
///
/// ```
/// use grove::domain::TagPath;
///
/// let tag = TagPath::new("work/projects/alpha").unwrap();
/// assert_eq!(tag.name(), "alpha");
/// assert_eq!(tag.depth(), 3);
/// assert_eq!(tag.parent().unwrap().as_str(), "work/projects");
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TagPath(String);

/// Error returned when parsing an invalid tag path.
#[derive(Debug, Clone)]
pub struct ParseTagPathError(String);

impl fmt::Display for ParseTagPathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ParseTagPathError {}

impl TagPath {
    /// Creates a new TagPath from a string.
    ///
    /// # Errors
    ///
    /// Returns `ParseTagPathError` if the path is empty after normalization
    /// (e.g. `""`, `"   "`, `"///"`).
    pub fn new(path: &str) -> Result<Self, ParseTagPathError> {
        let segments: Vec<&str> = path
            .trim()
            .split(TAG_SEPARATOR)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();

        if segments.is_empty() {
            return Err(ParseTagPathError("tag path cannot be empty".to_string()));
        }

        Ok(Self(segments.join("/")))
    }

    /// Wraps a path that is already known to be normalized, such as a
    /// prefix of another TagPath ending at a separator.
    pub(crate) fn from_normalized(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Returns the full path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the path segments, root first.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(TAG_SEPARATOR)
    }

    /// Returns the number of segments in the path.
    pub fn depth(&self) -> usize {
        self.segments().count()
    }

    /// Returns the leaf segment (`alpha` for `work/projects/alpha`).
    pub fn name(&self) -> &str {
        match self.0.rfind(TAG_SEPARATOR) {
            Some(idx) => &self.0[idx + 1..],
            None => &self.0,
        }
    }

    /// Returns the parent tag, or `None` for a root-level tag.
    pub fn parent(&self) -> Option<TagPath> {
        self.0
            .rfind(TAG_SEPARATOR)
            .map(|idx| Self::from_normalized(&self.0[..idx]))
    }

    /// Returns the ancestor paths as slices of this path, shallowest first.
    ///
    /// Does not include self.
    pub fn ancestor_paths(&self) -> impl Iterator<Item = &str> {
        self.0
            .match_indices(TAG_SEPARATOR)
            .map(move |(idx, _)| &self.0[..idx])
    }

    /// Returns all ancestor tags, from root to immediate parent.
    pub fn ancestors(&self) -> Vec<TagPath> {
        self.ancestor_paths()
            .map(Self::from_normalized)
            .collect()
    }

    /// Returns whether this tag is a proper ancestor of `other`.
    ///
    /// `work` is an ancestor of `work/ideas` but NOT of `working`.
    pub fn is_ancestor_of(&self, other: &TagPath) -> bool {
        other.0.len() > self.0.len()
            && other.0.starts_with(&self.0)
            && other.0[self.0.len()..].starts_with(TAG_SEPARATOR)
    }

    /// Returns whether `other` is this tag or one of its descendants.
    pub fn covers(&self, other: &TagPath) -> bool {
        self == other || self.is_ancestor_of(other)
    }
}

impl fmt::Display for TagPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for TagPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TagPath(\"{}\")", self.0)
    }
}

impl AsRef<str> for TagPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for TagPath {
    type Err = ParseTagPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for TagPath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for TagPath {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
