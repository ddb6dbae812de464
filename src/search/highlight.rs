//! Emphasis marking and snippet extraction for search results.

use regex::{Regex, RegexBuilder};

/// Opening emphasis marker.
pub const MARK_OPEN: &str = "<mark>";
/// Closing emphasis marker.
pub const MARK_CLOSE: &str = "</mark>";
/// Marker for text cut from a snippet.
pub const ELLIPSIS: &str = "...";

/// Wraps case-insensitive occurrences of a fixed set of words.
///
/// # Examples
///
/// ```
/// use grove::search::Highlighter;
///
/// let h = Highlighter::new(&["project"]);
/// assert_eq!(h.highlight("Project Ideas"), "<mark>Project</mark> Ideas");
/// ```
#[derive(Debug, Clone)]
pub struct Highlighter {
    pattern: Option<Regex>,
}

impl Highlighter {
    /// Creates a highlighter for `words`. Blank words are ignored; with no
    /// words left, text passes through unchanged.
    pub fn new(words: &[&str]) -> Self {
        let mut words: Vec<&str> = words
            .iter()
            .map(|w| w.trim())
            .filter(|w| !w.is_empty())
            .collect();
        // Longest first so "project" wins over "pro" at the same position.
        words.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
        words.dedup();

        if words.is_empty() {
            return Self { pattern: None };
        }

        let alternation = words
            .iter()
            .map(|w| regex::escape(w))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = RegexBuilder::new(&alternation)
            .case_insensitive(true)
            .build()
            .map_err(|e| tracing::debug!(error = %e, "highlight pattern rejected"))
            .ok();
        Self { pattern }
    }

    /// Wraps every match in `text` with the emphasis markers.
    pub fn highlight(&self, text: &str) -> String {
        match &self.pattern {
            Some(re) => re
                .replace_all(text, |caps: &regex::Captures<'_>| {
                    format!("{MARK_OPEN}{}{MARK_CLOSE}", &caps[0])
                })
                .into_owned(),
            None => text.to_string(),
        }
    }

    /// Returns roughly `length` characters of `text` centred on the first
    /// match, highlighted, with [`ELLIPSIS`] where text was cut.
    ///
    /// Without a match the snippet is taken from the start of the text.
    pub fn snippet(&self, text: &str, length: usize) -> String {
        let total = text.chars().count();
        if total == 0 || length == 0 {
            return String::new();
        }

        let first_match = self
            .pattern
            .as_ref()
            .and_then(|re| re.find(text))
            .map(|m| text[..m.start()].chars().count());

        let (start, end) = match first_match {
            Some(at) => {
                let mut start = at.saturating_sub(length / 2);
                let end = (start + length).min(total);
                if end - start < length {
                    start = end.saturating_sub(length);
                }
                (start, end)
            }
            None => (0, length.min(total)),
        };

        let excerpt = &text[byte_offset(text, start)..byte_offset(text, end)];
        let mut snippet = String::with_capacity(excerpt.len() + 2 * ELLIPSIS.len());
        if start > 0 {
            snippet.push_str(ELLIPSIS);
        }
        snippet.push_str(&self.highlight(excerpt));
        if end < total {
            snippet.push_str(ELLIPSIS);
        }
        snippet
    }
}

/// Removes emphasis markers, for plain-text display.
pub fn strip_marks(s: &str) -> String {
    s.replace(MARK_OPEN, "").replace(MARK_CLOSE, "")
}

/// Byte offset of the `char_idx`-th character (or the end of `text`).
fn byte_offset(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map_or(text.len(), |(byte, _)| byte)
}
