//! In-memory prefix index over note titles and content.

use crate::domain::{Note, NoteId};
use crate::index::{Field, IndexHit, IndexedNote, NoteIndex};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::ops::Bound;

/// Splits text into lowercase words on any non-alphanumeric character.
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
}

/// Word → entries posting lists for one field. Entries are referenced by
/// their insertion sequence number, so iteration follows insertion order.
#[derive(Debug, Default)]
struct FieldPostings(BTreeMap<String, BTreeSet<u64>>);

impl FieldPostings {
    fn insert(&mut self, words: &BTreeSet<String>, seq: u64) {
        for word in words {
            self.0.entry(word.clone()).or_default().insert(seq);
        }
    }

    fn remove(&mut self, words: &BTreeSet<String>, seq: u64) {
        for word in words {
            if let Some(postings) = self.0.get_mut(word) {
                postings.remove(&seq);
                if postings.is_empty() {
                    self.0.remove(word);
                }
            }
        }
    }

    /// Entries containing a word that starts with `token`.
    fn prefix_matches(&self, token: &str) -> BTreeSet<u64> {
        self.0
            .range::<str, _>((Bound::Included(token), Bound::Unbounded))
            .take_while(|(word, _)| word.starts_with(token))
            .flat_map(|(_, seqs)| seqs.iter().copied())
            .collect()
    }

    /// Entries where every token prefix-matches some word.
    fn match_all(&self, tokens: &[String]) -> BTreeSet<u64> {
        let mut tokens = tokens.iter();
        let Some(first) = tokens.next() else {
            return BTreeSet::new();
        };
        let mut result = self.prefix_matches(first);
        for token in tokens {
            if result.is_empty() {
                break;
            }
            let matches = self.prefix_matches(token);
            result.retain(|seq| matches.contains(seq));
        }
        result
    }
}

#[derive(Debug)]
struct Entry {
    seq: u64,
    note: IndexedNote,
    title_words: BTreeSet<String>,
    content_words: BTreeSet<String>,
}

/// An in-memory index with forward (prefix) tokenization.
///
/// A query token matches any indexed word that starts with it, so `proj`
/// finds "Project". All tokens of a query must match within the same field.
/// Hits are ordered title matches first, then content-only matches, each
/// in insertion order.
///
/// # Examples
///
/// ```
/// use grove::domain::Note;
/// use grove::index::{MemoryIndex, NoteIndex};
///
/// let mut index = MemoryIndex::new();
/// index.add(&Note::builder("1".parse().unwrap(), "Project Ideas").build());
///
/// let hits = index.search("proj", 10);
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].id().as_str(), "1");
/// ```
#[derive(Debug, Default)]
pub struct MemoryIndex {
    entries: HashMap<NoteId, Entry>,
    by_seq: BTreeMap<u64, NoteId>,
    title: FieldPostings,
    content: FieldPostings,
    next_seq: u64,
}

impl MemoryIndex {
    /// Creates a new, empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored projection for `id`, if indexed.
    pub fn get(&self, id: &NoteId) -> Option<&IndexedNote> {
        self.entries.get(id).map(|e| &e.note)
    }

    /// Returns the number of distinct words indexed for `field`.
    pub fn vocabulary_size(&self, field: Field) -> usize {
        match field {
            Field::Title => self.title.0.len(),
            Field::Content => self.content.0.len(),
            Field::Tags => 0,
        }
    }
}

impl NoteIndex for MemoryIndex {
    fn add(&mut self, note: &Note) {
        // Re-adding an id replaces the previous entry.
        if self.remove(note.id()) {
            tracing::debug!(id = %note.id(), "add replaced an existing index entry");
        }

        let seq = self.next_seq;
        self.next_seq += 1;

        let title_words: BTreeSet<String> = tokenize(note.title()).collect();
        let content_words: BTreeSet<String> = tokenize(note.content()).collect();
        self.title.insert(&title_words, seq);
        self.content.insert(&content_words, seq);

        self.by_seq.insert(seq, note.id().clone());
        self.entries.insert(
            note.id().clone(),
            Entry {
                seq,
                note: IndexedNote::from(note),
                title_words,
                content_words,
            },
        );
        tracing::trace!(id = %note.id(), seq, "indexed note");
    }

    fn remove(&mut self, id: &NoteId) -> bool {
        let Some(entry) = self.entries.remove(id) else {
            return false;
        };
        self.title.remove(&entry.title_words, entry.seq);
        self.content.remove(&entry.content_words, entry.seq);
        self.by_seq.remove(&entry.seq);
        tracing::trace!(%id, seq = entry.seq, "removed note from index");
        true
    }

    fn clear(&mut self) {
        tracing::debug!(entries = self.entries.len(), "clearing index");
        self.entries.clear();
        self.by_seq.clear();
        self.title = FieldPostings::default();
        self.content = FieldPostings::default();
    }

    fn search(&self, query: &str, limit: usize) -> Vec<IndexHit> {
        let mut tokens: Vec<String> = tokenize(query).collect();
        tokens.sort();
        tokens.dedup();
        if tokens.is_empty() || limit == 0 {
            return Vec::new();
        }

        let title_hits = self.title.match_all(&tokens);
        let content_hits = self.content.match_all(&tokens);

        let ordered = title_hits
            .iter()
            .chain(content_hits.iter().filter(|seq| !title_hits.contains(seq)));

        let hits: Vec<IndexHit> = ordered
            .filter_map(|&seq| {
                let id = self.by_seq.get(&seq)?;
                let entry = self.entries.get(id)?;
                let mut fields = BTreeSet::new();
                if title_hits.contains(&seq) {
                    fields.insert(Field::Title);
                }
                if content_hits.contains(&seq) {
                    fields.insert(Field::Content);
                }
                Some(IndexHit::new(entry.note.clone(), fields))
            })
            .take(limit)
            .collect();

        tracing::trace!(query, tokens = ?tokens, hits = hits.len(), "index search");
        hits
    }

    fn contains(&self, id: &NoteId) -> bool {
        self.entries.contains_key(id)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
