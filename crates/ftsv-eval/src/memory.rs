//! In-memory collaborators.
//!
//! [`MemoryIndex`] and [`MemoryDocuments`] normalize on the way in, so the evaluator never sees
//! un-folded keys or text. Both deserialize from the plain JSON maps a test fixture would hold:
//! `{"cat": [1, 2]}` for an index and `{"1": "The cat sat"}` for documents.

use std::{
    borrow::Cow,
    collections::{BTreeMap, BTreeSet},
};

use serde::{Deserialize, Serialize};

use crate::{
    normalize::{normalize_text, words},
    source::{DocumentCollection, Index, prefix_range},
};

/// An inverted index held in memory, keys case-folded on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, BTreeSet<Id>>",
    into = "BTreeMap<String, BTreeSet<Id>>",
    bound(
        serialize = "Id: Ord + Clone + Serialize",
        deserialize = "Id: Ord + Deserialize<'de>"
    )
)]
pub struct MemoryIndex<Id: Ord> {
    /// Normalized term → posting set.
    postings: BTreeMap<String, BTreeSet<Id>>,
}

impl<Id: Ord> Default for MemoryIndex<Id> {
    fn default() -> Self {
        Self {
            postings: BTreeMap::new(),
        }
    }
}

impl<Id: Ord + Clone> MemoryIndex<Id> {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a word index over every document in `documents`.
    ///
    /// Words are split the same way phrase confirmation splits document text.
    pub fn from_documents(documents: &MemoryDocuments<Id>) -> Self {
        let mut index = Self::new();
        for (id, doc) in &documents.docs {
            for word in words(&doc.normalized) {
                index.insert(word, id.clone());
            }
        }
        index
    }

    /// Records that `term` occurs in document `id`.
    pub fn insert(&mut self, term: &str, id: Id) {
        self.postings
            .entry(normalize_text(term))
            .or_default()
            .insert(id);
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.postings.len()
    }

    /// Returns true if no term is indexed.
    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    /// Iterates the indexed terms in order.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.postings.keys().map(String::as_str)
    }
}

impl<Id: Ord + Clone, S: AsRef<str>> FromIterator<(S, Id)> for MemoryIndex<Id> {
    fn from_iter<T: IntoIterator<Item = (S, Id)>>(iter: T) -> Self {
        let mut index = Self::new();
        for (term, id) in iter {
            index.insert(term.as_ref(), id);
        }
        index
    }
}

impl<Id: Ord> From<BTreeMap<String, BTreeSet<Id>>> for MemoryIndex<Id> {
    fn from(raw: BTreeMap<String, BTreeSet<Id>>) -> Self {
        let mut postings: BTreeMap<String, BTreeSet<Id>> = BTreeMap::new();
        // Keys differing only in case collapse into one posting set.
        for (term, ids) in raw {
            postings
                .entry(normalize_text(&term))
                .or_default()
                .extend(ids);
        }
        Self { postings }
    }
}

impl<Id: Ord> From<MemoryIndex<Id>> for BTreeMap<String, BTreeSet<Id>> {
    fn from(index: MemoryIndex<Id>) -> Self {
        index.postings
    }
}

impl<Id: Ord + Clone> Index for MemoryIndex<Id> {
    type Id = Id;

    fn lookup(&self, term: &str) -> BTreeSet<Id> {
        self.postings.get(term).cloned().unwrap_or_default()
    }

    fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        prefix_range(&self.postings, prefix)
            .map(|(key, _)| key.clone())
            .collect()
    }
}

/// A stored document: the text as given and its case-folded form.
#[derive(Debug, Clone, PartialEq, Eq)]
struct StoredDocument {
    /// Text exactly as supplied.
    raw: String,
    /// Case-folded text used for phrase confirmation.
    normalized: String,
}

/// A document collection held in memory, text folded once on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<Id, String>",
    into = "BTreeMap<Id, String>",
    bound(
        serialize = "Id: Ord + Clone + Serialize",
        deserialize = "Id: Ord + Deserialize<'de>"
    )
)]
pub struct MemoryDocuments<Id: Ord> {
    /// Document id → stored text.
    docs: BTreeMap<Id, StoredDocument>,
}

impl<Id: Ord> Default for MemoryDocuments<Id> {
    fn default() -> Self {
        Self {
            docs: BTreeMap::new(),
        }
    }
}

impl<Id: Ord + Clone> MemoryDocuments<Id> {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a document.
    pub fn insert(&mut self, id: Id, text: impl Into<String>) {
        let raw = text.into();
        let normalized = normalize_text(&raw);
        self.docs.insert(id, StoredDocument { raw, normalized });
    }

    /// Returns the text of a document exactly as it was supplied.
    pub fn raw_text(&self, id: &Id) -> Option<&str> {
        self.docs.get(id).map(|doc| doc.raw.as_str())
    }

    /// Number of documents.
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    /// Returns true if the collection holds no documents.
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

impl<Id: Ord + Clone, S: Into<String>> FromIterator<(Id, S)> for MemoryDocuments<Id> {
    fn from_iter<T: IntoIterator<Item = (Id, S)>>(iter: T) -> Self {
        let mut documents = Self::new();
        for (id, text) in iter {
            documents.insert(id, text);
        }
        documents
    }
}

impl<Id: Ord> From<BTreeMap<Id, String>> for MemoryDocuments<Id> {
    fn from(raw: BTreeMap<Id, String>) -> Self {
        let docs = raw
            .into_iter()
            .map(|(id, raw)| {
                let normalized = normalize_text(&raw);
                (id, StoredDocument { raw, normalized })
            })
            .collect();
        Self { docs }
    }
}

impl<Id: Ord> From<MemoryDocuments<Id>> for BTreeMap<Id, String> {
    fn from(documents: MemoryDocuments<Id>) -> Self {
        documents
            .docs
            .into_iter()
            .map(|(id, doc)| (id, doc.raw))
            .collect()
    }
}

impl<Id: Ord + Clone> DocumentCollection for MemoryDocuments<Id> {
    type Id = Id;

    fn all_ids(&self) -> BTreeSet<Id> {
        self.docs.keys().cloned().collect()
    }

    fn text_of(&self, id: &Id) -> Cow<'_, str> {
        self.docs
            .get(id)
            .map_or(Cow::Borrowed(""), |doc| Cow::Borrowed(doc.normalized.as_str()))
    }
}
