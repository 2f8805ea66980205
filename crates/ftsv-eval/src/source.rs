//! Collaborator contracts consumed by the evaluator.
//!
//! An [`Index`] maps normalized terms to document ids; a [`DocumentCollection`] knows every id
//! and the normalized text behind it. Both are total: a missing term or id yields an empty
//! result, never an error. Evaluation only reads from them.

use std::{
    borrow::Cow,
    collections::{BTreeMap, BTreeSet, HashMap, HashSet},
    hash::{BuildHasher, Hash},
    ops::Bound,
};

use crate::normalize::normalize_text;

/// An inverted index: normalized term → set of document ids.
pub trait Index {
    /// Document identifier type.
    type Id: Ord + Clone;

    /// Returns the documents containing `term`, or an empty set if the term is not indexed.
    fn lookup(&self, term: &str) -> BTreeSet<Self::Id>;

    /// Returns every indexed term starting with `prefix`.
    fn keys_with_prefix(&self, prefix: &str) -> Vec<String>;
}

/// The documents an index was built from.
pub trait DocumentCollection {
    /// Document identifier type.
    type Id: Ord + Clone;

    /// Returns every known document id (the universe used for negation).
    fn all_ids(&self) -> BTreeSet<Self::Id>;

    /// Returns the normalized text of a document, or an empty string for unknown ids.
    ///
    /// The text must be case-folded the same way as query words.
    fn text_of(&self, id: &Self::Id) -> Cow<'_, str>;
}

impl<T: Index + ?Sized> Index for &T {
    type Id = T::Id;

    fn lookup(&self, term: &str) -> BTreeSet<Self::Id> {
        (**self).lookup(term)
    }

    fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        (**self).keys_with_prefix(prefix)
    }
}

impl<T: DocumentCollection + ?Sized> DocumentCollection for &T {
    type Id = T::Id;

    fn all_ids(&self) -> BTreeSet<Self::Id> {
        (**self).all_ids()
    }

    fn text_of(&self, id: &Self::Id) -> Cow<'_, str> {
        (**self).text_of(id)
    }
}

/// A plain ordered map is an index as long as its keys are already normalized.
impl<Id: Ord + Clone> Index for BTreeMap<String, BTreeSet<Id>> {
    type Id = Id;

    fn lookup(&self, term: &str) -> BTreeSet<Id> {
        self.get(term).cloned().unwrap_or_default()
    }

    fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        prefix_range(self, prefix).map(|(key, _)| key.clone()).collect()
    }
}

/// Hash-based postings, the shape most test harnesses build by hand.
impl<Id, S> Index for HashMap<String, HashSet<Id, S>, S>
where
    Id: Ord + Clone + Hash,
    S: BuildHasher,
{
    type Id = Id;

    fn lookup(&self, term: &str) -> BTreeSet<Id> {
        self.get(term)
            .map(|ids| ids.iter().cloned().collect())
            .unwrap_or_default()
    }

    fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        let mut keys: Vec<String> = self
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect();
        keys.sort_unstable();
        keys
    }
}

/// Raw document bodies keyed by id; text is case-folded on every read.
impl<Id: Ord + Clone> DocumentCollection for BTreeMap<Id, String> {
    type Id = Id;

    fn all_ids(&self) -> BTreeSet<Id> {
        self.keys().cloned().collect()
    }

    fn text_of(&self, id: &Id) -> Cow<'_, str> {
        self.get(id)
            .map_or(Cow::Borrowed(""), |text| Cow::Owned(normalize_text(text)))
    }
}

/// Iterates the entries of an ordered map whose keys start with `prefix`.
pub(crate) fn prefix_range<'a, V>(
    map: &'a BTreeMap<String, V>,
    prefix: &'a str,
) -> impl Iterator<Item = (&'a String, &'a V)> + 'a {
    map.range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
        .take_while(move |(key, _)| key.starts_with(prefix))
}
